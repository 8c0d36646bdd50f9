use super::*;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn repo(owner: &str, name: &str, branch: &str) -> RepoPath {
    RepoPath {
        owner: owner.to_string(),
        repo: name.to_string(),
        branch: branch.to_string(),
    }
}

#[test]
fn test_parse_repo_root_defaults_to_head() {
    let parsed = parse_repo_entry_path(&url("https://github.com/rust-lang/rust")).unwrap();

    assert_eq!(parsed.owner, "rust-lang");
    assert_eq!(parsed.repo, "rust");
    assert_eq!(parsed.branch, "HEAD");
    assert_eq!(parsed.path, "");
    assert_eq!(parsed.fullpath, "");
}

#[test]
fn test_parse_tree_branch_and_path() {
    let parsed =
        parse_repo_entry_path(&url("https://github.com/a/b/tree/dev/src/lib")).unwrap();

    assert_eq!(parsed.branch, "dev");
    assert_eq!(parsed.path, "src/lib");
    assert_eq!(parsed.fullpath, "tree/dev/src/lib");
}

#[test]
fn test_parse_path_without_tree_keeps_head() {
    let parsed = parse_repo_entry_path(&url("https://github.com/a/b/src/lib")).unwrap();

    assert_eq!(parsed.branch, "HEAD");
    assert_eq!(parsed.path, "src/lib");
    assert_eq!(parsed.fullpath, "src/lib");
}

#[test]
fn test_parse_ignores_empty_segments() {
    let parsed = parse_repo_entry_path(&url("https://github.com//a//b/tree/main//docs/")).unwrap();

    assert_eq!(parsed.owner, "a");
    assert_eq!(parsed.repo, "b");
    assert_eq!(parsed.branch, "main");
    assert_eq!(parsed.path, "docs");
}

#[test]
fn test_parse_trailing_tree_without_branch() {
    let parsed = parse_repo_entry_path(&url("https://github.com/a/b/tree")).unwrap();

    assert_eq!(parsed.branch, "HEAD");
    assert_eq!(parsed.path, "");
    assert_eq!(parsed.fullpath, "tree");
}

#[test]
fn test_parse_fails_without_owner_and_repo() {
    assert!(parse_repo_entry_path(&url("https://github.com/")).is_none());
    assert!(parse_repo_entry_path(&url("https://github.com/only-owner")).is_none());
}

#[test]
fn test_parse_then_rejoin_reconstructs_url_path() {
    for input in [
        "/a/b",
        "/a/b/src",
        "/a/b/tree/dev",
        "/a/b/tree/dev/src/deep/file.rs",
    ] {
        let parsed = parse_repo_entry_path(&url(&format!("https://github.com{input}"))).unwrap();
        let mut rebuilt = format!("/{}/{}", parsed.owner, parsed.repo);
        if parsed.branch != "HEAD" {
            rebuilt.push_str(&format!("/tree/{}", parsed.branch));
        }
        if !parsed.path.is_empty() {
            rebuilt.push('/');
            rebuilt.push_str(&parsed.path);
        }
        assert_eq!(rebuilt, input);
    }
}

#[test]
fn test_entry_path_within_matching_repo() {
    let own = repo("a", "b", "HEAD");

    let path = entry_path_within(&own, &url("https://github.com/a/b/src/lib"));

    assert_eq!(path.as_deref(), Some("src/lib"));
}

#[test]
fn test_entry_path_within_rejects_any_mismatch() {
    let own = repo("a", "b", "HEAD");

    assert!(entry_path_within(&own, &url("https://github.com/a/b/tree/dev/src")).is_none());
    assert!(entry_path_within(&own, &url("https://github.com/x/b/src")).is_none());
    assert!(entry_path_within(&own, &url("https://github.com/a/y/src")).is_none());
    assert!(entry_path_within(&own, &url("https://github.com/a")).is_none());
}

#[test]
fn test_remove_leading_slash() {
    assert_eq!(remove_leading_slash("./././hello/world.txt"), "hello/world.txt");
    assert_eq!(remove_leading_slash("////hello/world.txt"), "hello/world.txt");
    assert_eq!(remove_leading_slash("//././/hello/world.txt"), "hello/world.txt");
    assert_eq!(remove_leading_slash(".hello/world.txt"), ".hello/world.txt");
    assert_eq!(remove_leading_slash("/.hello/world.txt"), ".hello/world.txt");
    assert_eq!(remove_leading_slash("../hello/world.txt"), "../hello/world.txt");
    assert_eq!(remove_leading_slash(""), "");
}

#[test]
fn test_content_page_gating() {
    let page = |s: &str| parse_repo_entry_path(&url(s)).unwrap();

    assert!(is_repository_content_page(&page("https://github.com/a/b")));
    assert!(is_repository_content_page(&page("https://github.com/a/b/tree/main/src")));
    assert!(!is_repository_content_page(&page("https://github.com/a/b/issues/12")));
    assert!(!is_repository_content_page(&page("https://github.com/a/b/blob/main/README.md")));
    assert!(!is_repository_content_page(&page("https://github.com/settings/profile")));
    assert!(!is_repository_content_page(&page("https://github.com/orgs/rust-lang")));
}

#[test]
fn test_parse_percent_decodes_segments() {
    let parsed =
        parse_repo_entry_path(&url("https://github.com/a/b/tree/feat%2Fx%C3%A9/my%20dir/caf%C3%A9")).unwrap();

    assert_eq!(parsed.branch, "feat/xé");
    assert_eq!(parsed.path, "my dir/café");
}

#[test]
fn test_entry_path_within_decodes_spaces() {
    let own = repo("a", "b", "main");

    let path = entry_path_within(&own, &url("https://github.com/a/b/tree/main/my%20dir"));

    assert_eq!(path.as_deref(), Some("my dir"));
}
