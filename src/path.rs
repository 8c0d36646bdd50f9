//! Turning repository browsing URLs into `owner/repo/branch/path` tuples.

use std::collections::HashSet;

use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::types::{RepoEntryPath, RepoPath, DEFAULT_BRANCH};

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;

lazy_static! {
    static ref LEADING_SLASHES: Regex = Regex::new(r"^(/|\./)*").expect("static regex");

    static ref RESERVED_OWNERS: HashSet<&'static str> = [
        "settings", "notifications", "pulls", "issues", "projects", "orgs", "github", "readme",
        "discussions", "search", "codespaces", "explore", "marketplace", "sponsors", "account",
        "organizations", "logout", "about", "features", "enterprise", "copilot", "security",
        "pricing", "team", "premium-support", "customer-stories", "github-copilot",
    ]
    .into_iter()
    .collect();

    static ref RESERVED_FULLPATHS: HashSet<&'static str> = [
        "issues", "pulls", "actions", "projects", "wiki", "security", "settings", "branches",
        "tags", "releases", "pulse", "graphs", "community", "network", "forks", "activity",
        "stargazers", "watchers", "blob", "edit",
    ]
    .into_iter()
    .collect();
}

/// Parses `/{owner}/{repo}[/tree/{branch}][/{path...}]`.
///
/// Returns `None` when the URL has fewer than two path segments. A URL
/// without a `tree/<branch>` segment resolves to the `HEAD` ref. Segments
/// are percent-decoded, so `my%20dir` becomes `my dir`.
pub fn parse_repo_entry_path(url: &Url) -> Option<RepoEntryPath> {
    let pathname = url.path();
    let segments: Vec<String> = pathname
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect();

    let (owner, repo, rest) = match segments.as_slice() {
        [owner, repo, rest @ ..] => (owner.clone(), repo.clone(), rest),
        _ => {
            debug!(pathname, "failed to parse the repository's location from url");
            return None;
        }
    };

    let fullpath = rest.join("/");
    let (branch, path_segments) = match rest {
        [tree, branch, path @ ..] if tree == "tree" => (branch.clone(), path),
        [tree] if tree == "tree" => (DEFAULT_BRANCH.to_string(), &rest[1..]),
        _ => (DEFAULT_BRANCH.to_string(), rest),
    };

    Some(RepoEntryPath {
        owner,
        repo,
        branch,
        path: path_segments.join("/"),
        fullpath,
    })
}

/// `true` when `entry` lives in the same repository and on the same ref as `repo`.
pub fn same_repo(repo: &RepoPath, entry: &RepoEntryPath) -> bool {
    repo.owner == entry.owner && repo.repo == entry.repo && repo.branch == entry.branch
}

/// Parses `url` and returns its entry path only if it belongs to `repo`.
pub fn entry_path_within(repo: &RepoPath, url: &Url) -> Option<String> {
    let entry = parse_repo_entry_path(url)?;
    if !same_repo(repo, &entry) {
        debug!(
            url = %url,
            "url points at {}/{}@{}, not {}/{}@{}",
            entry.owner, entry.repo, entry.branch, repo.owner, repo.repo, repo.branch
        );
        return None;
    }
    Some(entry.path)
}

/// Strips every leading `/` and `./`.
///
/// `"//././/hello/world.txt"` becomes `"hello/world.txt"`, while
/// `".hello"` and `"../hello"` are left untouched.
pub fn remove_leading_slash(s: &str) -> &str {
    match LEADING_SLASHES.find(s) {
        Some(m) => &s[m.end()..],
        None => s,
    }
}

/// Whether the parsed page shows repository contents, as opposed to a
/// site page (`/settings/...`) or a repository sub-page (`/issues`, `/wiki`).
pub fn is_repository_content_page(entry: &RepoEntryPath) -> bool {
    if entry.owner.is_empty() || RESERVED_OWNERS.contains(entry.owner.as_str()) {
        return false;
    }
    if entry.repo.is_empty() {
        return false;
    }
    let first = entry.fullpath.split('/').next().unwrap_or_default();
    !RESERVED_FULLPATHS.contains(first)
}
