use serde::{Deserialize, Serialize};

pub mod github;

/// Ref used when a page URL names no explicit `tree/<branch>` segment.
pub const DEFAULT_BRANCH: &str = "HEAD";

/// Identity of a repository at a given ref.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoPath {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

/// A location inside a repository, as parsed from a browsing URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoEntryPath {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Path of the entry relative to the repository root.
    pub path: String,
    /// Everything after `owner/repo`, including `tree/<branch>` or
    /// non-content pages such as `settings`.
    pub fullpath: String,
}

impl RepoEntryPath {
    pub fn repo_path(&self) -> RepoPath {
        RepoPath {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// Byte size of a single file or folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySizeInfo {
    pub name: String,
    pub size: u64,
}

/// One entry per direct child of a folder. Order is not meaningful.
pub type FolderSizeInfo = Vec<EntrySizeInfo>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderSizeOptions {
    /// Directory levels folded into each direct child. `0` behaves like `1`.
    pub recursion_depth: u32,
}

impl Default for FolderSizeOptions {
    fn default() -> Self {
        Self { recursion_depth: 1 }
    }
}

impl FolderSizeOptions {
    pub fn with_depth(recursion_depth: u32) -> Self {
        Self { recursion_depth }
    }

    pub(crate) fn depth(&self) -> u32 {
        self.recursion_depth.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMethod {
    #[default]
    Rest,
    GraphQL,
}

impl std::str::FromStr for ApiMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rest" => Ok(ApiMethod::Rest),
            "graphql" => Ok(ApiMethod::GraphQL),
            other => Err(format!("unknown API method {other:?}, expected \"rest\" or \"graphql\"")),
        }
    }
}
