//! Folder byte sizes and repository disk usage for GitHub repositories,
//! fetched through either the REST or the GraphQL API.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod path;
pub mod preview;
pub mod types;

pub use api::{ApiClient, GithubApi};
pub use error::{Error, Result};
pub use types::{ApiMethod, EntrySizeInfo, FolderSizeInfo, FolderSizeOptions, RepoEntryPath, RepoPath};
