use serde::{Deserialize, Serialize};

/// `GET /repos/{owner}/{repo}/contents/{path}` with the object media type.
///
/// Only the SHA1 is needed; a 404 body carries `message` instead.
#[derive(Debug, Default, Deserialize)]
pub struct GithubContentObject {
    pub sha: Option<String>,
    pub message: Option<String>,
}

/// `GET /repos/{owner}/{repo}/git/trees/{sha}`
#[derive(Debug, Default, Deserialize)]
pub struct GithubTree {
    pub tree: Option<Vec<GithubTreeEntry>>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub struct GithubTreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    /// Absent for `tree` and `commit` (submodule) entries.
    pub size: Option<u64>,
}

/// `GET /repos/{owner}/{repo}`. `size` is in kilobytes.
#[derive(Debug, Default, Deserialize)]
pub struct GithubRepository {
    pub size: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct GraphQLRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLFolderData {
    pub repository: Option<GraphQLFolderRepository>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLFolderRepository {
    pub object: Option<GraphQLObject>,
}

/// A `Tree` (has `entries`) or a `Blob` (has `byteSize`). Below the
/// deepest requested level both fields are absent.
#[derive(Debug, Default, Deserialize)]
pub struct GraphQLObject {
    #[serde(rename = "byteSize")]
    pub byte_size: Option<u64>,
    pub entries: Option<Vec<GraphQLEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLEntry {
    pub name: String,
    pub object: Option<GraphQLObject>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLDiskspaceData {
    pub repository: Option<GraphQLDiskspaceRepository>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLDiskspaceRepository {
    /// Kilobytes.
    #[serde(rename = "diskUsage")]
    pub disk_usage: Option<u64>,
}
