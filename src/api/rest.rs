//! REST backend: resolve the folder's SHA1, fetch its git tree, then fold
//! every tree entry into its top-level ancestor.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::client::{read_json, GithubClient, ACCEPT_GITHUB_JSON, ACCEPT_GITHUB_OBJECT};
use super::{repo_from_url, GithubApi};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::path::remove_leading_slash;
use crate::types::github::{GithubContentObject, GithubRepository, GithubTree, GithubTreeEntry};
use crate::types::{EntrySizeInfo, FolderSizeInfo, FolderSizeOptions, RepoPath};

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;

pub struct RestApi {
    repo: RepoPath,
    client: GithubClient,
    endpoint: Url,
}

impl RestApi {
    /// `url` is any page inside the repository; only owner, repo and branch are kept.
    pub fn new(url: &Url, token: Option<String>, settings: &Settings) -> Result<Self> {
        Ok(Self {
            repo: repo_from_url(url)?,
            client: GithubClient::new(token, settings.timeout())?,
            endpoint: Url::parse(&settings.rest_endpoint)?,
        })
    }

    fn repo_url<'a>(&self, tail: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::ParseError(format!("{} cannot be a base URL", self.endpoint)))?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.repo.as_str()])
            .extend(tail.into_iter().filter(|s| !s.is_empty()));
        Ok(url)
    }

    async fn fetch_folder_sha(&self, folder_path: &str) -> Result<String> {
        let mut url = self.repo_url(["contents"].into_iter().chain(folder_path.split('/')))?;
        url.query_pairs_mut().append_pair("ref", &self.repo.branch);

        let object: GithubContentObject = self.get_lenient(&url, ACCEPT_GITHUB_OBJECT).await?;
        match object.sha {
            Some(sha) if !sha.is_empty() => Ok(sha),
            _ => Err(Error::MissingSha {
                folder: folder_path.to_string(),
                message: object.message,
            }),
        }
    }

    async fn fetch_tree(&self, folder_path: &str, sha: &str, recursive: bool) -> Result<Vec<GithubTreeEntry>> {
        let mut url = self.repo_url(["git", "trees", sha])?;
        if recursive {
            url.query_pairs_mut().append_pair("recursive", "true");
        }

        let tree: GithubTree = self.get_lenient(&url, ACCEPT_GITHUB_JSON).await?;
        if tree.truncated {
            warn!(folder = folder_path, sha, "git tree was truncated by GitHub, sizes are incomplete");
        }
        tree.tree.ok_or_else(|| Error::MalformedTree {
            folder: folder_path.to_string(),
            sha: sha.to_string(),
        })
    }

    /// Any JSON body decodes; fields that do not fit are left empty so that
    /// the caller can report which piece was missing.
    async fn get_lenient<T>(&self, url: &Url, accept: &'static str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let value: serde_json::Value = self.client.get_json(url, accept).await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

#[async_trait]
impl GithubApi for RestApi {
    fn repo(&self) -> &RepoPath {
        &self.repo
    }

    async fn get_folder_size_info(
        &self,
        folder_path: &str,
        options: FolderSizeOptions,
    ) -> Result<FolderSizeInfo> {
        let folder_path = remove_leading_slash(folder_path).trim_end_matches('/');
        let depth = options.depth();
        // The trees endpoint is either flat or the full subtree.
        let recursive = depth > 1;
        if recursive {
            warn!(
                folder = folder_path,
                depth, "REST API cannot limit recursion depth, fetching the whole subtree"
            );
        }

        let sha = self.fetch_folder_sha(folder_path).await?;
        debug!(folder = folder_path, %sha, "resolved folder SHA1");
        let entries = self.fetch_tree(folder_path, &sha, recursive).await?;
        Ok(aggregate_tree_sizes(&entries))
    }

    async fn get_diskspace(&self) -> Result<u64> {
        let url = self.repo_url(std::iter::empty::<&str>())?;
        let response = self.client.get(&url, ACCEPT_GITHUB_JSON).await?;
        let repository: GithubRepository = if response.status().is_success() {
            read_json(&url, response).await?
        } else {
            debug!(status = %response.status(), "repository metadata request failed");
            GithubRepository::default()
        };

        match repository.size {
            Some(kilobytes) if kilobytes.is_finite() && kilobytes >= 0.0 => {
                Ok((kilobytes * 1024.0) as u64)
            }
            _ => Err(Error::InvalidDiskspace {
                owner: self.repo.owner.clone(),
                repo: self.repo.repo.clone(),
            }),
        }
    }
}

/// Sums every entry's size into the first segment of its path, so that
/// `a/b/c.txt` counts towards `a`. `tree` entries always add 0; their
/// contents are counted through their own blob entries.
/// Names keep the order in which they first appear.
pub fn aggregate_tree_sizes(entries: &[GithubTreeEntry]) -> FolderSizeInfo {
    let mut totals: FolderSizeInfo = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let name = entry.path.split('/').next().unwrap_or_default();
        let size = match entry.entry_type.as_deref() {
            Some("tree") => 0,
            _ => entry.size.unwrap_or(0),
        };
        match index.get(name) {
            Some(&i) => totals[i].size += size,
            None => {
                index.insert(name, totals.len());
                totals.push(EntrySizeInfo {
                    name: name.to_string(),
                    size,
                });
            }
        }
    }

    totals
}
