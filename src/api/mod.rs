//! Folder sizes and disk usage of a GitHub repository, over either API.
//!
//! Both backends own the [`RepoPath`] of the page they were created for and
//! answer the same three questions through [`GithubApi`]. [`ApiClient`]
//! picks one of them from the configured [`ApiMethod`].

use async_trait::async_trait;
use url::Url;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::path::{entry_path_within, parse_repo_entry_path};
use crate::types::{ApiMethod, FolderSizeInfo, FolderSizeOptions, RepoPath};

pub mod client;
pub mod graphql;
pub mod query;
pub mod rest;

use graphql::GraphQLApi;
use rest::RestApi;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

#[async_trait]
pub trait GithubApi: Send + Sync {
    /// The repository this client was created for.
    fn repo(&self) -> &RepoPath;

    /// Entry path of `url`, if it lies in this client's repository and ref.
    fn parse_entry_path(&self, url: &Url) -> Option<String> {
        entry_path_within(self.repo(), url)
    }

    /// Byte size of every direct child of `folder_path`. Sub-folders fold in
    /// their descendants down to `options.recursion_depth` levels.
    async fn get_folder_size_info(
        &self,
        folder_path: &str,
        options: FolderSizeOptions,
    ) -> Result<FolderSizeInfo>;

    /// Total size of the repository in bytes.
    async fn get_diskspace(&self) -> Result<u64>;

    /// Archive download of selected entries. Not available on any backend.
    async fn fetch_entries_of_folder(
        &self,
        _folder_path: &str,
        _sub_entries: &[String],
    ) -> Result<Vec<u8>> {
        Err(Error::Unimplemented("fetch_entries_of_folder"))
    }
}

/// Derives the owned repository identity from a page URL.
pub(crate) fn repo_from_url(url: &Url) -> Result<RepoPath> {
    parse_repo_entry_path(url)
        .map(|entry| entry.repo_path())
        .ok_or_else(|| Error::NotARepository(url.to_string()))
}

pub enum ApiClient {
    Rest(RestApi),
    GraphQL(GraphQLApi),
}

impl ApiClient {
    pub fn from_settings(url: &Url, settings: &Settings) -> Result<Self> {
        let token = settings.github_token.clone();
        let client = match settings.api_method {
            ApiMethod::Rest => ApiClient::Rest(RestApi::new(url, token, settings)?),
            ApiMethod::GraphQL => ApiClient::GraphQL(GraphQLApi::new(
                url,
                token.unwrap_or_default(),
                settings,
            )?),
        };
        Ok(client)
    }

    pub fn method(&self) -> ApiMethod {
        match self {
            ApiClient::Rest(_) => ApiMethod::Rest,
            ApiClient::GraphQL(_) => ApiMethod::GraphQL,
        }
    }

    fn inner(&self) -> &dyn GithubApi {
        match self {
            ApiClient::Rest(api) => api,
            ApiClient::GraphQL(api) => api,
        }
    }
}

#[async_trait]
impl GithubApi for ApiClient {
    fn repo(&self) -> &RepoPath {
        self.inner().repo()
    }

    async fn get_folder_size_info(
        &self,
        folder_path: &str,
        options: FolderSizeOptions,
    ) -> Result<FolderSizeInfo> {
        self.inner().get_folder_size_info(folder_path, options).await
    }

    async fn get_diskspace(&self) -> Result<u64> {
        self.inner().get_diskspace().await
    }

    async fn fetch_entries_of_folder(
        &self,
        folder_path: &str,
        sub_entries: &[String],
    ) -> Result<Vec<u8>> {
        self.inner()
            .fetch_entries_of_folder(folder_path, sub_entries)
            .await
    }
}
