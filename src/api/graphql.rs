//! GraphQL backend: one nested query per folder, summed up client side.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use super::client::GithubClient;
use super::query::{create_diskspace_query, create_recursive_query};
use super::{repo_from_url, GithubApi};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::path::remove_leading_slash;
use crate::types::github::{
    GraphQLDiskspaceData, GraphQLEntry, GraphQLFolderData, GraphQLRequest, GraphQLResponse,
};
use crate::types::{EntrySizeInfo, FolderSizeInfo, FolderSizeOptions, RepoPath};

#[cfg(test)]
#[path = "graphql_tests.rs"]
mod tests;

#[derive(Serialize)]
struct FolderVariables<'a> {
    owner: &'a str,
    repo: &'a str,
    branch_colon_path: String,
}

#[derive(Serialize)]
struct RepoVariables<'a> {
    owner: &'a str,
    repo: &'a str,
}

pub struct GraphQLApi {
    repo: RepoPath,
    client: GithubClient,
    endpoint: Url,
}

impl GraphQLApi {
    /// The GraphQL endpoint refuses anonymous queries, so a token is always
    /// sent. An empty one still goes out as `bearer `.
    pub fn new(url: &Url, token: String, settings: &Settings) -> Result<Self> {
        let token = (!token.is_empty()).then_some(token);
        Ok(Self {
            repo: repo_from_url(url)?,
            client: GithubClient::new(token, settings.timeout())?,
            endpoint: Url::parse(&settings.graphql_endpoint)?,
        })
    }

    async fn query<V, T>(&self, query: &str, variables: V) -> Result<T>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let request = GraphQLRequest { query, variables };
        let response: GraphQLResponse<T> = self.client.post_graphql(&self.endpoint, &request).await?;

        // Even an empty `errors` array means the query was not answered cleanly.
        if let Some(errors) = response.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GraphQL(messages.join("\n\t")));
        }
        response
            .data
            .ok_or_else(|| Error::ParseError("GraphQL response carried neither data nor errors".into()))
    }
}

#[async_trait]
impl GithubApi for GraphQLApi {
    fn repo(&self) -> &RepoPath {
        &self.repo
    }

    async fn get_folder_size_info(
        &self,
        folder_path: &str,
        options: FolderSizeOptions,
    ) -> Result<FolderSizeInfo> {
        let branch_colon_path = format!("{}:{}", self.repo.branch, remove_leading_slash(folder_path));
        debug!(%branch_colon_path, depth = options.depth(), "querying folder sizes");

        let query = create_recursive_query(options.depth());
        let variables = FolderVariables {
            owner: &self.repo.owner,
            repo: &self.repo.repo,
            branch_colon_path: branch_colon_path.clone(),
        };
        let data: GraphQLFolderData = self.query(&query, variables).await?;

        let entries = data
            .repository
            .and_then(|repository| repository.object)
            .and_then(|object| object.entries)
            .ok_or_else(|| {
                Error::ParseError(format!(
                    "no folder entries found at {:?} in {}/{}",
                    branch_colon_path, self.repo.owner, self.repo.repo
                ))
            })?;

        Ok(entries
            .iter()
            .map(|entry| EntrySizeInfo {
                name: entry.name.clone(),
                size: sum_entry_bytesizes(entry),
            })
            .collect())
    }

    async fn get_diskspace(&self) -> Result<u64> {
        let variables = RepoVariables {
            owner: &self.repo.owner,
            repo: &self.repo.repo,
        };
        let data: GraphQLDiskspaceData = self.query(&create_diskspace_query(), variables).await?;

        data.repository
            .and_then(|repository| repository.disk_usage)
            .map(|kilobytes| kilobytes * 1024)
            .ok_or_else(|| Error::InvalidDiskspace {
                owner: self.repo.owner.clone(),
                repo: self.repo.repo.clone(),
            })
    }
}

/// A blob counts its own `byteSize`; a tree counts the sum of its entries.
/// Entries below the queried depth come back empty and count as 0.
pub fn sum_entry_bytesizes(entry: &GraphQLEntry) -> u64 {
    let Some(object) = &entry.object else {
        return 0;
    };
    let own = object.byte_size.unwrap_or(0);
    let children: u64 = object
        .entries
        .iter()
        .flatten()
        .map(sum_entry_bytesizes)
        .sum();
    own + children
}
