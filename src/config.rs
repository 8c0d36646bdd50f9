//! User preferences: which API to call, how deep to fold folder sizes,
//! and the token to authenticate with.
//!
//! Settings are read from a TOML file; every key is optional.
//!
//! ```toml
//! api_method = "graphql"
//! recursion_limit = 3
//! github_token = "ghp_..."
//! ```

use std::{env, fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ApiMethod;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

pub const DEFAULT_REST_ENDPOINT: &str = "https://api.github.com";
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_RECURSION_LIMIT: u32 = 7;
pub const MAX_RECURSION_LIMIT: u32 = 16;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const TOKEN_LENGTH: usize = 40;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub github_token: Option<String>,
    pub api_method: ApiMethod,
    pub recursion_limit: u32,
    pub rest_endpoint: String,
    pub graphql_endpoint: String,
    /// `None` waits forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            github_token: None,
            api_method: ApiMethod::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            rest_endpoint: DEFAULT_REST_ENDPOINT.to_string(),
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            request_timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading settings from {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {:?}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Fills in `GITHUB_TOKEN` from the environment when no token is configured.
    pub fn with_env(mut self) -> Self {
        if self.github_token.is_none() {
            self.github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        }
        self
    }

    pub fn recursion_depth(&self) -> u32 {
        clamp_recursion_depth(self.recursion_limit)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Keeps a requested depth within `1..=MAX_RECURSION_LIMIT`.
pub fn clamp_recursion_depth(depth: u32) -> u32 {
    depth.clamp(1, MAX_RECURSION_LIMIT)
}

/// Personal access tokens are 40 characters long. Only the command line
/// warns about other lengths; the API clients send whatever they are given.
pub fn token_has_expected_length(token: &str) -> bool {
    token.len() == TOKEN_LENGTH
}
