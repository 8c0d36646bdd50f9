use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};

pub const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
pub const ACCEPT_GITHUB_OBJECT: &str = "application/vnd.github.object";

/// Thin HTTP layer shared by the REST and GraphQL backends.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        if token.as_deref().is_some_and(|t| !t.is_empty()) {
            info!("Using authenticated GitHub API requests");
        } else {
            info!("Using unauthenticated GitHub API requests, rate limits will be low");
        }

        let mut builder = Client::builder().user_agent("github-aid");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            token,
        })
    }

    /// With `always_authorize`, an absent token is sent as an empty bearer
    /// value; otherwise the header is omitted entirely.
    fn build_headers(&self, accept: &'static str, always_authorize: bool) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(accept));

        let token = match (&self.token, always_authorize) {
            (Some(token), _) => Some(token.as_str()),
            (None, true) => Some(""),
            (None, false) => None,
        };
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("bearer {}", token))
                    .map_err(|_| Error::InvalidToken)?,
            );
        }

        Ok(headers)
    }

    pub async fn get(&self, url: &Url, accept: &'static str) -> Result<Response> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .headers(self.build_headers(accept, false)?)
            .send()
            .await?;
        check_rate_limit(&response)?;
        Ok(response)
    }

    /// Decodes the body whatever the status; callers inspect the fields
    /// to tell a missing object apart from a real one.
    pub async fn get_json<T>(&self, url: &Url, accept: &'static str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.get(url, accept).await?;
        read_json(url, response).await
    }

    pub async fn post_graphql<B, T>(&self, url: &Url, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        let response = self
            .client
            .post(url.clone())
            .headers(self.build_headers(ACCEPT_GITHUB_JSON, true)?)
            .json(body)
            .send()
            .await?;
        check_rate_limit(&response)?;
        read_json(url, response).await
    }
}

pub async fn read_json<T>(url: &Url, response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    response
        .json::<T>()
        .await
        .map_err(|e| Error::ParseError(format!("{}: {}", url, e)))
}

fn check_rate_limit(response: &Response) -> Result<()> {
    let status = response.status();
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return Ok(());
    }

    let header_u64 = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    };

    if header_u64("x-ratelimit-remaining") == Some(0) {
        let reset = header_u64("x-ratelimit-reset").unwrap_or(0);
        warn!(reset, "GitHub API rate limit exhausted");
        return Err(Error::RateLimitError(reset));
    }
    Ok(())
}
