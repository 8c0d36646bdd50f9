//! Errors raised while talking to the GitHub REST and GraphQL APIs.

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

/// Everything that can go wrong between a page URL and a size figure.
///
/// Parse failures of a page URL are not errors: the parser returns `None`
/// and callers decide what to do. Variants here are fatal to the current call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL does not point inside a repository (no owner/repo), or the
    /// entry path belongs to a different repository or branch.
    #[error("Not a repository path: {0}")]
    NotARepository(String),

    /// Phase one of the REST walk returned no SHA1 for the folder.
    #[error("failed to fetch the SHA1 of folder {folder:?}{}", remote_message(.message))]
    MissingSha {
        folder: String,
        message: Option<String>,
    },

    /// Phase two of the REST walk returned a body without a `tree` array.
    #[error("failed to fetch the git tree of folder {folder:?} (sha: {sha}) in the expected format")]
    MalformedTree { folder: String, sha: String },

    #[error("repository metadata did not contain a finite size for {owner}/{repo}")]
    InvalidDiskspace { owner: String, repo: String },

    /// The GraphQL endpoint answered with a non-empty `errors` array.
    #[error("encountered GraphQL query errors:\n\t{0}")]
    GraphQL(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    /// Contains the reset timestamp reported by the API.
    #[error("Rate limit exceeded. Resets at timestamp: {0}")]
    RateLimitError(u64),

    #[error("authentication token cannot be sent as an HTTP header")]
    InvalidToken,

    #[error("{0} is not implemented")]
    Unimplemented(&'static str),

    #[error("a size request for {0:?} is already in flight")]
    AlreadyInFlight(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

fn remote_message(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" (GitHub says: {message})"),
        None => String::new(),
    }
}
