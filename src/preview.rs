//! Page-level entry points: take the URL being browsed, pick a backend from
//! the settings, and fetch sizes for the folder shown on that page.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};
use url::Url;

use crate::api::{ApiClient, GithubApi};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::types::{ApiMethod, FolderSizeInfo, FolderSizeOptions};

#[cfg(test)]
#[path = "preview_tests.rs"]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPreview {
    pub method: ApiMethod,
    /// Folder path relative to the repository root; empty for the root.
    pub folder: String,
    pub entries: FolderSizeInfo,
}

pub struct Previewer {
    settings: Settings,
    in_flight: Mutex<HashSet<String>>,
}

/// Removes its key from the in-flight set when dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

impl Previewer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn begin(&self, key: String) -> Result<InFlight<'_>> {
        let mut set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(key.clone()) {
            return Err(Error::AlreadyInFlight(key));
        }
        Ok(InFlight {
            set: &self.in_flight,
            key,
        })
    }

    /// Sizes of every entry in the folder shown at `page`.
    ///
    /// A second request for the same folder while one is running fails with
    /// [`Error::AlreadyInFlight`] instead of racing it.
    pub async fn preview_sizes(&self, page: &Url) -> Result<FolderPreview> {
        let api = ApiClient::from_settings(page, &self.settings)?;
        let folder = api
            .parse_entry_path(page)
            .ok_or_else(|| Error::NotARepository(page.to_string()))?;

        let repo = api.repo();
        let _guard = self.begin(format!(
            "{}/{}@{}:{}",
            repo.owner, repo.repo, repo.branch, folder
        ))?;

        let options = FolderSizeOptions::with_depth(self.settings.recursion_depth());
        match api.get_folder_size_info(&folder, options).await {
            Ok(entries) => {
                info!(folder = %folder, count = entries.len(), "fetched folder sizes");
                Ok(FolderPreview {
                    method: api.method(),
                    folder,
                    entries,
                })
            }
            Err(e) => {
                warn!(folder = %folder, error = %e, "failed to fetch folder sizes");
                Err(e)
            }
        }
    }

    /// Disk usage of the repository `page` belongs to, in bytes.
    pub async fn preview_diskspace(&self, page: &Url) -> Result<u64> {
        let api = ApiClient::from_settings(page, &self.settings)?;
        let repo = api.repo();
        let _guard = self.begin(format!("{}/{}#diskspace", repo.owner, repo.repo))?;

        api.get_diskspace().await.inspect_err(|e| {
            warn!(error = %e, "failed to fetch repository diskspace");
        })
    }
}
