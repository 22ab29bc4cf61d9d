//! SpaceX API client: launches and launchpads, remote or from local files

use crate::error::{Error, Result};
use crate::launches::Launch;
use crate::site::LaunchSite;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.spacexdata.com/v4";

/// Both datasets the map needs; only built once both arrived
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub launches: Vec<Launch>,
    pub launchpads: Vec<LaunchSite>,
}

#[derive(Clone, Debug)]
pub struct SpaceX {
    base_url: String,
    timeout: Duration,
    launches_file: Option<PathBuf>,
    launchpads_file: Option<PathBuf>,
}

impl Default for SpaceX {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(10))
    }
}

impl SpaceX {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            launches_file: None,
            launchpads_file: None,
        }
    }

    /// Read launches from a file instead of the API
    pub fn with_launches_file(mut self, path: Option<PathBuf>) -> Self {
        self.launches_file = path;
        self
    }

    /// Read launchpads from a file instead of the API
    pub fn with_launchpads_file(mut self, path: Option<PathBuf>) -> Self {
        self.launchpads_file = path;
        self
    }

    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    pub fn launches(&self) -> Result<Vec<Launch>> {
        match &self.launches_file {
            Some(path) => read_json_file(path),
            None => self.get_json("launches"),
        }
    }

    pub fn launchpads(&self) -> Result<Vec<LaunchSite>> {
        match &self.launchpads_file {
            Some(path) => read_json_file(path),
            None => self.get_json("launchpads"),
        }
    }

    /// Fetch both datasets concurrently and wait for both
    pub fn fetch_all(&self) -> Result<Dataset> {
        std::thread::scope(|scope| {
            let launches = scope.spawn(|| self.launches());
            let launchpads = self.launchpads();
            let launches = launches
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

            let dataset = Dataset {
                launches: launches?,
                launchpads: launchpads?,
            };
            tracing::info!(
                launches = dataset.launches.len(),
                launchpads = dataset.launchpads.len(),
                "fetched data"
            );
            Ok(dataset)
        })
    }

    fn get_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let url = self.endpoint(name);
        tracing::debug!(%url, "GET");
        let response = ureq::get(&url)
            .timeout(self.timeout)
            .call()
            .map_err(|source| Error::Http {
                url: url.clone(),
                source: Box::new(source),
            })?;
        serde_json::from_reader(response.into_reader())
            .map_err(|source| Error::Json { origin: url, source })
    }
}

/// Deserialize a JSON file in the API's schema
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading local data");
    serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json {
        origin: path.display().to_string(),
        source,
    })
}
