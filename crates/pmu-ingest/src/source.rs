//! Document sources: local directory tree or HTTP base URL.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::catalog::ProductEntry;
use crate::error::{IngestError, Result};

/// Upstream location of the telemetry-solution PMU descriptions.
pub const DEFAULT_BASE_URL: &str =
    "https://gitlab.arm.com/telemetry-solution/telemetry-solution/-/raw/main/data/pmu/cpu/";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where product documents come from.
pub trait DocumentSource {
    /// Human-readable location of the entry's document (path or URL).
    fn locate(&self, entry: &ProductEntry) -> String;

    /// Raw document bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`IngestError`] when the document is missing or unreachable.
    fn fetch(&self, entry: &ProductEntry) -> Result<Vec<u8>>;
}

/// Documents stored as `<root>/<family>/<document>`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, entry: &ProductEntry) -> PathBuf {
        self.root.join(&entry.family).join(&entry.document)
    }
}

impl DocumentSource for DirectorySource {
    fn locate(&self, entry: &ProductEntry) -> String {
        self.path_for(entry).display().to_string()
    }

    fn fetch(&self, entry: &ProductEntry) -> Result<Vec<u8>> {
        let path = self.path_for(entry);
        debug!(path = %path.display(), "reading document");
        std::fs::read(&path).map_err(|source| IngestError::FileRead { path, source })
    }
}

/// Documents served under `<base_url>/<family>/<document>`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    /// Create a source rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| IngestError::Client(err.to_string()))?;
        Ok(Self { base_url, client })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET one URL and return its body.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] on transport failure and
    /// [`IngestError::HttpStatus`] on a non-success response.
    pub fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!(%url, "fetching document");
        let http_error = |err: reqwest::Error| IngestError::Http {
            url: url.to_string(),
            message: err.to_string(),
        };
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("pmu-tables/", env!("CARGO_PKG_VERSION")))
            .send()
            .map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().map_err(http_error)?;
        Ok(body.to_vec())
    }
}

impl DocumentSource for HttpSource {
    fn locate(&self, entry: &ProductEntry) -> String {
        format!("{}{}/{}", self.base_url, entry.family, entry.document)
    }

    fn fetch(&self, entry: &ProductEntry) -> Result<Vec<u8>> {
        self.get(&self.locate(entry))
    }
}

/// Read a single document given as a local path or an `http(s)://` URL.
///
/// # Errors
///
/// Returns an [`IngestError`] when the document cannot be retrieved.
pub fn read_location(location: &str) -> Result<Vec<u8>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        HttpSource::new(location)?.get(location)
    } else {
        let path = PathBuf::from(location);
        std::fs::read(&path).map_err(|source| IngestError::FileRead { path, source })
    }
}
