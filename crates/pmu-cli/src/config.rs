//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is built once (defaults, then an optional TOML file,
//! then command-line overrides) and handed to the pipeline; nothing is read
//! from process-wide state afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use pmu_ingest::{
    DEFAULT_BASE_URL, DirectorySource, DocumentSource, HttpSource, IngestError, ProductCatalog,
    ProductEntry,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in assembling or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for this schema.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `--url` and `--file` were both given.
    #[error("'--url' and '--file' are mutually exclusive")]
    ConflictingSources,

    /// `--base-url` given while reading from a directory.
    #[error("'--base-url' only applies to URL input")]
    BaseUrlWithDirectory,

    /// `--source-root` given while reading over HTTP.
    #[error("'--source-root' only applies to directory input (use --file)")]
    SourceRootWithUrl,

    /// Directory input without a root directory.
    #[error("directory input requires a source root (use --source-root or [source] root)")]
    MissingSourceRoot,

    /// Catalog selection or source construction failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Result type for configuration handling.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Where product documents are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SourceConfig {
    /// HTTP base URL.
    Url {
        #[serde(default = "default_base_url")]
        base_url: String,
    },
    /// Local directory laid out as `<root>/<family>/<document>`.
    Directory {
        #[serde(default)]
        root: Option<PathBuf>,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Url {
            base_url: default_base_url(),
        }
    }
}

impl SourceConfig {
    /// Short label for logs and summaries.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Url { base_url } => base_url.clone(),
            Self::Directory { root: Some(root) } => root.display().to_string(),
            Self::Directory { root: None } => "<unset directory>".to_string(),
        }
    }
}

/// Everything the telemetry pipeline needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub catalog: ProductCatalog,
    /// Process only this product (name or document file name).
    pub cpu: Option<String>,
    /// File whose lines are emitted as a comment header.
    pub license: Option<PathBuf>,
    /// Output file; stdout when unset.
    pub output: Option<PathBuf>,
}

/// Command-line values layered over the file configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: bool,
    pub file: bool,
    pub source_root: Option<PathBuf>,
    pub base_url: Option<String>,
    pub cpu: Option<String>,
    pub output: Option<PathBuf>,
    pub license: Option<PathBuf>,
}

impl PipelineConfig {
    /// Parse TOML configuration text. `origin` names the text in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConflictingSources`] when both `--url` and
    /// `--file` are set, and [`ConfigError::BaseUrlWithDirectory`] or
    /// [`ConfigError::SourceRootWithUrl`] when a location flag does not match
    /// the resolved input mode.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if overrides.url && overrides.file {
            return Err(ConfigError::ConflictingSources);
        }
        if overrides.file && !matches!(self.source, SourceConfig::Directory { .. }) {
            self.source = SourceConfig::Directory { root: None };
        }
        if overrides.url && !matches!(self.source, SourceConfig::Url { .. }) {
            self.source = SourceConfig::default();
        }
        match &mut self.source {
            SourceConfig::Url { base_url } => {
                if overrides.source_root.is_some() {
                    return Err(ConfigError::SourceRootWithUrl);
                }
                if let Some(url) = overrides.base_url {
                    *base_url = url;
                }
            }
            SourceConfig::Directory { root } => {
                if overrides.base_url.is_some() {
                    return Err(ConfigError::BaseUrlWithDirectory);
                }
                if let Some(path) = overrides.source_root {
                    *root = Some(path);
                }
            }
        }
        if overrides.cpu.is_some() {
            self.cpu = overrides.cpu;
        }
        if overrides.output.is_some() {
            self.output = overrides.output;
        }
        if overrides.license.is_some() {
            self.license = overrides.license;
        }
        Ok(self)
    }

    /// Products to process, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Ingest`] when `cpu` names no catalog entry.
    pub fn entries(&self) -> Result<Vec<ProductEntry>> {
        Ok(self.catalog.select(self.cpu.as_deref())?)
    }

    /// Build the document source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSourceRoot`] for directory input without
    /// a root, or [`ConfigError::Ingest`] if the HTTP client cannot be built.
    pub fn document_source(&self) -> Result<Box<dyn DocumentSource>> {
        match &self.source {
            SourceConfig::Url { base_url } => Ok(Box::new(HttpSource::new(base_url.as_str())?)),
            SourceConfig::Directory { root: Some(root) } => {
                Ok(Box::new(DirectorySource::new(root.as_path())))
            }
            SourceConfig::Directory { root: None } => Err(ConfigError::MissingSourceRoot),
        }
    }

    /// Check everything that can be checked before processing starts.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.source, SourceConfig::Directory { root: None }) {
            return Err(ConfigError::MissingSourceRoot);
        }
        self.entries().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.source,
            SourceConfig::Url {
                base_url: DEFAULT_BASE_URL.to_string()
            }
        );
        assert_eq!(config.entries().unwrap().len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_conflicting_flags() {
        let overrides = ConfigOverrides {
            url: true,
            file: true,
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            PipelineConfig::default().with_overrides(overrides),
            Err(ConfigError::ConflictingSources)
        ));
    }

    #[test]
    fn test_file_flag_requires_root() {
        let overrides = ConfigOverrides {
            file: true,
            ..ConfigOverrides::default()
        };
        let config = PipelineConfig::default().with_overrides(overrides).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSourceRoot)
        ));
    }

    #[test]
    fn test_file_flag_with_root() {
        let overrides = ConfigOverrides {
            file: true,
            source_root: Some(PathBuf::from("data/pmu/cpu")),
            cpu: Some("neoverse-v2".to_string()),
            ..ConfigOverrides::default()
        };
        let config = PipelineConfig::default().with_overrides(overrides).unwrap();
        assert_eq!(
            config.source,
            SourceConfig::Directory {
                root: Some(PathBuf::from("data/pmu/cpu"))
            }
        );
        assert_eq!(config.entries().unwrap()[0].product, "neoverse-v2");
    }

    #[test]
    fn test_base_url_rejected_for_directory_input() {
        let overrides = ConfigOverrides {
            file: true,
            source_root: Some(PathBuf::from("data/pmu/cpu")),
            base_url: Some("https://mirror.example.com/pmu/".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            PipelineConfig::default().with_overrides(overrides),
            Err(ConfigError::BaseUrlWithDirectory)
        ));
    }

    #[test]
    fn test_source_root_rejected_for_url_input() {
        let overrides = ConfigOverrides {
            source_root: Some(PathBuf::from("data/pmu/cpu")),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            PipelineConfig::default().with_overrides(overrides),
            Err(ConfigError::SourceRootWithUrl)
        ));

        let directory = PipelineConfig {
            source: SourceConfig::Directory {
                root: Some(PathBuf::from("local")),
            },
            ..PipelineConfig::default()
        };
        let overrides = ConfigOverrides {
            url: true,
            source_root: Some(PathBuf::from("data/pmu/cpu")),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            directory.with_overrides(overrides),
            Err(ConfigError::SourceRootWithUrl)
        ));
    }

    #[test]
    fn test_unknown_cpu_is_rejected() {
        let overrides = ConfigOverrides {
            cpu: Some("cortex-x4".to_string()),
            ..ConfigOverrides::default()
        };
        let config = PipelineConfig::default().with_overrides(overrides).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown product 'cortex-x4' (not in the catalog)"
        );
    }
}
