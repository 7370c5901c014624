use super::{CiProvider, DeclarativeProvider, LanguageId, ProviderRegistry};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A provider file that could not be turned into a provider.
#[derive(Debug, Error)]
pub enum ProviderLoadError {
    #[error("providers directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid provider in {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

impl ProviderLoadError {
    /// File the failure refers to, used as the provider name in messages.
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryNotFound(path) => path,
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path,
        }
    }
}

/// Outcome of loading a providers directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LanguageId>,
    pub errors: Vec<ProviderLoadError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct ProviderLoader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ProviderLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Registers every `*.yml`/`*.yaml` provider in `dir`, in file-name
    /// order. Broken files are reported and skipped.
    pub fn load_dir(&self, dir: &Path, registry: &mut ProviderRegistry) -> LoadReport {
        let mut report = LoadReport::default();

        let entries = match self.fs.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                let error = ProviderLoadError::DirectoryNotFound(dir.to_path_buf());
                warn!(error = %error, cause = %e, "Skipping provider directory");
                report.errors.push(error);
                return report;
            }
        };

        for entry in entries {
            if !entry.is_file() || !is_provider_file(entry.path()) {
                continue;
            }

            match self.load_file(entry.path()) {
                Ok(provider) => {
                    let id = provider.id();
                    registry.register(Arc::new(provider));
                    info!(language = %id, file = %entry.path().display(), "Loaded provider");
                    report.loaded.push(id);
                }
                Err(error) => {
                    warn!(error = %error, "Skipping provider file");
                    report.errors.push(error);
                }
            }
        }

        report
    }

    pub fn load_file(&self, path: &Path) -> Result<DeclarativeProvider, ProviderLoadError> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ProviderLoadError::Read {
                path: path.to_path_buf(),
                message: format!("{:#}", e),
            })?;

        let provider =
            DeclarativeProvider::from_yaml(&content).map_err(|source| ProviderLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        provider
            .validate()
            .map_err(|message| ProviderLoadError::Invalid {
                path: path.to_path_buf(),
                message,
            })?;

        Ok(provider)
    }
}

fn is_provider_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}
