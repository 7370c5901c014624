//! Language detection across registered providers

use super::{LanguageId, ProviderRegistry};
use crate::fs::FileSystem;
use std::path::Path;
use tracing::{debug, info, warn};

impl ProviderRegistry {
    /// Asks each provider in registration order whether it claims
    /// `project_path`; the first claim wins.
    ///
    /// A provider whose probe fails is logged and skipped. Returns `None`
    /// when no provider claims the directory.
    pub fn detect(&self, fs: &dyn FileSystem, project_path: &Path) -> Option<LanguageId> {
        for provider in self.providers() {
            match provider.detect_language(fs, project_path) {
                Ok(Some(language)) => {
                    info!(
                        language = %language,
                        path = %project_path.display(),
                        "Detected project language"
                    );
                    return Some(language);
                }
                Ok(None) => {
                    debug!(provider = %provider.id(), "Provider did not claim project");
                }
                Err(e) => {
                    warn!(provider = %provider.id(), error = %e, "Detection probe failed, continuing");
                }
            }
        }

        None
    }
}
