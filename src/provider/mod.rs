//! Language providers and the registry that resolves them.
//!
//! A provider claims a project directory by its signal files, infers the
//! test framework and linter already configured in its manifests, and
//! renders a workflow for its ecosystem. Built-in providers are registered
//! from a static table; more can be loaded from declarative provider files.
//!
//! # Example
//!
//! ```no_run
//! use workflow_gen::fs::RealFileSystem;
//! use workflow_gen::provider::ProviderRegistry;
//! use std::path::Path;
//!
//! let registry = ProviderRegistry::with_defaults();
//! let fs = RealFileSystem::new();
//! let project = Path::new(".");
//!
//! if let Some(language) = registry.detect(&fs, project) {
//!     let provider = registry.get(&language).unwrap();
//!     let deps = provider.get_dependencies(&fs, project);
//!     let yaml = provider
//!         .generate_workflow(&language, deps.test.as_deref(), deps.linter.as_deref())
//!         .unwrap();
//!     println!("{}", yaml);
//! }
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod declarative;
pub mod detection;
pub mod java;
pub mod language_id;
pub mod loader;
pub mod nodejs;
pub mod python;
pub mod registry;

pub use declarative::DeclarativeProvider;
pub use java::JavaProvider;
pub use language_id::LanguageId;
pub use loader::{LoadReport, ProviderLoadError, ProviderLoader};
pub use nodejs::NodeJsProvider;
pub use python::PythonProvider;
pub use registry::ProviderRegistry;

use crate::fs::FileSystem;
use crate::workflow::{self, PipelineSteps, RenderContext, RenderError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failure of a detection probe.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("project path is not a readable directory: {0}")]
    NotADirectory(String),

    #[error("detection probe failed: {0}")]
    Probe(String),
}

/// Test framework and linter inferred from a project's manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyInfo {
    pub test: Option<String>,
    pub linter: Option<String>,
}

impl DependencyInfo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(test: Option<&str>, linter: Option<&str>) -> Self {
        Self {
            test: test.map(str::to_string),
            linter: linter.map(str::to_string),
        }
    }
}

/// The contract every language provider implements.
pub trait CiProvider: Send + Sync {
    /// Registry key of this provider
    fn id(&self) -> LanguageId;

    /// Human-readable ecosystem name
    fn display_name(&self) -> String {
        self.id().display_name()
    }

    /// Signal files whose presence claims a project directory
    fn manifest_files(&self) -> Vec<String>;

    /// Toolchain version pinned in the setup step
    fn default_version(&self) -> String;

    /// Returns this provider's key when any signal file exists directly
    /// under `project_path`. Never writes to the filesystem.
    fn detect_language(
        &self,
        fs: &dyn FileSystem,
        project_path: &Path,
    ) -> Result<Option<LanguageId>, ProviderError> {
        if !fs.is_dir(project_path) {
            return Err(ProviderError::NotADirectory(
                project_path.display().to_string(),
            ));
        }

        let found = self
            .manifest_files()
            .iter()
            .any(|name| fs.is_file(&fs.join(project_path, name)));

        Ok(found.then(|| self.id()))
    }

    /// Infers the configured test framework and linter from manifest
    /// contents. Missing or malformed manifests leave fields absent.
    fn get_dependencies(&self, fs: &dyn FileSystem, project_path: &Path) -> DependencyInfo;

    /// Language-specific steps for the shared template.
    fn pipeline(&self, ctx: &RenderContext) -> PipelineSteps;

    /// Renders the workflow document. Deterministic for identical input.
    fn generate_workflow(
        &self,
        language: &LanguageId,
        test: Option<&str>,
        linter: Option<&str>,
    ) -> Result<String, RenderError> {
        let ctx = RenderContext::new(language.clone(), self.default_version(), test, linter);
        workflow::render(&ctx, self.pipeline(&ctx))
    }
}

/// Reads a manifest, logging and swallowing read failures.
pub(crate) fn read_manifest(
    fs: &dyn FileSystem,
    project_path: &Path,
    name: &str,
) -> Option<String> {
    let path = fs.join(project_path, name);
    if !fs.is_file(&path) {
        return None;
    }

    match fs.read_to_string(&path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::warn!(manifest = %path.display(), error = %e, "Could not read manifest");
            None
        }
    }
}
