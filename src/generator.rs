//! Workflow generation: resolve the provider, infer tooling, render, write.

use crate::fs::FileSystem;
use crate::provider::{LanguageId, ProviderRegistry};
use crate::workflow::RenderError;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const WORKFLOW_FILE_NAME: &str = "main.yml";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no language given and no project to detect it from")]
    MissingLanguage,

    #[error("project path does not exist or is not a directory: {0}")]
    ProjectNotFound(PathBuf),

    #[error("could not detect language from project {0}")]
    LanguageDetection(PathBuf),

    #[error("language {0} not supported")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    /// Errors caused by how the tool was invoked rather than by the project.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingLanguage)
    }
}

/// One generation request, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub project: Option<PathBuf>,
    pub language: Option<String>,
    pub test: Option<String>,
    pub linter: Option<String>,
    pub output: Option<PathBuf>,
}

impl GenerateRequest {
    /// `<output>/main.yml`, or `<project or .>/.github/workflows/main.yml`.
    pub fn output_path(&self) -> PathBuf {
        let dir = match &self.output {
            Some(dir) => dir.clone(),
            None => self
                .project
                .clone()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".github")
                .join("workflows"),
        };
        dir.join(WORKFLOW_FILE_NAME)
    }
}

/// A rendered document and the parameters it was rendered from.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedWorkflow {
    pub language: LanguageId,
    pub test: Option<String>,
    pub linter: Option<String>,
    pub content: String,
}

pub struct WorkflowGenerator<'a> {
    registry: &'a ProviderRegistry,
    fs: &'a dyn FileSystem,
}

impl<'a> WorkflowGenerator<'a> {
    pub fn new(registry: &'a ProviderRegistry, fs: &'a dyn FileSystem) -> Self {
        Self { registry, fs }
    }

    /// Resolves the language and tooling for `request` and renders the
    /// document. Nothing is written.
    ///
    /// With a project, the detected language wins over an explicit one,
    /// which is only used when detection finds nothing. Explicit test and
    /// linter values override inferred ones.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GeneratedWorkflow, GenerateError> {
        let explicit = request
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(LanguageId::parse);

        let language = match (&request.project, explicit) {
            (Some(project), explicit) => {
                if !self.fs.is_dir(project) {
                    return Err(GenerateError::ProjectNotFound(project.clone()));
                }
                match (self.registry.detect(self.fs, project), explicit) {
                    (Some(detected), Some(explicit)) if detected != explicit => {
                        info!(detected = %detected, requested = %explicit, "Detected language overrides --language");
                        detected
                    }
                    (Some(detected), _) => detected,
                    (None, Some(explicit)) => explicit,
                    (None, None) => return Err(GenerateError::LanguageDetection(project.clone())),
                }
            }
            (None, Some(explicit)) => explicit,
            (None, None) => return Err(GenerateError::MissingLanguage),
        };

        let provider = self
            .registry
            .get(&language)
            .ok_or_else(|| GenerateError::UnsupportedLanguage(language.key().to_string()))?;

        let inferred = match &request.project {
            Some(project) => provider.get_dependencies(self.fs, project),
            None => Default::default(),
        };
        let test = non_blank(&request.test).or(inferred.test);
        let linter = non_blank(&request.linter).or(inferred.linter);
        debug!(language = %language, test = ?test, linter = ?linter, "Resolved render context");

        let content = provider.generate_workflow(&language, test.as_deref(), linter.as_deref())?;

        Ok(GeneratedWorkflow {
            language,
            test,
            linter,
            content,
        })
    }

    /// Renders and writes the document to the request's output path.
    pub fn generate_to_file(&self, request: &GenerateRequest) -> Result<PathBuf, GenerateError> {
        let generated = self.generate(request)?;
        let path = request.output_path();
        write_workflow(&path, &generated.content)?;
        Ok(path)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Writes `content` to `path` through a temporary file in the same
/// directory, creating directories as needed. An existing file is replaced.
pub fn write_workflow(path: &Path, content: &str) -> Result<(), GenerateError> {
    let write_error = |source: io::Error| GenerateError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(write_error)?;

    // Same mode a plain create would give; an existing file keeps its own.
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(&dir).map_err(write_error)?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_error)?;
    }
    tmp.write_all(content.as_bytes()).map_err(write_error)?;
    tmp.flush().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    info!(path = %path.display(), bytes = content.len(), "Wrote workflow file");
    Ok(())
}
