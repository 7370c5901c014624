//! Data-only providers described in YAML files
//!
//! ```yaml
//! language: rust
//! display_name: Rust
//! version: stable
//! detect: [Cargo.toml]
//! setup:
//!   uses: dtolnay/rust-toolchain@stable
//!   with:
//!     toolchain: "{version}"
//! install:
//!   - cargo fetch
//! dependencies:
//!   manifest: Cargo.toml
//!   test:
//!     cargo-nextest: nextest
//! lint:
//!   clippy: cargo clippy -- -D warnings
//! test:
//!   nextest: cargo nextest run
//!   default: cargo test
//! ```
//!
//! `{version}` is substituted in setup inputs and `{tool}` in lint and test
//! commands. A command map without an entry for the tool falls back to its
//! `default` entry, then to running the tool by name.

use super::{read_manifest, CiProvider, DependencyInfo, LanguageId};
use crate::fs::FileSystem;
use crate::workflow::{PipelineSteps, RenderContext, Step};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const DEFAULT_KEY: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarativeProvider {
    pub language: LanguageId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    pub detect: Vec<String>,
    pub setup: SetupAction,
    #[serde(default)]
    pub install: Vec<String>,
    #[serde(default)]
    pub dependencies: Option<DependencyRules>,
    #[serde(default)]
    pub lint: IndexMap<String, String>,
    #[serde(default)]
    pub test: IndexMap<String, String>,
}

fn default_version() -> String {
    "latest".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupAction {
    #[serde(default)]
    pub name: Option<String>,
    pub uses: String,
    #[serde(default)]
    pub with: IndexMap<String, String>,
}

/// Substring rules over one manifest: the first matching needle names the
/// tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyRules {
    pub manifest: String,
    #[serde(default)]
    pub test: IndexMap<String, String>,
    #[serde(default)]
    pub linter: IndexMap<String, String>,
}

impl DeclarativeProvider {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Checks fields serde cannot: non-empty key, signals and setup action.
    pub fn validate(&self) -> Result<(), String> {
        if self.language.key().trim().is_empty() {
            return Err("'language' must not be empty".to_string());
        }
        if self.detect.iter().all(|f| f.trim().is_empty()) {
            return Err("'detect' must list at least one file".to_string());
        }
        if self.setup.uses.trim().is_empty() {
            return Err("'setup.uses' must not be empty".to_string());
        }
        if let Some(rules) = &self.dependencies {
            if rules.manifest.trim().is_empty() {
                return Err("'dependencies.manifest' must not be empty".to_string());
            }
        }
        Ok(())
    }

    fn command_for(commands: &IndexMap<String, String>, tool: &str) -> String {
        commands
            .get(tool)
            .or_else(|| commands.get(DEFAULT_KEY))
            .map(|command| command.replace("{tool}", tool))
            .unwrap_or_else(|| tool.to_string())
    }
}

fn first_match(rules: &IndexMap<String, String>, content: &str) -> Option<String> {
    rules
        .iter()
        .find(|(needle, _)| content.contains(needle.as_str()))
        .map(|(_, tool)| tool.clone())
}

impl CiProvider for DeclarativeProvider {
    fn id(&self) -> LanguageId {
        self.language.clone()
    }

    fn display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.language.display_name())
    }

    fn manifest_files(&self) -> Vec<String> {
        self.detect.clone()
    }

    fn default_version(&self) -> String {
        self.version.clone()
    }

    fn get_dependencies(&self, fs: &dyn FileSystem, project_path: &Path) -> DependencyInfo {
        let Some(rules) = &self.dependencies else {
            return DependencyInfo::empty();
        };
        let Some(content) = read_manifest(fs, project_path, &rules.manifest) else {
            return DependencyInfo::empty();
        };

        let info = DependencyInfo {
            test: first_match(&rules.test, &content),
            linter: first_match(&rules.linter, &content),
        };
        debug!(language = %self.language, test = ?info.test, linter = ?info.linter, "Inferred tooling");
        info
    }

    fn pipeline(&self, ctx: &RenderContext) -> PipelineSteps {
        let mut setup = Step::uses(self.setup.uses.clone());
        if let Some(name) = &self.setup.name {
            setup = setup.with_name(name.replace("{version}", &ctx.version));
        }
        for (key, value) in &self.setup.with {
            setup = setup.with_input(key.clone(), value.replace("{version}", &ctx.version));
        }

        let install = if self.install.is_empty() {
            Step::run(["echo \"No install step\""])
        } else {
            Step::run(&self.install)
        }
        .with_name("Install dependencies");

        let lint = ctx.linter.as_deref().map(|linter| {
            Step::run(Self::command_for(&self.lint, linter).lines())
                .with_name(format!("Lint with {}", linter))
        });

        let test = ctx.test.as_deref().map(|test| {
            Step::run(Self::command_for(&self.test, test).lines())
                .with_name(format!("Test with {}", test))
        });

        PipelineSteps {
            setup,
            install,
            lint,
            test,
        }
    }
}
