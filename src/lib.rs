//! workflow-gen - GitHub Actions workflow generator
//!
//! Detects a project's language from its manifest files, infers the test
//! framework and linter it already uses, and renders a ready-to-run
//! `.github/workflows/main.yml`.
//!
//! # Core Concepts
//!
//! - **Provider**: one ecosystem's detection probe, dependency inference and
//!   pipeline steps ([`provider::CiProvider`])
//! - **Registry**: providers in registration order, which is also detection
//!   order ([`provider::ProviderRegistry`])
//! - **Render Context**: resolved language, version, test framework and
//!   linter fed to the shared template ([`workflow::RenderContext`])
//!
//! # Example Usage
//!
//! ```no_run
//! use workflow_gen::fs::RealFileSystem;
//! use workflow_gen::generator::{GenerateRequest, WorkflowGenerator};
//! use workflow_gen::provider::ProviderRegistry;
//! use std::path::PathBuf;
//!
//! let registry = ProviderRegistry::with_defaults();
//! let fs = RealFileSystem::new();
//! let request = GenerateRequest {
//!     project: Some(PathBuf::from("./my-app")),
//!     ..Default::default()
//! };
//!
//! let path = WorkflowGenerator::new(&registry, &fs)
//!     .generate_to_file(&request)
//!     .unwrap();
//! println!("Generated workflow file: {}", path.display());
//! ```

pub mod cli;
pub mod config;
pub mod fs;
pub mod generator;
pub mod messages;
pub mod provider;
pub mod util;
pub mod workflow;

pub use config::{ConfigError, WorkflowGenConfig};
pub use generator::{GenerateError, GenerateRequest, GeneratedWorkflow, WorkflowGenerator};
pub use messages::{MessageCatalog, MessageError};
pub use provider::{CiProvider, DependencyInfo, LanguageId, ProviderError, ProviderRegistry};
pub use util::{init_from_env, init_logging, LoggingConfig};
pub use workflow::{RenderContext, RenderError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
