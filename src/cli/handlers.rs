//! Subcommand handlers. Each returns the process exit code.

use super::commands::{GenerateArgs, ProvidersArgs};
use super::output::OutputFormatter;
use crate::config::WorkflowGenConfig;
use crate::fs::RealFileSystem;
use crate::generator::{write_workflow, GenerateError, GenerateRequest, WorkflowGenerator};
use crate::messages::MessageCatalog;
use crate::provider::{ProviderLoader, ProviderRegistry};
use std::path::Path;
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Built-in providers plus those from the providers directory, if any.
/// Files that fail to load are reported on stderr and skipped.
pub fn build_registry(
    fs: &RealFileSystem,
    providers_dir: Option<&Path>,
    messages: &MessageCatalog,
) -> ProviderRegistry {
    let mut registry = ProviderRegistry::with_defaults();

    if let Some(dir) = providers_dir {
        let report = ProviderLoader::new(fs).load_dir(dir, &mut registry);
        for err in &report.errors {
            let provider_name = err.path().display().to_string();
            let error = err.to_string();
            eprintln!(
                "{}",
                messages.format(
                    "errors",
                    "provider_load",
                    &[("provider_name", provider_name.as_str()), ("error", error.as_str())]
                )
            );
        }
        debug!(loaded = report.loaded.len(), failed = report.errors.len(), "Loaded providers directory");
    }

    registry
}

/// One user-facing line for a generation failure.
pub fn localize_error(err: &GenerateError, messages: &MessageCatalog) -> String {
    match err {
        GenerateError::MissingLanguage => messages.get("errors", "missing_language"),
        GenerateError::ProjectNotFound(path) => messages.format(
            "errors",
            "project_not_found",
            &[("path", path.display().to_string().as_str())],
        ),
        GenerateError::LanguageDetection(_) => messages.get("errors", "detection_failed"),
        GenerateError::UnsupportedLanguage(language) => {
            messages.format("errors", "unsupported_language", &[("language", language.as_str())])
        }
        GenerateError::Render(e) => {
            messages.format("errors", "render_failed", &[("error", e.to_string().as_str())])
        }
        GenerateError::OutputWrite { path, source } => messages.format(
            "errors",
            "write_failed",
            &[
                ("path", path.display().to_string().as_str()),
                ("error", source.to_string().as_str()),
            ],
        ),
    }
}

fn exit_code_for(err: &GenerateError) -> i32 {
    if err.is_usage() {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}

pub fn handle_generate(
    args: &GenerateArgs,
    config: &WorkflowGenConfig,
    messages: &MessageCatalog,
) -> i32 {
    let fs = RealFileSystem::new();
    let providers_dir = args
        .providers_dir
        .as_deref()
        .or(config.providers_dir.as_deref());
    let registry = build_registry(&fs, providers_dir, messages);

    let request = GenerateRequest {
        project: args.project.clone(),
        language: args.language.clone(),
        test: args.test.clone(),
        linter: args.linter.clone(),
        output: args.output.clone(),
    };

    let generated = match WorkflowGenerator::new(&registry, &fs).generate(&request) {
        Ok(generated) => generated,
        Err(e) => {
            error!(error = %e, "Workflow generation failed");
            eprintln!("{}", localize_error(&e, messages));
            return exit_code_for(&e);
        }
    };

    if request.project.is_some() {
        info!(
            "{}",
            messages.format(
                "info",
                "detected_language",
                &[("language", generated.language.key())]
            )
        );
    }

    if args.dry_run {
        print!("{}", generated.content);
        return EXIT_SUCCESS;
    }

    let path = request.output_path();
    if let Err(e) = write_workflow(&path, &generated.content) {
        error!(error = %e, "Could not write workflow file");
        eprintln!("{}", localize_error(&e, messages));
        return exit_code_for(&e);
    }

    println!(
        "{}",
        messages.format("info", "generated", &[("path", path.display().to_string().as_str())])
    );
    EXIT_SUCCESS
}

pub fn handle_providers(
    args: &ProvidersArgs,
    config: &WorkflowGenConfig,
    messages: &MessageCatalog,
) -> i32 {
    let fs = RealFileSystem::new();
    let providers_dir = args
        .providers_dir
        .as_deref()
        .or(config.providers_dir.as_deref());
    let registry = build_registry(&fs, providers_dir, messages);

    match OutputFormatter::new(args.format.into(), messages).format_providers(&registry) {
        Ok(output) => {
            println!("{}", output.trim_end());
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Failed to format providers");
            eprintln!("{:#}", e);
            EXIT_FAILURE
        }
    }
}
