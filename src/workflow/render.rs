//! Shared workflow template
//!
//! Providers contribute the language-specific steps; this module owns the
//! document shape. The single `build` job always runs, in order: checkout,
//! environment setup, dependency installation, lint (if any), test (if any).

use super::schema::{Job, Step, Workflow, WorkflowTriggers};
use crate::provider::LanguageId;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

pub const WORKFLOW_NAME: &str = "CI";
pub const JOB_ID: &str = "build";
pub const RUNNER: &str = "ubuntu-latest";
pub const DEFAULT_BRANCHES: &[&str] = &["main"];
pub const CHECKOUT_ACTION: &str = "actions/checkout@v4";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("language key must not be empty")]
    EmptyLanguage,

    #[error("invalid workflow document: {0}")]
    InvalidDocument(String),

    #[error("failed to serialize workflow: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Resolved parameters for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub language: LanguageId,
    /// Toolchain version pin passed to the setup action
    pub version: String,
    pub test: Option<String>,
    pub linter: Option<String>,
}

impl RenderContext {
    pub fn new(
        language: LanguageId,
        version: impl Into<String>,
        test: Option<&str>,
        linter: Option<&str>,
    ) -> Self {
        Self {
            language,
            version: version.into(),
            test: normalize(test),
            linter: normalize(linter),
        }
    }
}

/// Blank tool names count as absent.
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Language-specific steps supplied by a provider.
#[derive(Debug, Clone)]
pub struct PipelineSteps {
    pub setup: Step,
    pub install: Step,
    pub lint: Option<Step>,
    pub test: Option<Step>,
}

pub fn build_workflow(steps: PipelineSteps) -> Workflow {
    let PipelineSteps {
        setup,
        install,
        lint,
        test,
    } = steps;

    let mut job_steps = vec![Step::uses(CHECKOUT_ACTION), setup, install];
    job_steps.extend(lint);
    job_steps.extend(test);

    let mut jobs = IndexMap::new();
    jobs.insert(
        JOB_ID.to_string(),
        Job {
            runs_on: RUNNER.to_string(),
            steps: job_steps,
        },
    );

    Workflow {
        name: WORKFLOW_NAME.to_string(),
        on: WorkflowTriggers::on_branches(DEFAULT_BRANCHES),
        jobs,
    }
}

/// Structural checks on a built document.
pub fn validate(workflow: &Workflow) -> Result<(), RenderError> {
    if workflow.name.trim().is_empty() {
        return Err(RenderError::InvalidDocument(
            "workflow name is empty".to_string(),
        ));
    }
    if workflow.jobs.is_empty() {
        return Err(RenderError::InvalidDocument("workflow has no jobs".to_string()));
    }

    for (job_id, job) in &workflow.jobs {
        let first = job.steps.first().and_then(|s| s.uses.as_deref());
        if first != Some(CHECKOUT_ACTION) {
            return Err(RenderError::InvalidDocument(format!(
                "job '{}' must start with {}",
                job_id, CHECKOUT_ACTION
            )));
        }
        if let Some(index) = job.steps.iter().position(|s| !s.is_well_formed()) {
            return Err(RenderError::InvalidDocument(format!(
                "job '{}' step {} must have exactly one of 'uses' or 'run'",
                job_id,
                index + 1
            )));
        }
    }

    Ok(())
}

fn header(ctx: &RenderContext) -> String {
    format!(
        "# Generated by workflow-gen ({} provider)\n# Regenerate instead of editing by hand.\n\n",
        ctx.language
    )
}

/// Builds, validates and serializes the workflow for `ctx`.
pub fn render(ctx: &RenderContext, steps: PipelineSteps) -> Result<String, RenderError> {
    if ctx.language.key().trim().is_empty() {
        return Err(RenderError::EmptyLanguage);
    }

    let workflow = build_workflow(steps);
    validate(&workflow)?;

    let yaml = serde_yaml::to_string(&workflow)?;
    debug!(
        language = %ctx.language,
        steps = workflow.jobs.get(JOB_ID).map(|j| j.steps.len()).unwrap_or(0),
        "Rendered workflow"
    );

    Ok(format!("{}{}", header(ctx), yaml))
}
