//! Workflow document model and the shared template that renders it.

pub mod render;
pub mod schema;

pub use render::{render, PipelineSteps, RenderContext, RenderError};
pub use schema::{BranchFilter, Job, Step, Workflow, WorkflowTriggers};
