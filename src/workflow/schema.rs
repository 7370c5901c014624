//! GitHub Actions workflow schema types
//!
//! Only the subset of the workflow syntax the generator emits. Every map is
//! an `IndexMap`, so serialization order is insertion order and identical
//! input always yields identical YAML.

use indexmap::IndexMap;
use serde::Serialize;

/// A GitHub Actions workflow definition.
#[derive(Debug, Clone, Serialize)]
pub struct Workflow {
    /// Workflow name displayed in GitHub UI
    pub name: String,

    /// Trigger configuration
    #[serde(rename = "on")]
    pub on: WorkflowTriggers,

    /// Job definitions
    pub jobs: IndexMap<String, Job>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowTriggers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<BranchFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<BranchFilter>,
}

impl WorkflowTriggers {
    /// Push and pull request triggers on the same branches.
    pub fn on_branches(branches: &[&str]) -> Self {
        let filter = BranchFilter {
            branches: branches.iter().map(|b| b.to_string()).collect(),
        };
        Self {
            push: Some(filter.clone()),
            pull_request: Some(filter),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BranchFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
    /// Runner label
    pub runs_on: String,

    /// Job steps (executed sequentially)
    pub steps: Vec<Step>,
}

/// A step in a job: either `uses` an action or `run`s a shell script.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,

    /// Action inputs (for `uses` steps)
    #[serde(rename = "with", skip_serializing_if = "IndexMap::is_empty")]
    pub with_inputs: IndexMap<String, String>,
}

impl Step {
    /// Create a step that uses an action
    pub fn uses(action: impl Into<String>) -> Self {
        Self {
            uses: Some(action.into()),
            ..Default::default()
        }
    }

    /// Create a step that runs shell commands, one per line
    pub fn run<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let script = commands
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            run: Some(script),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_inputs.insert(key.into(), value.into());
        self
    }

    /// A step must either use an action or run a script, never both.
    pub fn is_well_formed(&self) -> bool {
        match (&self.uses, &self.run) {
            (Some(uses), None) => !uses.trim().is_empty(),
            (None, Some(run)) => !run.trim().is_empty() && self.with_inputs.is_empty(),
            _ => false,
        }
    }
}
