//! Node.js provider (package.json)

use super::{read_manifest, CiProvider, DependencyInfo, LanguageId};
use crate::fs::FileSystem;
use crate::workflow::{PipelineSteps, RenderContext, Step};
use std::path::Path;
use tracing::{debug, warn};

const NODE_VERSION: &str = "20";

pub struct NodeJsProvider;

impl CiProvider for NodeJsProvider {
    fn id(&self) -> LanguageId {
        LanguageId::NodeJs
    }

    fn manifest_files(&self) -> Vec<String> {
        vec!["package.json".to_string()]
    }

    fn default_version(&self) -> String {
        NODE_VERSION.to_string()
    }

    fn get_dependencies(&self, fs: &dyn FileSystem, project_path: &Path) -> DependencyInfo {
        let Some(content) = read_manifest(fs, project_path, "package.json") else {
            return DependencyInfo::empty();
        };

        let info = parse_package_json(&content);
        debug!(test = ?info.test, linter = ?info.linter, "Inferred Node.js tooling");
        info
    }

    fn pipeline(&self, ctx: &RenderContext) -> PipelineSteps {
        let setup = Step::uses("actions/setup-node@v4")
            .with_name(format!("Set up Node.js {}", ctx.version))
            .with_input("node-version", ctx.version.clone());

        let install = Step::run(["if [ -f package-lock.json ]; then npm ci; else npm install; fi"])
            .with_name("Install dependencies");

        let lint = ctx.linter.as_deref().map(|linter| {
            Step::run([format!("npx {} .", linter)]).with_name(format!("Lint with {}", linter))
        });

        let test = ctx.test.as_deref().map(|test| {
            let command = match test {
                "jest" => "npx jest".to_string(),
                "mocha" => "npx mocha".to_string(),
                _ => "npm test".to_string(),
            };
            Step::run([command]).with_name(format!("Test with {}", test))
        });

        PipelineSteps {
            setup,
            install,
            lint,
            test,
        }
    }
}

fn parse_package_json(content: &str) -> DependencyInfo {
    let package: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Error decoding package.json, skipping dependency inference");
            return DependencyInfo::empty();
        }
    };

    let Some(dev_dependencies) = package.get("devDependencies").and_then(|d| d.as_object())
    else {
        return DependencyInfo::empty();
    };

    let test = if dev_dependencies.contains_key("jest") {
        Some("jest")
    } else if dev_dependencies.contains_key("mocha") {
        Some("mocha")
    } else {
        None
    };
    let linter = dev_dependencies.contains_key("eslint").then_some("eslint");

    DependencyInfo::new(test, linter)
}
