//! Java provider (Maven and Gradle)

use super::{read_manifest, CiProvider, DependencyInfo, LanguageId};
use crate::fs::FileSystem;
use crate::workflow::{PipelineSteps, RenderContext, Step};
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

const JAVA_VERSION: &str = "17";
const JAVA_DISTRIBUTION: &str = "temurin";

pub struct JavaProvider;

impl CiProvider for JavaProvider {
    fn id(&self) -> LanguageId {
        LanguageId::Java
    }

    fn manifest_files(&self) -> Vec<String> {
        vec![
            "pom.xml".to_string(),
            "build.gradle".to_string(),
            "build.gradle.kts".to_string(),
        ]
    }

    fn default_version(&self) -> String {
        JAVA_VERSION.to_string()
    }

    fn get_dependencies(&self, fs: &dyn FileSystem, project_path: &Path) -> DependencyInfo {
        let mut info = read_manifest(fs, project_path, "pom.xml")
            .map(|content| parse_pom(&content))
            .unwrap_or_default();

        for script in ["build.gradle", "build.gradle.kts"] {
            if info.test.is_some() && info.linter.is_some() {
                break;
            }
            if let Some(content) = read_manifest(fs, project_path, script) {
                let gradle = parse_gradle_script(&content);
                info.test = info.test.or(gradle.test);
                info.linter = info.linter.or(gradle.linter);
            }
        }

        debug!(test = ?info.test, linter = ?info.linter, "Inferred Java tooling");
        info
    }

    fn pipeline(&self, ctx: &RenderContext) -> PipelineSteps {
        let setup = Step::uses("actions/setup-java@v4")
            .with_name(format!("Set up JDK {}", ctx.version))
            .with_input("java-version", ctx.version.clone())
            .with_input("distribution", JAVA_DISTRIBUTION);

        let install = Step::run([build_tool_command("dependency:resolve", "dependencies")])
            .with_name("Install dependencies");

        let lint = ctx.linter.as_deref().map(|linter| {
            let (goal, task) = match linter {
                "checkstyle" => ("checkstyle:check".to_string(), "checkstyleMain".to_string()),
                "pmd" => ("pmd:check".to_string(), "pmdMain".to_string()),
                other => (format!("{}:check", other), format!("{}Main", other)),
            };
            Step::run([build_tool_command(&goal, &task)]).with_name(format!("Lint with {}", linter))
        });

        let test = ctx.test.as_deref().map(|test| {
            Step::run([build_tool_command("test", "test")]).with_name(format!("Test with {}", test))
        });

        PipelineSteps {
            setup,
            install,
            lint,
            test,
        }
    }
}

/// One shell line that runs a Maven goal or the equivalent Gradle task,
/// preferring the Gradle wrapper when present.
fn build_tool_command(maven_goal: &str, gradle_task: &str) -> String {
    format!(
        "if [ -f pom.xml ]; then mvn -B -ntp {goal}; elif [ -f gradlew ]; then chmod +x gradlew && ./gradlew {task}; else gradle {task}; fi",
        goal = maven_goal,
        task = gradle_task
    )
}

fn parse_pom(content: &str) -> DependencyInfo {
    let doc = match roxmltree::Document::parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Malformed pom.xml, skipping dependency inference");
            return DependencyInfo::empty();
        }
    };

    let artifacts: Vec<&str> = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "artifactId")
        .filter_map(|n| n.text())
        .map(str::trim)
        .collect();

    let test = if artifacts
        .iter()
        .any(|a| *a == "junit" || a.starts_with("junit-jupiter"))
    {
        Some("junit")
    } else if artifacts.iter().any(|a| *a == "testng") {
        Some("testng")
    } else {
        None
    };

    let linter = if artifacts.contains(&"maven-checkstyle-plugin") {
        Some("checkstyle")
    } else if artifacts.contains(&"maven-pmd-plugin") {
        Some("pmd")
    } else {
        None
    };

    DependencyInfo::new(test, linter)
}

fn parse_gradle_script(content: &str) -> DependencyInfo {
    let mentions = |word: &str| {
        Regex::new(&format!(r"\b{}\b", regex::escape(word)))
            .map(|re| re.is_match(content))
            .unwrap_or(false)
    };

    let test = if content.contains("junit") {
        Some("junit")
    } else if content.contains("testng") {
        Some("testng")
    } else {
        None
    };

    let linter = if mentions("checkstyle") {
        Some("checkstyle")
    } else if mentions("pmd") {
        Some("pmd")
    } else {
        None
    };

    DependencyInfo::new(test, linter)
}
