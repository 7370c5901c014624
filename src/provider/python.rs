//! Python provider (requirements.txt, setup.py, pyproject.toml)

use super::{read_manifest, CiProvider, DependencyInfo, LanguageId};
use crate::fs::FileSystem;
use crate::workflow::{PipelineSteps, RenderContext, Step};
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

const PYTHON_VERSION: &str = "3.12";

pub struct PythonProvider;

impl CiProvider for PythonProvider {
    fn id(&self) -> LanguageId {
        LanguageId::Python
    }

    fn manifest_files(&self) -> Vec<String> {
        vec![
            "requirements.txt".to_string(),
            "setup.py".to_string(),
            "pyproject.toml".to_string(),
        ]
    }

    fn default_version(&self) -> String {
        PYTHON_VERSION.to_string()
    }

    fn get_dependencies(&self, fs: &dyn FileSystem, project_path: &Path) -> DependencyInfo {
        let info = if let Some(content) = read_manifest(fs, project_path, "requirements.txt") {
            classify(content.lines())
        } else if let Some(content) = read_manifest(fs, project_path, "pyproject.toml") {
            classify(pyproject_requirements(&content).iter().map(String::as_str))
        } else {
            DependencyInfo::empty()
        };

        debug!(test = ?info.test, linter = ?info.linter, "Inferred Python tooling");
        info
    }

    fn pipeline(&self, ctx: &RenderContext) -> PipelineSteps {
        let setup = Step::uses("actions/setup-python@v5")
            .with_name(format!("Set up Python {}", ctx.version))
            .with_input("python-version", ctx.version.clone());

        let tools: Vec<&str> = [ctx.linter.as_deref(), ctx.test.as_deref()]
            .into_iter()
            .flatten()
            .filter(|tool| *tool != "unittest")
            .collect();

        let mut install_lines = vec!["python -m pip install --upgrade pip".to_string()];
        if !tools.is_empty() {
            install_lines.push(format!("pip install {}", tools.join(" ")));
        }
        install_lines
            .push("if [ -f requirements.txt ]; then pip install -r requirements.txt; fi".to_string());
        let install = Step::run(install_lines).with_name("Install dependencies");

        let lint = ctx.linter.as_deref().map(|linter| {
            let lines = match linter {
                "flake8" => vec![
                    "flake8 . --count --select=E9,F63,F7,F82 --show-source --statistics".to_string(),
                    "flake8 . --count --exit-zero --max-complexity=10 --max-line-length=127 --statistics"
                        .to_string(),
                ],
                "pylint" => vec!["pylint $(git ls-files '*.py')".to_string()],
                other => vec![format!("{} .", other)],
            };
            Step::run(lines).with_name(format!("Lint with {}", linter))
        });

        let test = ctx.test.as_deref().map(|test| {
            let command = match test {
                "pytest" => "pytest".to_string(),
                "unittest" => "python -m unittest discover".to_string(),
                other => other.to_string(),
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

/// Scans requirement specifiers in order; later linter lines win.
fn classify<'a>(requirements: impl IntoIterator<Item = &'a str>) -> DependencyInfo {
    let name_re = Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)").ok();
    let mut info = DependencyInfo::empty();

    for line in requirements {
        let Some(name) = name_re
            .as_ref()
            .and_then(|re| re.captures(line))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_ascii_lowercase())
        else {
            continue;
        };

        if name.starts_with("pytest") {
            info.test = Some("pytest".to_string());
        }
        if name.starts_with("flake8") {
            info.linter = Some("flake8".to_string());
        }
        if name.starts_with("pylint") {
            info.linter = Some("pylint".to_string());
        }
    }

    info
}

/// Requirement strings from PEP 621 tables and poetry dependency keys.
fn pyproject_requirements(content: &str) -> Vec<String> {
    let doc: toml::Value = match toml::from_str(content) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Malformed pyproject.toml, skipping dependency inference");
            return Vec::new();
        }
    };

    let mut requirements = Vec::new();
    let strings = |value: Option<&toml::Value>| -> Vec<String> {
        value
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };

    if let Some(project) = doc.get("project") {
        requirements.extend(strings(project.get("dependencies")));
        if let Some(optional) = project
            .get("optional-dependencies")
            .and_then(|o| o.as_table())
        {
            for group in optional.values() {
                requirements.extend(strings(Some(group)));
            }
        }
    }

    if let Some(poetry) = doc.get("tool").and_then(|t| t.get("poetry")) {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(deps) = poetry.get(table).and_then(|d| d.as_table()) {
                requirements.extend(deps.keys().cloned());
            }
        }
        if let Some(groups) = poetry.get("group").and_then(|g| g.as_table()) {
            for group in groups.values() {
                if let Some(deps) = group.get("dependencies").and_then(|d| d.as_table()) {
                    requirements.extend(deps.keys().cloned());
                }
            }
        }
    }

    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    #[test]
    fn test_detects_python_manifests() {
        for manifest in ["requirements.txt", "setup.py", "pyproject.toml"] {
            let fs = MockFileSystem::new();
            fs.add_file(manifest, "");
            assert_eq!(
                PythonProvider.detect_language(&fs, fs.root()).unwrap(),
                Some(LanguageId::Python),
                "{}",
                manifest
            );
        }
    }

    #[test]
    fn test_pytest_and_flake8() {
        let fs = MockFileSystem::new();
        fs.add_file("requirements.txt", "pytest==7.0\nflake8>=6\nrequests\n");

        let deps = PythonProvider.get_dependencies(&fs, fs.root());
        assert_eq!(deps, DependencyInfo::new(Some("pytest"), Some("flake8")));
    }

    #[test]
    fn test_later_linter_line_wins() {
        let deps = classify("pylint\nflake8\n".lines());
        assert_eq!(deps.linter.as_deref(), Some("flake8"));

        let deps = classify("flake8\npylint\n".lines());
        assert_eq!(deps.linter.as_deref(), Some("pylint"));
    }

    #[test]
    fn test_requirement_names_only() {
        let deps = classify(
            "# pytest is not used\n-r dev.txt\nrequests  # needs pytest-free env\npytest-cov==4.1\n"
                .lines(),
        );
        assert_eq!(deps, DependencyInfo::new(Some("pytest"), None));
    }

    #[test]
    fn test_missing_manifest() {
        let fs = MockFileSystem::new();
        assert_eq!(PythonProvider.get_dependencies(&fs, fs.root()), DependencyInfo::empty());
    }

    #[test]
    fn test_pyproject_fallback() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "pyproject.toml",
            r#"
[project]
name = "demo"
dependencies = ["requests>=2"]

[project.optional-dependencies]
dev = ["pytest>=8", "pylint"]
"#,
        );

        let deps = PythonProvider.get_dependencies(&fs, fs.root());
        assert_eq!(deps, DependencyInfo::new(Some("pytest"), Some("pylint")));
    }

    #[test]
    fn test_poetry_dev_dependencies() {
        let requirements = pyproject_requirements(
            r#"
[tool.poetry.dependencies]
python = "^3.11"

[tool.poetry.group.dev.dependencies]
flake8 = "^7"
"#,
        );
        assert_eq!(classify(requirements.iter().map(String::as_str)).linter.as_deref(), Some("flake8"));
    }

    #[test]
    fn test_malformed_pyproject() {
        let fs = MockFileSystem::new();
        fs.add_file("pyproject.toml", "[project\n");
        assert_eq!(PythonProvider.get_dependencies(&fs, fs.root()), DependencyInfo::empty());
    }

    #[test]
    fn test_workflow_with_flake8_and_pytest() {
        let yaml = PythonProvider
            .generate_workflow(&LanguageId::Python, Some("pytest"), Some("flake8"))
            .unwrap();

        assert!(yaml.contains("uses: actions/setup-python@v5"));
        assert!(yaml.contains("python-version: '3.12'"));
        assert!(yaml.contains("pip install flake8 pytest"));
        assert!(yaml.contains("--select=E9,F63,F7,F82"));
        assert!(yaml.contains("--max-line-length=127"));
        assert!(yaml.contains("Test with pytest"));
    }

    #[test]
    fn test_workflow_with_unittest() {
        let yaml = PythonProvider
            .generate_workflow(&LanguageId::Python, Some("unittest"), Some("pylint"))
            .unwrap();

        assert!(yaml.contains("python -m unittest discover"));
        assert!(yaml.contains("pylint $(git ls-files '*.py')"));
        assert!(yaml.contains("pip install pylint\n"));
        assert!(!yaml.contains("pip install unittest"));
    }
}
