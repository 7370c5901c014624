//! End-to-end generation through the library API on real directories.

use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use workflow_gen::fs::RealFileSystem;
use workflow_gen::generator::{GenerateRequest, WorkflowGenerator};
use workflow_gen::provider::{LanguageId, ProviderLoader, ProviderRegistry};
use yare::parameterized;

fn steps(yaml: &str) -> Vec<Value> {
    let doc: Value = serde_yaml::from_str(yaml).expect("generated document must parse");
    doc["jobs"]["build"]["steps"]
        .as_sequence()
        .expect("build job must have steps")
        .clone()
}

fn step_names(yaml: &str) -> Vec<String> {
    steps(yaml)
        .iter()
        .filter_map(|s| s["name"].as_str().map(str::to_string))
        .collect()
}

fn generate(registry: &ProviderRegistry, request: &GenerateRequest) -> String {
    let fs = RealFileSystem::new();
    WorkflowGenerator::new(registry, &fs)
        .generate(request)
        .expect("generation should succeed")
        .content
}

#[parameterized(
    java = { "java", "actions/setup-java@v4" },
    nodejs = { "nodejs", "actions/setup-node@v4" },
    python = { "python", "actions/setup-python@v5" },
)]
fn builtin_language_renders_checkout_and_setup(language: &str, setup_action: &str) {
    let registry = ProviderRegistry::with_defaults();
    let request = GenerateRequest {
        language: Some(language.to_string()),
        ..Default::default()
    };

    let yaml = generate(&registry, &request);
    let doc: Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(doc["name"].as_str(), Some("CI"));
    assert_eq!(doc["jobs"]["build"]["runs-on"].as_str(), Some("ubuntu-latest"));

    let steps = steps(&yaml);
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["uses"].as_str(), Some("actions/checkout@v4"));
    assert_eq!(steps[1]["uses"].as_str(), Some(setup_action));
    assert!(!yaml.contains("Lint with"));
    assert!(!yaml.contains("Test with"));
}

#[parameterized(
    pom = { "pom.xml", "<project/>", "java" },
    gradle = { "build.gradle", "plugins { id 'java' }", "java" },
    package_json = { "package.json", "{}", "nodejs" },
    requirements = { "requirements.txt", "requests\n", "python" },
    pyproject = { "pyproject.toml", "[project]\nname = \"x\"\n", "python" },
)]
fn detection_by_signal_file(file: &str, content: &str, expected: &str) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(file), content).unwrap();

    let registry = ProviderRegistry::with_defaults();
    let detected = registry.detect(&RealFileSystem::new(), temp.path());
    assert_eq!(detected, Some(LanguageId::parse(expected)));
}

#[test]
fn test_node_project_with_jest() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{"devDependencies": {"jest": "^29.0.0"}}"#,
    )
    .unwrap();

    let registry = ProviderRegistry::with_defaults();
    let request = GenerateRequest {
        project: Some(temp.path().to_path_buf()),
        ..Default::default()
    };
    let yaml = generate(&registry, &request);

    assert_eq!(
        step_names(&yaml),
        vec!["Set up Node.js 20", "Install dependencies", "Test with jest"]
    );
    let test_step = steps(&yaml).last().cloned().unwrap();
    assert_eq!(test_step["run"].as_str(), Some("npx jest"));
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pom.xml"),
        "<project><build><plugins><plugin><artifactId>maven-checkstyle-plugin</artifactId></plugin></plugins></build></project>",
    )
    .unwrap();

    let registry = ProviderRegistry::with_defaults();
    let fs = RealFileSystem::new();
    let generator = WorkflowGenerator::new(&registry, &fs);
    let request = GenerateRequest {
        project: Some(temp.path().to_path_buf()),
        ..Default::default()
    };

    let first_path = generator.generate_to_file(&request).unwrap();
    let first = fs::read(&first_path).unwrap();
    let second_path = generator.generate_to_file(&request).unwrap();
    let second = fs::read(&second_path).unwrap();

    assert_eq!(first_path, second_path);
    assert_eq!(first, second);
    assert!(String::from_utf8(first).unwrap().contains("Lint with checkstyle"));
}

#[test]
fn test_explicit_language_without_project() {
    let registry = ProviderRegistry::with_defaults();
    let request = GenerateRequest {
        language: Some("python".to_string()),
        test: Some("unittest".to_string()),
        linter: Some("flake8".to_string()),
        ..Default::default()
    };

    let yaml = generate(&registry, &request);
    assert_eq!(
        step_names(&yaml),
        vec![
            "Set up Python 3.12",
            "Install dependencies",
            "Lint with flake8",
            "Test with unittest"
        ]
    );
    assert_eq!(
        request.output_path(),
        Path::new(".").join(".github").join("workflows").join("main.yml")
    );
}

#[test]
fn test_declarative_providers_with_one_broken_file() {
    let temp = TempDir::new().unwrap();
    let providers = temp.path().join("providers");
    fs::create_dir_all(&providers).unwrap();
    fs::write(providers.join("a-broken.yaml"), "detect: [go.mod]\n").unwrap();
    fs::write(
        providers.join("b-go.yml"),
        "language: go\ndisplay_name: Go\nversion: '1.22'\ndetect: [go.mod]\nsetup:\n  uses: actions/setup-go@v5\n  with:\n    go-version: '{version}'\ninstall: [go mod download]\ndependencies:\n  manifest: go.mod\n  linter:\n    golangci-lint: golangci-lint\nlint:\n  golangci-lint: golangci-lint run\ntest:\n  default: go test ./...\n",
    )
    .unwrap();

    let project = temp.path().join("app");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("go.mod"),
        "module example.com/app\n\ntool github.com/golangci/golangci-lint/cmd/golangci-lint\n",
    )
    .unwrap();

    let fs_impl = RealFileSystem::new();
    let mut registry = ProviderRegistry::with_defaults();
    let report = ProviderLoader::new(&fs_impl).load_dir(&providers, &mut registry);

    assert_eq!(report.loaded, vec![LanguageId::parse("go")]);
    assert_eq!(report.errors.len(), 1);

    let request = GenerateRequest {
        project: Some(project),
        test: Some("go".to_string()),
        ..Default::default()
    };
    let yaml = generate(&registry, &request);

    assert!(yaml.starts_with("# Generated by workflow-gen (go provider)"));
    assert_eq!(
        step_names(&yaml),
        vec!["Install dependencies", "Lint with golangci-lint", "Test with go"]
    );
    let steps = steps(&yaml);
    assert_eq!(steps[1]["with"]["go-version"].as_str(), Some("1.22"));
    assert_eq!(steps[4]["run"].as_str(), Some("go test ./..."));
}
