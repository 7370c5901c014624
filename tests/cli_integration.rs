//! CLI integration tests
//!
//! Drive the built binary: argument handling, exit codes, files written and
//! messages printed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn workflow_gen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_workflow-gen"))
}

/// Runs the binary in `cwd` with a clean `WORKFLOW_GEN_*` environment.
fn run(cwd: &Path, args: &[&str]) -> Output {
    run_with_env(cwd, args, &[])
}

/// Like `run`, with the given variables set on top of the clean environment.
fn run_with_env(cwd: &Path, args: &[&str], vars: &[(&str, &Path)]) -> Output {
    let mut command = Command::new(workflow_gen_bin());
    command
        .current_dir(cwd)
        .args(args)
        .env_remove("WORKFLOW_GEN_LOG_LEVEL")
        .env_remove("WORKFLOW_GEN_LOG_JSON")
        .env_remove("WORKFLOW_GEN_PROVIDERS_DIR")
        .env_remove("WORKFLOW_GEN_MESSAGES")
        .env_remove("RUST_LOG");
    for (key, value) in vars {
        command.env(key, value);
    }
    command.output().expect("Failed to execute workflow-gen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn create_node_project(dir: &Path) {
    fs::write(
        dir.join("package.json"),
        r#"{"name": "demo", "devDependencies": {"jest": "^29.7.0"}}"#,
    )
    .unwrap();
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["--help"]);

    assert!(output.status.success());
    let help = stdout(&output);
    assert!(help.contains("generate"));
    assert!(help.contains("providers"));
}

#[test]
fn test_cli_version() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_generate_for_node_project() {
    let temp = TempDir::new().unwrap();
    create_node_project(temp.path());
    let project = temp.path().to_str().unwrap();

    let output = run(temp.path(), &["generate", "--project", project]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let expected = temp.path().join(".github/workflows/main.yml");
    assert!(stdout(&output).contains("Generated workflow file:"));
    assert!(stdout(&output).contains("main.yml"));

    let content = fs::read_to_string(expected).unwrap();
    assert!(content.contains("actions/setup-node@v4"));
    assert!(content.contains("npx jest"));
    assert!(!content.contains("Lint with"));
}

#[test]
fn test_generate_with_output_dir() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("requirements.txt"), "pytest\nflake8\n").unwrap();
    let project = temp.path().to_str().unwrap();
    let out = temp.path().join("ci");

    let output = run(
        temp.path(),
        &["generate", "-p", project, "-o", out.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let content = fs::read_to_string(out.join("main.yml")).unwrap();
    assert!(content.contains("Lint with flake8"));
    assert!(content.contains("Test with pytest"));
    assert!(!temp.path().join(".github").exists());
}

#[test]
fn test_generate_explicit_language_in_current_directory() {
    let temp = TempDir::new().unwrap();

    let output = run(
        temp.path(),
        &["generate", "--language", "java", "--test", "junit"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let content = fs::read_to_string(temp.path().join(".github/workflows/main.yml")).unwrap();
    assert!(content.contains("actions/setup-java@v4"));
    assert!(content.contains("Test with junit"));
}

#[test]
fn test_dry_run_prints_and_writes_nothing() {
    let temp = TempDir::new().unwrap();

    let output = run(
        temp.path(),
        &["generate", "-l", "nodejs", "-i", "eslint", "--dry-run"],
    );

    assert_eq!(output.status.code(), Some(0));
    let yaml = stdout(&output);
    assert!(yaml.starts_with("# Generated by workflow-gen (nodejs provider)"));
    assert!(yaml.contains("npx eslint ."));
    assert!(!temp.path().join(".github").exists());
}

#[test]
fn test_missing_language_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["generate"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(
        "Please specify the language using --language or provide the project path using --project."
    ));
}

#[test]
fn test_undetectable_project_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "# nothing").unwrap();
    let project = temp.path().to_str().unwrap();

    let output = run(temp.path(), &["generate", "-p", project]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output)
        .contains("Could not detect language from project. Please specify using --language."));
    assert!(!temp.path().join(".github").exists());
}

#[test]
fn test_unsupported_language_fails() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["generate", "-l", "cobol"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Language cobol not supported."));
}

#[test]
fn test_language_keys_are_case_sensitive() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["generate", "-l", "Python", "--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Language Python not supported."));
}

#[test]
fn test_providers_listing() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["providers", "--format", "json"]);

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
    assert_eq!(parsed[0]["language"], "java");
}

#[test]
fn test_providers_dir_from_environment() {
    let temp = TempDir::new().unwrap();
    let providers = temp.path().join("providers");
    fs::create_dir_all(&providers).unwrap();
    fs::write(
        providers.join("ruby.yml"),
        "language: ruby\ndisplay_name: Ruby\nversion: '3.3'\ndetect: [Gemfile]\nsetup:\n  uses: ruby/setup-ruby@v1\n  with:\n    ruby-version: '{version}'\ninstall: [bundle install]\ntest:\n  rspec: bundle exec rspec\n",
    )
    .unwrap();
    fs::write(providers.join("broken.yml"), "language: [\n").unwrap();
    fs::write(temp.path().join("Gemfile"), "gem 'rspec'\n").unwrap();
    let project = temp.path().to_str().unwrap();

    let output = Command::new(workflow_gen_bin())
        .current_dir(temp.path())
        .args(["generate", "-p", project, "-t", "rspec", "--dry-run"])
        .env("WORKFLOW_GEN_PROVIDERS_DIR", &providers)
        .env_remove("WORKFLOW_GEN_MESSAGES")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Error loading provider"));
    assert!(stderr(&output).contains("broken.yml"));
    let yaml = stdout(&output);
    assert!(yaml.contains("ruby/setup-ruby@v1"));
    assert!(yaml.contains("ruby-version: '3.3'"));
    assert!(yaml.contains("bundle exec rspec"));
}

#[test]
fn test_custom_message_file() {
    let temp = TempDir::new().unwrap();
    let messages = temp.path().join("messages.yml");
    fs::write(
        &messages,
        "errors:\n  unsupported_language: \"Sprache {language} wird nicht unterstützt.\"\n",
    )
    .unwrap();

    let output = Command::new(workflow_gen_bin())
        .current_dir(temp.path())
        .args(["generate", "-l", "cobol"])
        .env("WORKFLOW_GEN_MESSAGES", &messages)
        .env_remove("WORKFLOW_GEN_PROVIDERS_DIR")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Sprache cobol wird nicht unterstützt."));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    create_node_project(temp.path());
    let project = temp.path().to_str().unwrap();
    let target = temp.path().join(".github/workflows/main.yml");

    assert!(run(temp.path(), &["generate", "-p", project]).status.success());
    let first = fs::read(&target).unwrap();
    assert!(run(temp.path(), &["generate", "-p", project]).status.success());
    let second = fs::read(&target).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_providers_dir_flag_overrides_environment() {
    let temp = TempDir::new().unwrap();
    let providers = temp.path().join("providers");
    fs::create_dir_all(&providers).unwrap();
    fs::write(
        providers.join("ruby.yml"),
        "language: ruby\ndisplay_name: Ruby\ndetect: [Gemfile]\nsetup:\n  uses: ruby/setup-ruby@v1\n",
    )
    .unwrap();
    let missing = temp.path().join("does-not-exist");

    let output = run_with_env(
        temp.path(),
        &[
            "generate",
            "-l",
            "ruby",
            "--dry-run",
            "--providers-dir",
            providers.to_str().unwrap(),
        ],
        &[("WORKFLOW_GEN_PROVIDERS_DIR", missing.as_path())],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("ruby/setup-ruby@v1"));
}

#[test]
fn test_missing_providers_dir_in_environment_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does-not-exist");

    let output = run_with_env(
        temp.path(),
        &["generate", "-l", "python", "--dry-run"],
        &[("WORKFLOW_GEN_PROVIDERS_DIR", missing.as_path())],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("actions/setup-python@v5"));
}

#[test]
fn test_log_level_flag_overrides_invalid_environment_level() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(workflow_gen_bin())
        .current_dir(temp.path())
        .args(["--log-level", "debug", "generate", "-l", "java", "--dry-run"])
        .env("WORKFLOW_GEN_LOG_LEVEL", "loud")
        .env_remove("WORKFLOW_GEN_PROVIDERS_DIR")
        .env_remove("WORKFLOW_GEN_MESSAGES")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("actions/setup-java@v4"));
    assert!(!stderr(&output).contains("Invalid log level"));
}

#[test]
fn test_invalid_environment_level_without_flag_fails() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(workflow_gen_bin())
        .current_dir(temp.path())
        .args(["generate", "-l", "java", "--dry-run"])
        .env("WORKFLOW_GEN_LOG_LEVEL", "loud")
        .env_remove("WORKFLOW_GEN_PROVIDERS_DIR")
        .env_remove("WORKFLOW_GEN_MESSAGES")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error: Invalid log level: loud"));
}

#[test]
fn test_missing_message_file_falls_back_to_builtin() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.yml");

    let output = run_with_env(
        temp.path(),
        &["generate", "-l", "cobol"],
        &[("WORKFLOW_GEN_MESSAGES", missing.as_path())],
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Could not load messages from"));
    assert!(err.contains("Language cobol not supported."));
    assert!(!err.contains("Configuration error"));
}
