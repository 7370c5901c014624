use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// GitHub Actions workflow generator
#[derive(Parser, Debug)]
#[command(
    name = "workflow-gen",
    about = "Generate a GitHub Actions CI workflow for a project",
    version,
    long_about = "workflow-gen detects a project's language from its manifest files, infers \
                  the test framework and linter it already uses, and writes a ready-to-run \
                  .github/workflows/main.yml. Built-in providers: java, nodejs, python."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate the workflow file",
        long_about = "Generates .github/workflows/main.yml for an existing project or for a \
                      language given on the command line.\n\n\
                      Examples:\n  \
                      workflow-gen generate --project ./my-app\n  \
                      workflow-gen generate --language python --test pytest --linter flake8\n  \
                      workflow-gen generate -p ./my-app -o ./ci --dry-run"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "List registered providers",
        long_about = "Lists the registered language providers in detection order, including \
                      any loaded from a providers directory.\n\n\
                      Examples:\n  \
                      workflow-gen providers\n  \
                      workflow-gen providers --format json --providers-dir ./providers"
    )]
    Providers(ProvidersArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[arg(
        short = 'p',
        long,
        value_name = "DIR",
        help = "Path to an existing project directory"
    )]
    pub project: Option<PathBuf>,

    #[arg(
        short = 'l',
        long,
        value_name = "KEY",
        help = "Language key (java, nodejs, python, or one from a providers directory)"
    )]
    pub language: Option<String>,

    #[arg(short = 't', long, value_name = "NAME", help = "Test framework")]
    pub test: Option<String>,

    #[arg(short = 'i', long, value_name = "NAME", help = "Linter")]
    pub linter: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory for main.yml instead of <project>/.github/workflows"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Print the workflow to stdout instead of writing it")]
    pub dry_run: bool,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory of declarative provider files (overrides WORKFLOW_GEN_PROVIDERS_DIR)"
    )]
    pub providers_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ProvidersArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory of declarative provider files (overrides WORKFLOW_GEN_PROVIDERS_DIR)"
    )]
    pub providers_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
