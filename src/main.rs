use workflow_gen::cli::commands::{CliArgs, Commands};
use workflow_gen::cli::handlers::{handle_generate, handle_providers, EXIT_FAILURE};
use workflow_gen::messages::MessageCatalog;
use workflow_gen::util::logging::{parse_level, LoggingConfig};
use workflow_gen::{init_logging, WorkflowGenConfig, VERSION};

use clap::Parser;
use tracing::{debug, warn, Level};

fn main() {
    let args = CliArgs::parse();
    let mut config = WorkflowGenConfig::default();
    config.override_log_level(log_level_flag(&args));
    init_logging_from_config(&config);

    debug!("workflow-gen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let messages = match load_messages(&config) {
        Some(messages) => messages,
        None => std::process::exit(EXIT_FAILURE),
    };

    if let Err(e) = config.validate() {
        eprintln!(
            "{}",
            messages.format("errors", "config_invalid", &[("error", e.to_string().as_str())])
        );
        std::process::exit(EXIT_FAILURE);
    }

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, &config, &messages),
        Commands::Providers(providers_args) => handle_providers(providers_args, &config, &messages),
    };

    std::process::exit(exit_code);
}

/// Log level named on the command line: `--log-level`, then `-v`/`-q`.
fn log_level_flag(args: &CliArgs) -> Option<&str> {
    if let Some(level) = &args.log_level {
        Some(level.as_str())
    } else if args.verbose {
        Some("debug")
    } else if args.quiet {
        Some("error")
    } else {
        None
    }
}

/// An unknown level is reported by `validate` once messages are loaded.
fn init_logging_from_config(config: &WorkflowGenConfig) {
    let level = parse_level(&config.log_level).unwrap_or(Level::WARN);

    let mut logging = LoggingConfig::with_level(level);
    logging.use_json = config.log_json;
    init_logging(logging);
}

/// User message file when configured, falling back to the built-in table.
fn load_messages(config: &WorkflowGenConfig) -> Option<MessageCatalog> {
    let builtin = match MessageCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Built-in messages are invalid: {}", e);
            return None;
        }
    };

    let Some(path) = &config.messages_path else {
        return Some(builtin);
    };

    match MessageCatalog::from_file(path) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Falling back to built-in messages");
            eprintln!(
                "{}",
                builtin.format(
                    "errors",
                    "messages_invalid",
                    &[
                        ("path", path.display().to_string().as_str()),
                        ("error", e.to_string().as_str()),
                    ]
                )
            );
            Some(builtin)
        }
    }
}
