pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, GenerateArgs, OutputFormatArg, ProvidersArgs};
pub use handlers::{handle_generate, handle_providers, EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
pub use output::{OutputFormat, OutputFormatter, ProviderSummary};
