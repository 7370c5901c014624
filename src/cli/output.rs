//! Output formatting for the `providers` listing
//!
//! JSON and YAML are meant for scripts; the human format is a short table.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::messages::MessageCatalog;
use crate::provider::{CiProvider, ProviderRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// One registered provider as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSummary {
    pub language: String,
    pub display_name: String,
    pub version: String,
    pub detect: Vec<String>,
}

impl ProviderSummary {
    pub fn from_provider(provider: &dyn CiProvider) -> Self {
        Self {
            language: provider.id().key().to_string(),
            display_name: provider.display_name(),
            version: provider.default_version(),
            detect: provider.manifest_files(),
        }
    }
}

pub struct OutputFormatter<'a> {
    format: OutputFormat,
    messages: &'a MessageCatalog,
}

impl<'a> OutputFormatter<'a> {
    pub fn new(format: OutputFormat, messages: &'a MessageCatalog) -> Self {
        Self { format, messages }
    }

    /// Formats the registry contents in detection order.
    pub fn format_providers(&self, registry: &ProviderRegistry) -> Result<String> {
        let summaries: Vec<ProviderSummary> = registry
            .providers()
            .map(ProviderSummary::from_provider)
            .collect();

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&summaries)
                .context("Failed to serialize providers to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&summaries).context("Failed to serialize providers to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(&summaries)),
        }
    }

    fn format_human(&self, summaries: &[ProviderSummary]) -> String {
        if summaries.is_empty() {
            return self.messages.get("info", "no_providers");
        }

        let key_width = summaries
            .iter()
            .map(|s| s.language.len())
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        output.push_str(&self.messages.get("info", "providers_header"));
        output.push('\n');
        for summary in summaries {
            output.push_str(&format!(
                "  {:width$}  {} {} ({})\n",
                summary.language,
                summary.display_name,
                summary.version,
                summary.detect.join(", "),
                width = key_width
            ));
        }
        output
    }
}
