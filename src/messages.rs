//! User-facing message table
//!
//! Messages live in a two-level YAML map (`category` → `key` → text) with
//! `{name}` placeholders. The built-in table is embedded at compile time; a
//! user file can replace it. The catalog is an ordinary value handed to the
//! CLI handlers.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_MESSAGES: &str = include_str!("../resources/messages.yml");

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("failed to read message file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid message table: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: BTreeMap<String, BTreeMap<String, String>>,
}

impl MessageCatalog {
    /// The message table shipped with the binary.
    pub fn builtin() -> Result<Self, MessageError> {
        Self::from_yaml(BUILTIN_MESSAGES)
    }

    pub fn from_yaml(content: &str) -> Result<Self, MessageError> {
        let messages = serde_yaml::from_str(content)?;
        Ok(Self { messages })
    }

    pub fn from_file(path: &Path) -> Result<Self, MessageError> {
        let content = fs::read_to_string(path).map_err(|source| MessageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Loads `path` when given, the built-in table otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, MessageError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Looks up a message without substitution.
    pub fn get(&self, category: &str, key: &str) -> String {
        self.format(category, key, &[])
    }

    /// Looks up a message and replaces each `{name}` placeholder.
    ///
    /// A missing entry yields `Message not found for <category>.<key>`
    /// instead of an error.
    pub fn format(&self, category: &str, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.messages.get(category).and_then(|c| c.get(key)) else {
            return format!("Message not found for {}.{}", category, key);
        };

        // Single pass: substituted values are never scanned again.
        let Ok(placeholder) = Regex::new(r"\{(\w+)\}") else {
            return template.clone();
        };
        placeholder
            .replace_all(template, |caps: &Captures| {
                args.iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
            })
            .into_owned()
    }
}
