use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::EditorConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl EditorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// - If the file doesn't exist, returns `EditorConfig::default()`.
    /// - Otherwise parses and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The mailbox can hold at least one request
    /// - The redirect target is an absolute in-app path
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "mailbox_size must be greater than zero".to_string(),
            });
        }

        if !self.redirect_path.starts_with('/') {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "redirect_path must start with '/', got '{}'",
                    self.redirect_path
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.messages.post_updated, "Post was updated!");
    }

    #[test]
    fn partial_messages_keep_other_defaults() {
        let config = EditorConfig::from_toml_str(
            r#"
            redirect_path = "/home"

            [messages]
            post_updated = "Saved."
            "#,
        )
        .unwrap();
        assert_eq!(config.redirect_path, "/home");
        assert_eq!(config.messages.post_updated, "Saved.");
        assert_eq!(
            config.messages.permission_denied,
            "You do not have permission to edit this post."
        );
    }

    #[test]
    fn zero_mailbox_is_rejected() {
        let err = EditorConfig::from_toml_str("mailbox_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn relative_redirect_is_rejected() {
        let err = EditorConfig::from_toml_str("redirect_path = \"home\"").unwrap_err();
        assert!(err.to_string().contains("redirect_path"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EditorConfig::from_toml_str("mailbox_size = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = EditorConfig::load("/nonexistent/post-editor/config.toml").unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
