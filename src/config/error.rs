use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating the kiosk configuration.
///
/// Every variant is fatal at startup: the page cannot render without a
/// complete configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration: {message}")]
    Parse { message: String },

    #[error("Missing section [{section}]")]
    MissingSection { section: String },

    #[error("Missing key \"{key}\" in section [{section}]")]
    MissingKey { section: String, key: String },

    #[error("Section [{section}] appears more than once")]
    DuplicateSection { section: String },

    #[error("Button sections must be numbered from 1 without gaps: [{missing}] is missing")]
    ButtonNumbering { missing: String },

    #[error("Invalid value for \"{key}\" in section [{section}]: {reason}")]
    Invalid {
        section: String,
        key: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_display() {
        let e = ConfigError::MissingKey {
            section: "General".to_string(),
            key: "title".to_string(),
        };
        assert_eq!(e.to_string(), r#"Missing key "title" in section [General]"#);
    }

    #[test]
    fn test_invalid_display() {
        let e = ConfigError::invalid("General", "columns", "expected a whole number >= 1, got \"zero\"");
        assert_eq!(
            e.to_string(),
            r#"Invalid value for "columns" in section [General]: expected a whole number >= 1, got "zero""#
        );
    }

    #[test]
    fn test_missing_section_display() {
        let e = ConfigError::MissingSection {
            section: "General".to_string(),
        };
        assert_eq!(e.to_string(), "Missing section [General]");
    }
}
