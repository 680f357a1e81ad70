//! Section-based key/value configuration store
//!
//! Wraps the INI file as an ordered list of sections. Lookups go through
//! `get`, which falls back to the built-in defaults and reports a
//! `MissingKey` error when neither the file nor the defaults provide a value.

use std::fs;
use std::path::Path;

use ini::{Ini, ParseOption};
use tracing::{debug, info};

use super::error::ConfigError;
use crate::constants::config::{BUTTON_SECTION_PREFIX, GENERAL_SECTION, button, general};
use crate::constants::defaults;

/// One `[Name]` block of the file, keys normalized to lower case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// Raw value of `key` as written in the file (no defaults applied)
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    sections: Vec<Section>,
}

impl ConfigStore {
    /// Read and parse the configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::parse(&contents)?;
        info!(path = ?path, sections = store.sections.len(), "Loaded configuration");
        Ok(store)
    }

    /// Parse INI text. Quotes and backslashes are kept literally so that
    /// Windows paths and CSS values survive untouched.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let option = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(contents, option).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        let mut sections: Vec<Section> = Vec::new();
        for (name, properties) in ini.iter() {
            let Some(name) = name else {
                if properties.iter().next().is_some() {
                    return Err(ConfigError::Parse {
                        message: "entries found before the first [section] header".to_string(),
                    });
                }
                continue;
            };

            if sections.iter().any(|s| s.name == name) {
                return Err(ConfigError::DuplicateSection {
                    section: name.to_string(),
                });
            }

            let mut entries: Vec<(String, String)> = Vec::new();
            for (key, value) in properties.iter() {
                let key = key.trim().to_lowercase();
                if entries.iter().any(|(k, _)| *k == key) {
                    return Err(ConfigError::Parse {
                        message: format!("key \"{key}\" repeated in section [{name}]"),
                    });
                }
                entries.push((key, value.trim().to_string()));
            }

            debug!(section = %name, keys = entries.len(), "Parsed configuration section");
            sections.push(Section {
                name: name.to_string(),
                entries,
            });
        }

        Ok(Self { sections })
    }

    /// Section names in file order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Value of `key` in `section`, falling back to the built-in default
    pub fn get(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        let found = self.section(section).ok_or_else(|| ConfigError::MissingSection {
            section: section.to_string(),
        })?;

        found
            .get(key)
            .or_else(|| default_for(section, key))
            .ok_or_else(|| ConfigError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }
}

/// Built-in default for a key, if it has one
fn default_for(section: &str, key: &str) -> Option<&'static str> {
    if section == GENERAL_SECTION {
        return match key {
            general::BUTTON_HEIGHT => Some(defaults::BUTTON_HEIGHT),
            general::LOGO => Some(defaults::LOGO),
            _ => None,
        };
    }

    if section.starts_with(BUTTON_SECTION_PREFIX) {
        return match key {
            button::BACKGROUND => Some(defaults::BUTTON_BACKGROUND),
            button::FONT_SIZE => Some(defaults::BUTTON_FONT_SIZE),
            _ => None,
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
[General]
title = Warehouse Scanner
logo = C:\\kiosk\\logo.png
Columns = 2

[Button1]
label = Widget A
code = A123
color = white

[Button2]
label: Widget B
code: B456
color: #333333
background = #FFCC00
";

    #[test]
    fn test_parse_preserves_section_order() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        let names: Vec<&str> = store.section_names().collect();
        assert_eq!(names, vec!["General", "Button1", "Button2"]);
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("General", "columns").unwrap(), "2");
        assert_eq!(store.get("General", "COLUMNS").unwrap(), "2");
    }

    #[test]
    fn test_backslashes_kept_literally() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("General", "logo").unwrap(), "C:\\kiosk\\logo.png");
    }

    #[test]
    fn test_colon_delimiter() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("Button2", "label").unwrap(), "Widget B");
    }

    #[test]
    fn test_get_falls_back_to_defaults() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get("General", "button_height").unwrap(), "50px");
        assert_eq!(store.get("Button1", "background").unwrap(), "transparent");
        assert_eq!(store.get("Button1", "font_size").unwrap(), "14px");
        // Explicit value wins over the default
        assert_eq!(store.get("Button2", "background").unwrap(), "#FFCC00");
    }

    #[test]
    fn test_get_missing_key() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        let err = store.get("General", "input_label").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingKey { ref section, ref key } if section == "General" && key == "input_label"
        ));
    }

    #[test]
    fn test_get_missing_section() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        let err = store.get("Button9", "label").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection { ref section } if section == "Button9"));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let text = "[General]\ntitle = A\n\n[Button1]\ncode = X\n\n[General]\ntitle = B\n";
        let err = ConfigStore::parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSection { ref section } if section == "General"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = ConfigStore::parse("[General]\ntitle = A\nTitle = B\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref message } if message.contains("\"title\" repeated")));
    }

    #[test]
    fn test_entries_before_first_section_rejected() {
        let err = ConfigStore::parse("title = orphan\n[General]\ncolumns = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = ConfigStore::load(file.path()).unwrap();
        assert_eq!(store.get("General", "title").unwrap(), "Warehouse Scanner");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigStore::load(&dir.path().join("absent.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
