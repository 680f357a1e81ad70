//! Typed kiosk configuration
//!
//! Built once at startup from the [`ConfigStore`]. Every required key is
//! resolved and every value validated here, so rendering never performs a
//! string-keyed lookup that could fail mid-request.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::error::ConfigError;
use super::store::ConfigStore;
use crate::common::CssValue;
use crate::constants::config::{BUTTON_SECTION_PREFIX, GENERAL_SECTION, button, general};

/// Page-wide settings from the `General` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSettings {
    pub title: String,
    /// Image shown above the title; `None` when not configured
    pub logo: Option<PathBuf>,
    pub columns: NonZeroUsize,
    pub button_height: CssValue,
    pub input_label: String,
    pub go_back_caption: String,
    pub list_label: String,
}

/// One navigation button from a `Button<i>` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    /// 1-based section number
    pub number: usize,
    pub label: String,
    pub code: String,
    pub color: CssValue,
    pub background: CssValue,
    pub font_size: CssValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskConfig {
    pub general: GeneralSettings,
    /// Buttons in section-number order
    pub buttons: Vec<ButtonSpec>,
}

impl KioskConfig {
    /// Load and validate the configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let store = ConfigStore::load(path)?;
        Self::from_store(&store)
    }

    pub fn from_store(store: &ConfigStore) -> Result<Self, ConfigError> {
        let general = parse_general(store)?;
        let buttons = parse_buttons(store)?;

        info!(
            title = %general.title,
            columns = general.columns.get(),
            buttons = buttons.len(),
            "Validated kiosk configuration"
        );
        Ok(Self { general, buttons })
    }

    /// Label of the button routing to `code`.
    /// Linear scan; button counts are small and static.
    pub fn label_for(&self, code: &str) -> Option<&str> {
        self.buttons
            .iter()
            .find(|b| b.code == code)
            .map(|b| b.label.as_str())
    }
}

fn parse_general(store: &ConfigStore) -> Result<GeneralSettings, ConfigError> {
    let get = |key: &str| store.get(GENERAL_SECTION, key).map(str::to_string);

    let columns_raw = store.get(GENERAL_SECTION, general::COLUMNS)?;
    let columns = columns_raw
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            ConfigError::invalid(
                GENERAL_SECTION,
                general::COLUMNS,
                format!("expected a whole number >= 1, got \"{columns_raw}\""),
            )
        })?;

    let logo = store.get(GENERAL_SECTION, general::LOGO)?;
    let logo = (!logo.is_empty()).then(|| PathBuf::from(logo));

    Ok(GeneralSettings {
        title: get(general::TITLE)?,
        logo,
        columns,
        button_height: css_value(store, GENERAL_SECTION, general::BUTTON_HEIGHT)?,
        input_label: get(general::INPUT_LABEL)?,
        go_back_caption: get(general::GO_BACK_CAPTION)?,
        list_label: get(general::LIST_LABEL)?,
    })
}

fn parse_buttons(store: &ConfigStore) -> Result<Vec<ButtonSpec>, ConfigError> {
    let mut numbers: Vec<usize> = Vec::new();
    for name in store.section_names() {
        if name == GENERAL_SECTION {
            continue;
        }
        match button_number(name) {
            Some(number) => numbers.push(number),
            None => warn!(section = %name, "Ignoring unrecognized configuration section"),
        }
    }
    numbers.sort_unstable();

    // Sorted and unique (duplicate sections are rejected by the store), so
    // contiguity from 1 means numbers[i] == i + 1
    if let Some(gap) = numbers.iter().enumerate().find(|(i, n)| **n != i + 1) {
        return Err(ConfigError::ButtonNumbering {
            missing: format!("{BUTTON_SECTION_PREFIX}{}", gap.0 + 1),
        });
    }

    let mut buttons: Vec<ButtonSpec> = Vec::with_capacity(numbers.len());
    for number in numbers {
        let section = format!("{BUTTON_SECTION_PREFIX}{number}");
        let code = store.get(&section, button::CODE)?.to_string();

        if code.is_empty() {
            return Err(ConfigError::invalid(&section, button::CODE, "code must not be empty"));
        }
        if let Some(other) = buttons.iter().find(|b| b.code == code) {
            return Err(ConfigError::invalid(
                &section,
                button::CODE,
                format!("code \"{code}\" is already used by [{BUTTON_SECTION_PREFIX}{}]", other.number),
            ));
        }

        buttons.push(ButtonSpec {
            number,
            label: store.get(&section, button::LABEL)?.to_string(),
            code,
            color: css_value(store, &section, button::COLOR)?,
            background: css_value(store, &section, button::BACKGROUND)?,
            font_size: css_value(store, &section, button::FONT_SIZE)?,
        });
    }

    Ok(buttons)
}

/// `Button<n>` with a canonical decimal `n >= 1`
fn button_number(section: &str) -> Option<usize> {
    let digits = section.strip_prefix(BUTTON_SECTION_PREFIX)?;
    let number = digits.parse::<usize>().ok().filter(|n| *n >= 1)?;
    (number.to_string() == digits).then_some(number)
}

fn css_value(store: &ConfigStore, section: &str, key: &str) -> Result<CssValue, ConfigError> {
    let raw = store.get(section, key)?;
    CssValue::parse(raw).ok_or_else(|| {
        ConfigError::invalid(section, key, format!("\"{raw}\" is not a usable CSS value"))
    })
}
