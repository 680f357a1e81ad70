//! Navigation button grid
//!
//! Lays the configured buttons out row-major in a fixed number of columns.
//! Trailing cells of the last row stay empty. Every button carries its own
//! style rule, scoped by a unique class name.

use crate::config::{ButtonSpec, ConfigError, KioskConfig};
use crate::constants::config::{GENERAL_SECTION, general};
use crate::constants::display::BUTTON_CLASS_PREFIX;
use crate::common::CssValue;

use super::view::capture_href;

/// A rendered navigation link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    /// `button-<i>`, 0-based in configuration order
    pub class_name: String,
    pub label: String,
    pub href: String,
    /// Style rule applying this button's colors and sizes
    pub style_rule: String,
}

impl NavButton {
    pub fn new(index: usize, spec: &ButtonSpec, origin: &str, height: &CssValue) -> Self {
        let class_name = format!("{BUTTON_CLASS_PREFIX}{index}");
        let style_rule = format!(
            ".{class_name} {{ color: {}; background: {}; height: {}; font-size: {}; width: 100%; }}",
            spec.color, spec.background, height, spec.font_size
        );

        Self {
            href: capture_href(origin, &spec.code),
            label: spec.label.clone(),
            class_name,
            style_rule,
        }
    }
}

pub type GridRow = Vec<Option<NavButton>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonGrid {
    pub columns: usize,
    pub rows: Vec<GridRow>,
}

impl ButtonGrid {
    /// Build the grid for the configured buttons, linking under `origin`
    pub fn build(config: &KioskConfig, origin: &str) -> Result<Self, ConfigError> {
        let columns = config.general.columns.get();
        let buttons: Vec<NavButton> = config
            .buttons
            .iter()
            .enumerate()
            .map(|(i, spec)| NavButton::new(i, spec, origin, &config.general.button_height))
            .collect();

        Ok(Self {
            columns,
            rows: layout_rows(buttons, columns)?,
        })
    }

    pub fn button_count(&self) -> usize {
        self.buttons().count()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &NavButton> {
        self.rows.iter().flatten().flatten()
    }

    /// All style rules, one per line
    pub fn style_rules(&self) -> String {
        self.buttons()
            .map(|b| b.style_rule.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Arrange `items` into `ceil(len / columns)` rows of exactly `columns`
/// cells, padding the last row with `None`.
///
/// `columns` must be at least 1.
pub fn layout_rows<T>(items: Vec<T>, columns: usize) -> Result<Vec<Vec<Option<T>>>, ConfigError> {
    if columns == 0 {
        return Err(ConfigError::invalid(
            GENERAL_SECTION,
            general::COLUMNS,
            "column count must be at least 1",
        ));
    }

    let mut rows: Vec<Vec<Option<T>>> = Vec::with_capacity(items.len().div_ceil(columns));
    let mut current: Vec<Option<T>> = Vec::with_capacity(columns);
    for item in items {
        current.push(Some(item));
        if current.len() == columns {
            rows.push(std::mem::replace(&mut current, Vec::with_capacity(columns)));
        }
    }
    if !current.is_empty() {
        current.resize_with(columns, || None);
        rows.push(current);
    }

    Ok(rows)
}
