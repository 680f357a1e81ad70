//! Shared helpers used by the configuration and rendering layers

pub mod style;

pub use style::CssValue;
