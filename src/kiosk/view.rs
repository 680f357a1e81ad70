//! View selection
//!
//! The page is a two-state machine derived from the `code` query parameter
//! on every load: no code means Home, any other value means Capture.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::constants::http::CODE_PARAM;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Capture { code: String },
}

impl View {
    /// Derive the view from the `code` parameter (absent or empty → Home)
    pub fn from_code_param(code: Option<&str>) -> Self {
        match code {
            Some(code) if !code.is_empty() => View::Capture {
                code: code.to_string(),
            },
            _ => View::Home,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            View::Home => None,
            View::Capture { code } => Some(code),
        }
    }

    /// Absolute link to this view under `origin`
    pub fn href(&self, origin: &str) -> String {
        match self {
            View::Home if origin.is_empty() => "/".to_string(),
            View::Home => origin.to_string(),
            View::Capture { code } => capture_href(origin, code),
        }
    }
}

/// `<origin>?code=<code>`, with the code percent-encoded
pub fn capture_href(origin: &str, code: &str) -> String {
    format!(
        "{origin}?{CODE_PARAM}={}",
        utf8_percent_encode(code, NON_ALPHANUMERIC)
    )
}
