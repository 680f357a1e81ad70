//! Askama page templates

use askama::Template;

use crate::kiosk::{ButtonGrid, CaptureScreen};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage<'a> {
    pub title: &'a str,
    pub show_logo: bool,
    /// Scoped `.button-<i>` rules, one per button
    pub style_rules: String,
    pub grid: &'a ButtonGrid,
}

#[derive(Template)]
#[template(path = "capture.html")]
pub struct CapturePage<'a> {
    pub title: &'a str,
    pub show_logo: bool,
    pub screen: &'a CaptureScreen,
}
