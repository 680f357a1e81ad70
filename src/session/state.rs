//! Per-browser kiosk state
//!
//! Holds the active code, the captured records and the cached page origin
//! for one browser session. Nothing here outlives the session.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

use crate::kiosk::View;

/// One submitted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Code that was active when the value was submitted
    pub code: String,
    pub value: String,
    pub captured_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct SessionState {
    /// Empty on the Home view
    selected_code: String,
    /// `None` until the first Capture view, dropped again on go back
    records: Option<Vec<Record>>,
    /// Page origin, detected on the first request and reused for links
    origin: Option<String>,
    last_seen: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            selected_code: String::new(),
            records: None,
            origin: None,
            last_seen: Instant::now(),
        }
    }

    /// Page load: derive the view from the `code` parameter
    pub fn enter(&mut self, code: Option<&str>) -> View {
        let view = View::from_code_param(code);
        self.selected_code = view.code().unwrap_or_default().to_string();

        if let View::Capture { code } = &view
            && self.records.is_none()
        {
            debug!(code = %code, "Starting record list");
            self.records = Some(Vec::new());
        }

        view
    }

    pub fn view(&self) -> View {
        View::from_code_param(Some(&self.selected_code))
    }

    /// Append a submitted value under the active code.
    /// Ignored on the Home view and for empty submissions.
    pub fn submit(&mut self, value: &str) -> Option<&Record> {
        if self.selected_code.is_empty() || value.is_empty() {
            return None;
        }

        let records = self.records.get_or_insert_with(Vec::new);
        records.push(Record {
            code: self.selected_code.clone(),
            value: value.to_string(),
            captured_at: Local::now(),
        });
        records.last()
    }

    /// Leave the Capture view: the record list is discarded
    pub fn go_back(&mut self) {
        self.records = None;
        self.selected_code.clear();
    }

    /// Records in submission order
    pub fn records(&self) -> &[Record] {
        self.records.as_deref().unwrap_or_default()
    }

    /// Cached origin, detecting it on first use
    pub fn origin_or_detect(&mut self, detect: impl FnOnce() -> String) -> &str {
        self.origin.get_or_insert_with(detect)
    }

    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_seen = now;
    }

    pub(crate) fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }
}
