//! Capture screen
//!
//! Everything the capture page shows for one code: the button label as
//! heading, the configured captions and the session's records.

use tracing::warn;

use crate::config::KioskConfig;
use crate::constants::display::{RECORD_TIME_FORMAT, UNKNOWN_CODE_LABEL};
use crate::session::Record;

/// A record as listed on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLine {
    pub code: String,
    pub value: String,
    pub time: String,
}

impl From<&Record> for RecordLine {
    fn from(record: &Record) -> Self {
        Self {
            code: record.code.clone(),
            value: record.value.clone(),
            time: record.captured_at.format(RECORD_TIME_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureScreen {
    pub code: String,
    pub heading: String,
    /// False when no button is configured for `code`
    pub known_code: bool,
    pub input_label: String,
    pub go_back_caption: String,
    pub list_label: String,
    pub records: Vec<RecordLine>,
}

impl CaptureScreen {
    pub fn build(config: &KioskConfig, code: &str, records: &[Record]) -> Self {
        let (heading, known_code) = match config.label_for(code) {
            Some(label) => (label.to_string(), true),
            None => {
                warn!(code = %code, "No button configured for code, using placeholder heading");
                (format!("{UNKNOWN_CODE_LABEL}: {code}"), false)
            }
        };

        Self {
            code: code.to_string(),
            heading,
            known_code,
            input_label: config.general.input_label.clone(),
            go_back_caption: config.general.go_back_caption.clone(),
            list_label: config.general.list_label.clone(),
            records: records.iter().map(RecordLine::from).collect(),
        }
    }
}
