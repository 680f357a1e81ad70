//! Application-wide constants
//!
//! Section names, configuration keys, HTTP surface names and default
//! values used throughout the kiosk, kept in one place.

/// Configuration file layout
pub mod config {
    /// Application directory name under the platform config dir
    pub const APP_DIR: &str = "scan-kiosk";

    /// Configuration filename (looked up in the working directory first)
    pub const FILENAME: &str = "config.ini";

    /// Section holding page-wide settings
    pub const GENERAL_SECTION: &str = "General";

    /// Prefix of the per-button sections (`Button1`, `Button2`, ...)
    pub const BUTTON_SECTION_PREFIX: &str = "Button";

    /// Keys of the `General` section
    pub mod general {
        pub const TITLE: &str = "title";
        pub const LOGO: &str = "logo";
        pub const COLUMNS: &str = "columns";
        pub const BUTTON_HEIGHT: &str = "button_height";
        pub const INPUT_LABEL: &str = "input_label";
        pub const GO_BACK_CAPTION: &str = "go_back_btn_caption";
        pub const LIST_LABEL: &str = "list_label";
    }

    /// Keys of each `Button<i>` section
    pub mod button {
        pub const LABEL: &str = "label";
        pub const CODE: &str = "code";
        pub const COLOR: &str = "color";
        pub const BACKGROUND: &str = "background";
        pub const FONT_SIZE: &str = "font_size";
    }
}

/// Default configuration values
/// Used by the store when a key is absent from the file
pub mod defaults {
    /// Height applied to every navigation button
    pub const BUTTON_HEIGHT: &str = "50px";

    /// Button background when a section leaves it out
    pub const BUTTON_BACKGROUND: &str = "transparent";

    /// Button label size when a section leaves it out
    pub const BUTTON_FONT_SIZE: &str = "14px";

    /// No logo is shown unless configured
    pub const LOGO: &str = "";

    /// Listen address of the HTTP server
    pub const BIND_ADDR: &str = "0.0.0.0:8501";

    /// Sessions untouched for this long are dropped from the store
    pub const SESSION_IDLE_MINUTES: u64 = 720;

    /// Upper bound on concurrently stored sessions
    pub const MAX_SESSIONS: usize = 1024;
}

/// HTTP surface
pub mod http {
    /// Query parameter selecting the capture view
    pub const CODE_PARAM: &str = "code";

    /// Cookie carrying the session identifier
    pub const SESSION_COOKIE: &str = "kiosk_session";

    /// Header set by reverse proxies terminating TLS
    pub const FORWARDED_PROTO: &str = "x-forwarded-proto";

    /// Scheme assumed when no proxy header is present
    pub const DEFAULT_SCHEME: &str = "http";
}

/// Display strings
pub mod display {
    /// Heading shown when the active code matches no button
    pub const UNKNOWN_CODE_LABEL: &str = "Unknown code";

    /// Class name prefix for navigation buttons (`button-0`, `button-1`, ...)
    pub const BUTTON_CLASS_PREFIX: &str = "button-";

    /// Format of the capture timestamp shown next to each record
    pub const RECORD_TIME_FORMAT: &str = "%H:%M:%S";
}
