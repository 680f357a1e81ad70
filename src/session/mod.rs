//! Session-scoped state
//!
//! Every browser gets its own [`SessionState`] (active code, records, page
//! origin), kept in a [`SessionStore`] keyed by a cookie-carried id.

mod state;
mod store;

pub use state::{Record, SessionState};
pub use store::{SessionAccess, SessionError, SessionId, SessionStore};
