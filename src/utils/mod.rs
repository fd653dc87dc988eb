//! Utility modules for browser I/O, DOM, timers and formatting.
//!
//! Provides:
//! - [`BrowserTransport`] - Fetch-backed gateway transport with timeout
//! - [`TaskHandle`] - Cancellable interval/timeout owned by a view scope
//! - [`QueryString`] - Percent-encoded query construction
//! - [`format`] - Number, date, size and currency display helpers

pub mod dom;
mod fetch;
pub mod format;
mod timer;
mod url;

pub use fetch::{BrowserTransport, RaceResult, race_with_timeout, read_file};
pub use timer::TaskHandle;
pub use url::{QueryString, encode_component};
