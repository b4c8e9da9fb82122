//! Host capabilities consumed by the display updater.
//!
//! The updater never touches the wall clock or the page directly. Both are
//! injected so a host (a browser shim, the CLI page host, a test) decides
//! where time comes from and where the text lands.

pub mod clock;
pub mod document;

pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{Document, Element};
