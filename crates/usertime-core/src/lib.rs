pub mod config;
pub mod error;
pub mod page;
pub mod schedule;
pub mod system;
pub mod time_of_day;
pub mod updater;

pub use config::UpdaterConfig;
pub use error::CoreError;
pub use page::Page;
pub use schedule::{Schedule, TickOutcome, TickStats};
pub use system::{Clock, Document, Element, FixedClock, SystemClock};
pub use time_of_day::TimeOfDay;
pub use updater::{DisplayTarget, TimeDisplayUpdater, DEFAULT_TARGET_ID};
