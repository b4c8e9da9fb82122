use log::trace;

use crate::error::CoreError;
use crate::system::{Clock, Document};
use crate::time_of_day::TimeOfDay;

/// Identifier of the element the page provides for the time display.
pub const DEFAULT_TARGET_ID: &str = "user-time";

/// Non-owning reference to the display element, by identifier.
///
/// The page owns the element; the target is resolved afresh on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTarget {
    id: String,
}

impl DisplayTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Default for DisplayTarget {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_ID)
    }
}

/// Writes the current time of day, in milliseconds, into the display target.
///
/// Holds no state between ticks besides the target identifier and the clock
/// capability.
#[derive(Debug, Clone)]
pub struct TimeDisplayUpdater<C> {
    target: DisplayTarget,
    clock: C,
}

impl<C: Clock> TimeDisplayUpdater<C> {
    pub fn new(target: DisplayTarget, clock: C) -> Self {
        Self { target, clock }
    }

    pub fn target(&self) -> &DisplayTarget {
        &self.target
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time of day from a fresh clock read.
    pub fn current_value(&self) -> TimeOfDay {
        TimeOfDay::from_time(&self.clock.now())
    }

    /// Resolve the target, read the clock, and set the target's text to the
    /// decimal milliseconds since midnight.
    ///
    /// Fails with [`CoreError::Lookup`] if the target is absent; nothing is
    /// written in that case. Returns the value that was rendered.
    pub fn tick<D: Document + ?Sized>(&self, document: &mut D) -> Result<TimeOfDay, CoreError> {
        let element = document.require_element(self.target.id())?;
        let value = self.current_value();
        element.set_text_content(value.to_string());
        trace!("#{} <- {value}", self.target.id());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use crate::system::FixedClock;
    use chrono::TimeDelta;

    fn page() -> Page {
        Page::new()
            .with_element(DEFAULT_TARGET_ID, "span")
            .with_element("greeting", "h1")
    }

    #[test]
    fn tick_writes_milliseconds_since_midnight() {
        let mut page = page();
        let updater = TimeDisplayUpdater::new(
            DisplayTarget::default(),
            FixedClock::from_hms_milli(14, 5, 9, 250).unwrap(),
        );
        let value = updater.tick(&mut page).unwrap();
        assert_eq!(value.as_millis(), 50_709_250);
        assert_eq!(page.text_of(DEFAULT_TARGET_ID), Some("50709250"));
    }

    #[test]
    fn tick_at_day_bounds() {
        let mut page = page();
        let clock = FixedClock::from_hms_milli(23, 59, 59, 999).unwrap();
        let updater = TimeDisplayUpdater::new(DisplayTarget::default(), &clock);
        updater.tick(&mut page).unwrap();
        assert_eq!(page.text_of(DEFAULT_TARGET_ID), Some("86399999"));

        clock.advance(TimeDelta::milliseconds(1));
        updater.tick(&mut page).unwrap();
        assert_eq!(page.text_of(DEFAULT_TARGET_ID), Some("0"));
    }

    #[test]
    fn frozen_clock_gives_identical_text() {
        let mut page = page();
        let updater = TimeDisplayUpdater::new(
            DisplayTarget::default(),
            FixedClock::from_hms_milli(8, 30, 0, 1).unwrap(),
        );
        updater.tick(&mut page).unwrap();
        let first = page.text_of(DEFAULT_TARGET_ID).unwrap().to_string();
        updater.tick(&mut page).unwrap();
        assert_eq!(page.text_of(DEFAULT_TARGET_ID), Some(first.as_str()));
    }

    #[test]
    fn later_tick_same_day_is_greater() {
        let mut page = page();
        let clock = FixedClock::from_hms_milli(0, 0, 0, 0).unwrap();
        let updater = TimeDisplayUpdater::new(DisplayTarget::default(), &clock);
        let mut previous = updater.tick(&mut page).unwrap();
        for step in [1, 49, 50, 999, 60_000, 3_600_000] {
            clock.advance(TimeDelta::milliseconds(step));
            let next = updater.tick(&mut page).unwrap();
            assert!(next > previous, "{next} should exceed {previous}");
            previous = next;
        }
    }

    #[test]
    fn missing_target_is_lookup_error_and_writes_nothing() {
        let mut page = Page::new().with_element("greeting", "h1");
        let updater = TimeDisplayUpdater::new(
            DisplayTarget::default(),
            FixedClock::from_hms_milli(12, 0, 0, 0).unwrap(),
        );
        let err = updater.tick(&mut page).unwrap_err();
        assert!(err.is_lookup());
        assert_eq!(err.to_string(), "no element with id \"user-time\" in the page");
        assert_eq!(page.text_of("greeting"), Some(""));
    }

    #[test]
    fn custom_target() {
        let mut page = page();
        let updater = TimeDisplayUpdater::new(
            DisplayTarget::new("greeting"),
            FixedClock::from_hms_milli(0, 0, 1, 0).unwrap(),
        );
        updater.tick(&mut page).unwrap();
        assert_eq!(page.text_of("greeting"), Some("1000"));
        assert_eq!(page.text_of(DEFAULT_TARGET_ID), Some(""));
    }
}
