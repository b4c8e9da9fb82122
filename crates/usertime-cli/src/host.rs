//! Wiring between CLI arguments and the core updater.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, NaiveTime};
use usertime_core::{Clock, FixedClock, Page, SystemClock, TimeDisplayUpdater, UpdaterConfig};

/// Page used when `--page` is not given.
pub const BUILTIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <p>Milliseconds since midnight: <span id="user-time"></span></p>
</body>
</html>
"#;

/// Either the real clock or a frozen one from `--at`.
#[derive(Debug)]
pub enum HostClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl Clock for HostClock {
    fn now(&self) -> NaiveDateTime {
        match self {
            HostClock::System(clock) => clock.now(),
            HostClock::Fixed(clock) => clock.now(),
        }
    }
}

/// Resolved inputs for one host run.
#[derive(Debug, Default)]
pub struct HostOptions {
    pub page: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub target: Option<String>,
    pub period_ms: Option<u64>,
    pub ticks: Option<u64>,
    pub at: Option<NaiveTime>,
}

/// Everything a run needs: effective config, the page, and the updater.
pub struct Host {
    pub config: UpdaterConfig,
    pub page: Page,
    pub updater: TimeDisplayUpdater<HostClock>,
}

impl Host {
    pub fn prepare(options: HostOptions) -> Result<Self> {
        let mut config = match &options.config {
            Some(path) => UpdaterConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => UpdaterConfig::default(),
        };
        config.apply_overrides(options.target, options.period_ms, options.ticks);
        config.validate()?;

        let page = match &options.page {
            Some(path) => {
                Page::load(path).with_context(|| format!("loading page {}", path.display()))?
            }
            None => Page::parse(BUILTIN_PAGE),
        };
        log::debug!("page has {} addressable elements", page.len());

        let clock = match options.at {
            Some(time) => HostClock::Fixed(FixedClock::at_time(time)),
            None => HostClock::System(SystemClock),
        };
        let updater = TimeDisplayUpdater::new(config.target(), clock);

        Ok(Self {
            config,
            page,
            updater,
        })
    }
}

/// Parse `HH:MM:SS` with an optional fractional part (`HH:MM:SS.mmm`).
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .map_err(|e| format!("expected HH:MM:SS[.mmm], got {s:?}: {e}"))
}
