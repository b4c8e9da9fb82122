//! Periodic registration of the display update.
//!
//! The schedule owns no state of its own between runs. It drives
//! [`TimeDisplayUpdater::tick`] from a tokio interval on the caller's task:
//! the tick itself is synchronous and never spawns. The first tick comes one
//! full period after the run starts. Periods missed under load are skipped
//! rather than replayed in a burst, and drift is not corrected.

use std::future::{self, Future};
use std::time::Duration;

use log::{debug, error, info};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::UpdaterConfig;
use crate::error::CoreError;
use crate::system::{Clock, Document};
use crate::time_of_day::TimeOfDay;
use crate::updater::TimeDisplayUpdater;

/// Result of a single tick, handed to the run observer.
#[derive(Debug)]
pub enum TickOutcome {
    Updated(TimeOfDay),
    Failed(CoreError),
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub ticks: u64,
    pub failures: u64,
}

impl TickStats {
    pub fn successes(&self) -> u64 {
        self.ticks - self.failures
    }
}

/// Fixed-period timer for the display update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    period: Duration,
    max_ticks: Option<u64>,
}

impl Schedule {
    /// A schedule with no tick limit. A zero period is a
    /// [`CoreError::Config`].
    pub fn new(period: Duration) -> Result<Self, CoreError> {
        if period.is_zero() {
            return Err(CoreError::Config {
                message: "schedule period must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            period,
            max_ticks: None,
        })
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Validates `config` first; see [`UpdaterConfig::validate`].
    pub fn from_config(config: &UpdaterConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            period: config.period(),
            max_ticks: config.max_ticks,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn max_ticks(&self) -> Option<u64> {
        self.max_ticks
    }

    /// Run until the tick limit, or forever without one.
    pub async fn run<C, D, F>(
        &self,
        updater: &TimeDisplayUpdater<C>,
        document: &mut D,
        observer: F,
    ) -> TickStats
    where
        C: Clock,
        D: Document + ?Sized,
        F: FnMut(&TickOutcome, &D),
    {
        self.run_until(updater, document, observer, future::pending::<()>())
            .await
    }

    /// Tick once per period, starting one period from now, until the tick
    /// limit is hit or `shutdown` resolves.
    ///
    /// A failed tick is logged and counted; the next period ticks again.
    pub async fn run_until<C, D, F, S>(
        &self,
        updater: &TimeDisplayUpdater<C>,
        document: &mut D,
        mut observer: F,
        shutdown: S,
    ) -> TickStats
    where
        C: Clock,
        D: Document + ?Sized,
        F: FnMut(&TickOutcome, &D),
        S: Future<Output = ()>,
    {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        debug!(
            "updating #{} every {:?} (limit: {:?})",
            updater.target().id(),
            self.period,
            self.max_ticks
        );

        let mut stats = TickStats::default();
        loop {
            if self.max_ticks.is_some_and(|max| stats.ticks >= max) {
                break;
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested after {} ticks", stats.ticks);
                    break;
                }
                _ = interval.tick() => {}
            }

            let outcome = match updater.tick(&mut *document) {
                Ok(value) => TickOutcome::Updated(value),
                Err(err) => {
                    error!("tick {} failed: {err}", stats.ticks);
                    stats.failures += 1;
                    TickOutcome::Failed(err)
                }
            };
            stats.ticks += 1;
            observer(&outcome, &*document);
        }

        debug!("{} ticks, {} failed", stats.ticks, stats.failures);
        stats
    }
}
