//! # usertime
//!
//! Hosts the time-of-day display updater against an HTML page and prints the
//! display element's text on every tick.

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand};
use log::info;
use usertime_core::{Schedule, TickOutcome, TickStats};

mod host;
mod logging;

use host::{parse_time, Host, HostOptions};
use logging::init_logging;

#[derive(Parser)]
#[command(name = "usertime", version, about = "Show milliseconds since local midnight in a page element")]
struct Cli {
    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Update the display element on a fixed period until the tick limit or Ctrl-C.
    Run(HostArgs),
    /// Perform a single update and print the result.
    Once(HostArgs),
}

#[derive(Args)]
struct HostArgs {
    /// HTML page to load. Defaults to a built-in page with a `user-time` element.
    #[arg(long)]
    page: Option<PathBuf>,

    /// JSON config file (`target_id`, `period_ms`, `max_ticks`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Identifier of the display element.
    #[arg(long)]
    target: Option<String>,

    /// Tick period in milliseconds.
    #[arg(long)]
    period_ms: Option<u64>,

    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,

    /// Freeze the clock at HH:MM:SS[.mmm] instead of reading the system clock.
    #[arg(long, value_parser = parse_time)]
    at: Option<NaiveTime>,
}

impl From<HostArgs> for HostOptions {
    fn from(args: HostArgs) -> Self {
        HostOptions {
            page: args.page,
            config: args.config,
            target: args.target,
            period_ms: args.period_ms,
            ticks: args.ticks,
            at: args.at,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    match cli.command {
        Command::Run(args) => {
            let stats = run(Host::prepare(args.into())?, ctrl_c()).await?;
            info!("{} ticks ({} failed)", stats.ticks, stats.failures);
        }
        Command::Once(args) => {
            let mut host = Host::prepare(args.into())?;
            println!("{}", once(&mut host)?);
        }
    }
    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the signal cannot be watched.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Drive the schedule, printing the target text after each successful tick.
async fn run(host: Host, shutdown: impl Future<Output = ()>) -> Result<TickStats> {
    let Host {
        config,
        mut page,
        updater,
    } = host;
    let target_id = config.target_id.clone();

    let stats = Schedule::from_config(&config)?
        .run_until(
            &updater,
            &mut page,
            |outcome, page| {
                if let TickOutcome::Updated(_) = outcome {
                    if let Some(text) = page.text_of(&target_id) {
                        println!("{text}");
                    }
                }
            },
            shutdown,
        )
        .await;
    Ok(stats)
}

/// One tick; returns the text now shown by the target. A missing target is
/// an error, which `main` turns into a non-zero exit.
fn once(host: &mut Host) -> Result<String> {
    let value = host.updater.tick(&mut host.page)?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use usertime_core::{CoreError, DEFAULT_TARGET_ID};

    fn frozen(options: HostOptions) -> Host {
        Host::prepare(HostOptions {
            at: Some(parse_time("14:05:09.250").unwrap()),
            ..options
        })
        .unwrap()
    }

    #[test]
    fn once_prints_value_for_builtin_page() {
        let mut host = frozen(HostOptions::default());
        assert_eq!(once(&mut host).unwrap(), "50709250");
        assert_eq!(host.page.text_of(DEFAULT_TARGET_ID), Some("50709250"));
    }

    #[test]
    fn once_fails_when_target_is_missing() {
        let mut host = frozen(HostOptions {
            target: Some("no-such-element".to_string()),
            ..HostOptions::default()
        });
        let err = once(&mut host).unwrap_err();
        match err.downcast_ref::<CoreError>() {
            Some(CoreError::Lookup { id }) => assert_eq!(id, "no-such-element"),
            other => panic!("expected lookup error, got {other:?}"),
        }
        assert_eq!(host.page.text_of(DEFAULT_TARGET_ID), Some(""));
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_at_tick_limit() {
        let host = frozen(HostOptions {
            ticks: Some(3),
            ..HostOptions::default()
        });
        let stats = run(host, std::future::pending()).await.unwrap();
        assert_eq!(stats, TickStats { ticks: 3, failures: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn run_keeps_going_through_lookup_failures() {
        let host = frozen(HostOptions {
            target: Some("no-such-element".to_string()),
            ..HostOptions::default()
        });
        let stats = run(host, tokio::time::sleep(Duration::from_millis(175)))
            .await
            .unwrap();
        assert_eq!(stats, TickStats { ticks: 3, failures: 3 });
    }
}
