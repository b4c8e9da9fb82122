use env_logger::{Builder, Env, Target};

/// Install the global logger, writing to stderr so stdout carries only the
/// rendered time values.
///
/// `filter` uses `env_logger` syntax (e.g. `usertime_core=trace`) and beats
/// `RUST_LOG`; with neither, the level is `info`.
pub fn init_logging(filter: Option<&str>) {
    let mut builder = match filter {
        Some(filter) => {
            let mut builder = Builder::new();
            builder.parse_filters(filter);
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("info")),
    };
    builder.target(Target::Stderr).init();
    log::debug!("logging initialized");
}
