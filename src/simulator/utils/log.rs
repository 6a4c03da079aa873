/// Global logging configuration
use env_logger::Env;

/// Install the global logger once.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `warn` in quiet mode.
/// Later calls are no-ops, so tests may call this freely.
pub fn init_log(quiet: bool) {
  let level = if quiet { "warn" } else { "info" };
  let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
    .format_timestamp(None)
    .try_init();
}
