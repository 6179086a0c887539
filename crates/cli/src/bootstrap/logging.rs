use spf_flattener_domain::Config;
use tracing::debug;

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// the records.
pub fn init_logging(config: &Config) {
    let log_level = config.logging.level.parse().unwrap_or(tracing::Level::WARN);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(log_level >= tracing::Level::DEBUG)
        .with_thread_ids(false)
        .with_level(true)
        .with_max_level(log_level)
        .with_ansi(true)
        .init();

    debug!("Logging initialized at level: {}", config.logging.level);
}
