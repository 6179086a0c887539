use spf_flattener_domain::{CliOverrides, Config};
use tracing::debug;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    debug!(
        config_file = config_path.unwrap_or("default"),
        dns_server = %config.resolver.server,
        timeout_ms = config.resolver.timeout_ms,
        max_depth = config.expansion.max_depth,
        "Configuration loaded"
    );

    Ok(config)
}
