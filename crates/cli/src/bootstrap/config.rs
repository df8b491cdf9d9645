use ferrous_cdn_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logged after the subscriber is up, since the log level comes from the config.
pub fn log_config_summary(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        port = config.server.port,
        bind = %config.server.bind_address,
        route_prefix = %config.server.route_prefix,
        origin = %config.origin.base_url,
        timeout_secs = config.origin.timeout_secs,
        max_entries = config.cache.max_entries,
        ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );
}
