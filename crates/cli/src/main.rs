//! # SPF Flattener
//!
//! Resolves a domain's SPF record, expands its `include:`/`redirect=` terms
//! and rewrites `a`/`mx` mechanisms into literal `ip4:`/`ip6:` terms.

mod bootstrap;
mod di;
mod output;

use clap::Parser;
use spf_flattener_domain::CliOverrides;
use tracing::error;

use bootstrap::{init_logging, load_config};
use di::SpfServices;

#[derive(Parser)]
#[command(name = "spf-flattener")]
#[command(version)]
#[command(about = "Expand and flatten a domain's SPF record")]
struct Cli {
    /// Domain whose SPF record is analysed
    domain: String,

    /// DNS server to query, `ip` or `ip:port` [default: 8.8.8.8]
    #[arg(short = 's', long)]
    dns_server: Option<String>,

    /// Expansion rounds allowed after the first [default: 5]
    #[arg(short = 'm', long)]
    max_depth: Option<u32>,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    debug: bool,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Per-query timeout in milliseconds [default: 2000]
    #[arg(long = "timeout")]
    timeout_ms: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(
        cli.config.as_deref(),
        CliOverrides {
            dns_server: cli.dns_server,
            max_depth: cli.max_depth,
            timeout_ms: cli.timeout_ms,
            debug: cli.debug,
        },
    )?;

    init_logging(&config);

    let services = SpfServices::new(&config)?;

    let report = match services
        .analyze
        .execute(&cli.domain, config.expansion.max_depth)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            error!(domain = %cli.domain, error = %e, "SPF analysis failed");
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", output::render_json(&report)?);
    } else {
        print!("{}", output::render_text(&report));
    }

    Ok(())
}
