use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use vpn_catalog::apis;
use vpn_catalog::config::Config;
use vpn_catalog::constants::{DEFAULT_CONFIG_PATH, NORDVPN_PROVIDER};
use vpn_catalog::infra::TracingWarner;
use vpn_catalog::logging;
use vpn_catalog::observability;
use vpn_catalog::{CatalogSnapshot, ServerDescriptor, UpdateUseCase};

#[derive(Parser)]
#[command(name = "vpn-catalog")]
#[command(about = "Fetch and normalize a VPN provider's server catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and write it as a JSON snapshot
    Fetch {
        #[command(flatten)]
        common: CommonArgs,
        /// Write the snapshot to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch the catalog and print per-region counts
    Summary {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Provider to fetch. Available: nordvpn
    #[arg(long, default_value = NORDVPN_PROVIDER)]
    provider: String,
    /// Minimum number of valid servers required
    #[arg(long)]
    min_servers: Option<usize>,
    /// HTTP timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Write Prometheus metrics to this file on exit
    #[arg(long)]
    metrics_out: Option<PathBuf>,
}

impl CommonArgs {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(&self.config)
            .with_context(|| format!("loading configuration from {}", self.config.display()))?;
        config.apply_overrides(self.min_servers, self.timeout);
        Ok(config)
    }
}

async fn update(common: &CommonArgs, config: &Config) -> anyhow::Result<Vec<ServerDescriptor>> {
    let source = apis::create_source(&common.provider, &config.catalog)?.ok_or_else(|| {
        anyhow!(
            "unknown provider {:?}, supported: {}",
            common.provider,
            apis::get_supported_providers().join(", ")
        )
    })?;
    let use_case = UpdateUseCase::new(source, Box::new(TracingWarner));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling catalog fetch");
            on_interrupt.cancel();
        }
    });

    let servers = use_case
        .get_servers(&cancel, config.catalog.min_servers)
        .await
        .with_context(|| format!("updating {} servers", common.provider))?;
    Ok(servers)
}

fn print_summary(servers: &[ServerDescriptor]) {
    let mut per_region: BTreeMap<&str, usize> = BTreeMap::new();
    for server in servers {
        *per_region.entry(server.region.as_str()).or_default() += 1;
    }

    println!("📊 {} servers in {} regions", servers.len(), per_region.len());
    for (region, count) in &per_region {
        println!("   {region}: {count}");
    }
    println!("   TCP capable: {}", servers.iter().filter(|s| s.tcp).count());
    println!("   UDP capable: {}", servers.iter().filter(|s| s.udp).count());
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let common = match &cli.command {
        Commands::Fetch { common, .. } | Commands::Summary { common } => common,
    };
    let config = common.load_config()?;
    let _guard = logging::init_logging(&config.logging.directory)
        .with_context(|| format!("initializing logging in {}", config.logging.directory))?;

    let metrics_handle = match &common.metrics_out {
        Some(_) => Some(observability::init().map_err(|e| anyhow!(e))?),
        None => None,
    };

    let result = update(common, &config).await;

    if let (Some(path), Some(handle)) = (&common.metrics_out, &metrics_handle) {
        fs::write(path, handle.render())
            .with_context(|| format!("writing metrics to {}", path.display()))?;
    }

    let servers = result?;
    match cli.command {
        Commands::Fetch { output, .. } => {
            let snapshot = CatalogSnapshot::new(servers);
            let json = serde_json::to_string_pretty(&snapshot)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing snapshot to {}", path.display()))?;
                    info!("Wrote {} servers to {}", snapshot.servers.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Summary { .. } => print_summary(&servers),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
