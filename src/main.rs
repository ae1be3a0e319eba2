mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use ph_core::config::Config;

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_or_default(config_path)?;
    config.apply_env();
    Ok(config)
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if static_dir.is_some() {
        config.server.static_dir = static_dir;
    }
    config.check()?;

    tracing::info!("Starting phimhub {}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    tracing::info!("Upstream catalog: {}", config.upstream.base_url);

    ph_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbose flag picks the level.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "phimhub=trace,ph_server=trace,ph_catalog=trace,ph_core=debug,tower_http=debug"
                .to_string()
        } else {
            "phimhub=debug,ph_server=debug,ph_catalog=debug,ph_core=info,tower_http=info"
                .to_string()
        }
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    match cli.command {
        Commands::Start {
            host,
            port,
            static_dir,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, static_dir, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("phimhub {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let config =
                Config::load(p).with_context(|| format!("invalid config {}", p.display()))?;
            config
                .check()
                .with_context(|| format!("invalid config {}", p.display()))?;
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Upstream: {}", config.upstream.base_url);
    println!("  Image CDN: {}", config.images.cdn_base_url);
    match config.server.requests_per_minute {
        0 => println!("  Rate limit: off"),
        n => println!("  Rate limit: {n}/min"),
    }
    if let Some(ref dir) = config.server.static_dir {
        println!("  Static dir: {}", dir.display());
    }

    let warnings = config.validate();
    for warning in &warnings {
        println!("  ⚠ {warning}");
    }

    Ok(())
}
