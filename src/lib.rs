pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod services;

use std::io::BufRead;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use db::Store;
use metrics_exporter_prometheus::PrometheusHandle;
use services::{AuthService, Registration, SeaOrmAuthService};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&config);

    match cli.command() {
        Commands::Serve => {
            config.validate()?;
            let prometheus_handle = install_metrics_recorder(&config)?;
            run_server(config, prometheus_handle).await
        }

        Commands::Migrate => cmd_migrate(&config).await,

        Commands::SeedOffices => cmd_seed_offices(&config).await,

        Commands::Offices => cmd_list_offices(&config).await,

        Commands::Register { username, email } => cmd_register(config, username, email).await,

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Set security.jwt_secret (or JWT_SECRET) and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let (pretty_layer, json_layer) = if config.general.log_format == "json" {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty_layer)
        .with(json_layer)
        .init();
}

fn install_metrics_recorder(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    use metrics_exporter_prometheus::PrometheusBuilder;
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn connect(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
    .with_context(|| format!("Failed to open database {}", config.general.database_url))
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Office inventory v{} starting...", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let api_state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(api_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = connect(config).await?;
    println!("✓ Migrations applied");

    if config.inventory.seed_offices {
        let added = store.seed_offices(&config.inventory.offices).await?;
        println!("✓ {} new offices added", added);
    }
    Ok(())
}

async fn cmd_seed_offices(config: &Config) -> anyhow::Result<()> {
    let store = connect(config).await?;
    let added = store.seed_offices(&config.inventory.offices).await?;

    println!(
        "✓ {} new offices added ({} configured)",
        added,
        config.inventory.offices.len()
    );
    Ok(())
}

async fn cmd_list_offices(config: &Config) -> anyhow::Result<()> {
    let store = connect(config).await?;
    let offices = store.list_offices().await?;

    if offices.is_empty() {
        println!("No offices found.");
        println!();
        println!("Seed them with: office-inventory seed-offices");
        return Ok(());
    }

    println!("Offices ({} total)", offices.len());
    println!("{:-<40}", "");
    for office in offices {
        println!("{:>4}  {}", office.id, office.name);
    }

    Ok(())
}

async fn cmd_register(config: Config, username: &str, email: &str) -> anyhow::Result<()> {
    config.validate()?;

    let password = match std::env::var("INVENTORY_PASSWORD") {
        Ok(p) if !p.is_empty() => p,
        _ => read_password_from_stdin()?,
    };

    let store = connect(&config).await?;
    let auth = SeaOrmAuthService::new(store, config.security.clone());

    let user_id = auth
        .register(Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.clone(),
            confirm_password: password,
        })
        .await?;

    println!("✓ User {} registered (id {})", username, user_id);
    Ok(())
}

fn read_password_from_stdin() -> anyhow::Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
