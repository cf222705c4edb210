use clap::{Parser, Subcommand};
use dohgate_domain::CliOverrides;
use dohgate_jobs::{AuditLogRetentionJob, CacheSweepJob, JobRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dohgate")]
#[command(version)]
#[command(about = "dohgate - UDP DNS to DNS-over-HTTPS gateway")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the gateway (default)
    Serve,
    /// Print recent audit records as JSON lines
    Logs {
        /// How far back to look
        #[arg(long, default_value_t = 60)]
        since_minutes: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    let pool = bootstrap::init_database(&config.database).await?;
    let repos = di::Repositories::new(pool);
    let use_cases = di::UseCases::new(&repos);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Logs { since_minutes } => {
            let records = use_cases.get_audit_logs.recent(since_minutes).await?;
            for record in records {
                println!("{}", serde_json::to_string(&record)?);
            }
            Ok(())
        }
        Command::Serve => serve(config, repos, use_cases).await,
    }
}

async fn serve(
    config: dohgate_domain::Config,
    repos: di::Repositories,
    use_cases: di::UseCases,
) -> anyhow::Result<()> {
    info!("Starting dohgate v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();
    let dns_services = di::DnsServices::new(&config, &repos)?;

    JobRunner::new()
        .with_cache_sweep(
            CacheSweepJob::new(dns_services.cache.clone())
                .with_interval(config.cache.sweep_interval_secs),
        )
        .with_audit_log_retention(
            AuditLogRetentionJob::new(
                use_cases.cleanup_audit_logs.clone(),
                config.database.retention_days,
            )
            .with_interval(config.database.retention_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    server::start_dns_server(&config.server, Arc::clone(&dns_services.handler), shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
