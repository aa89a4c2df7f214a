//! Operator CLI for tenant custom-domain records.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use landing_gateway::database::manager;
use landing_gateway::database::store::PgDomainStore;
use landing_gateway::services::domain_service::DomainService;

#[derive(Parser)]
#[command(name = "domainctl", about = "Manage tenant custom-domain records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a hostname for a tenant (starts pending)
    Add { hostname: String, slug: String },
    /// List all domain records
    List,
    /// Mark a hostname active after verification
    Activate { hostname: String },
    /// Revoke a hostname binding
    Revoke { hostname: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let pool = manager::connect().await?;
    let service = DomainService::new(Arc::new(PgDomainStore::new(pool)));

    match cli.command {
        Command::Add { hostname, slug } => {
            let domain = service.register_domain(&hostname, &slug).await?;
            println!(
                "registered {} -> {} ({})",
                domain.hostname, domain.slug, domain.status
            );
        }
        Command::List => {
            for domain in service.list_domains().await? {
                println!(
                    "{:<40} {:<20} {}",
                    domain.hostname, domain.slug, domain.status
                );
            }
        }
        Command::Activate { hostname } => {
            let domain = service.activate_domain(&hostname).await?;
            println!("activated {}", domain.hostname);
        }
        Command::Revoke { hostname } => {
            let domain = service.revoke_domain(&hostname).await?;
            println!("revoked {}", domain.hostname);
        }
    }

    Ok(())
}
