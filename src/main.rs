use axum::Router;
use clap::Parser;
use library_mesh::catalog;
use library_mesh::catalog::repository::BookRepository;
use library_mesh::config::{Cli, Command, GatewayArgs, RegistryArgs, ServiceArgs};
use library_mesh::discovery::agent::{HeartbeatAgent, Registration};
use library_mesh::discovery::client::RegistryClient;
use library_mesh::discovery::resolver::Resolver;
use library_mesh::gateway;
use library_mesh::gateway::proxy::Gateway;
use library_mesh::loans;
use library_mesh::loans::ledger::LoanLedger;
use library_mesh::loans::orchestrator::LoanOrchestrator;
use library_mesh::readers;
use library_mesh::readers::repository::ReaderRepository;
use library_mesh::registry;
use library_mesh::registry::store::RegistryStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("library_mesh={},info", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let validation = match &cli.command {
        Command::Registry(args) => args.validate(),
        Command::Gateway(args) => args.validate(),
        Command::Catalog(args) | Command::Readers(args) | Command::Loans(args) => args.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    match cli.command {
        Command::Registry(args) => run_registry(args).await,
        Command::Gateway(args) => run_gateway(args).await,
        Command::Catalog(args) => {
            let app = catalog::handlers::router(BookRepository::seeded());
            run_backend(args, catalog::SERVICE_NAME, 8001, app).await
        }
        Command::Readers(args) => {
            let app = readers::handlers::router(ReaderRepository::seeded());
            run_backend(args, readers::SERVICE_NAME, 8002, app).await
        }
        Command::Loans(args) => {
            let resolver = Resolver::new(
                Arc::new(RegistryClient::new(&args.registry_url)),
                args.balancer.policy(),
            );
            let orchestrator = Arc::new(LoanOrchestrator::new(resolver, LoanLedger::new()));
            let app = loans::handlers::router(orchestrator);
            run_backend(args, loans::SERVICE_NAME, 8003, app).await
        }
    }
}

async fn run_registry(args: RegistryArgs) -> anyhow::Result<()> {
    let store = RegistryStore::new(args.ttl());
    tracing::info!("Registry TTL: {:?}", store.ttl());

    if let Some(interval) = args.sweep_interval() {
        tracing::info!("Background sweep every {:?}", interval);
        store.clone().spawn_sweeper(interval);
    }

    let app = registry::handlers::router(store);

    tracing::info!("Registry listening on {}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn run_gateway(args: GatewayArgs) -> anyhow::Result<()> {
    let resolver = Resolver::new(
        Arc::new(RegistryClient::new(&args.registry_url)),
        args.balancer.policy(),
    );
    let gateway = Arc::new(Gateway::new(resolver)?);
    let app = gateway::handlers::router(gateway);

    tracing::info!(
        "Gateway listening on {} (registry {}, {:?} balancing)",
        args.bind,
        args.registry_url,
        args.balancer
    );
    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Serves a backend router and keeps it announced to the registry while it runs.
async fn run_backend(
    args: ServiceArgs,
    default_name: &str,
    default_port: u16,
    app: Router,
) -> anyhow::Result<()> {
    let registration = Registration {
        name: args.name_or(default_name),
        host: args.host.clone(),
        port: args.port_or(default_port),
    };

    // 1. Bind first so the registry never points at a closed port:
    let listener =
        tokio::net::TcpListener::bind((registration.host.as_str(), registration.port)).await?;
    tracing::info!(
        "{} listening on {}:{}",
        registration.name,
        registration.host,
        registration.port
    );

    // 2. Announce and keep alive:
    let agent = HeartbeatAgent::new(
        RegistryClient::new(&args.registry_url),
        registration,
        args.heartbeat_interval(),
    )
    .spawn();

    // 3. Serve until Ctrl+C:
    tracing::info!("Press Ctrl+C to shutdown");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    agent.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
