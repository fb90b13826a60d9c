use std::{
    fs::{self, File},
    io::Write,
};

use clap::Parser;
use log::info;
use simple_logger::SimpleLogger;
use tokio::{net::TcpListener, signal};

mod error;
mod graphql;
mod http_service;
mod pagination;
mod store;

use store::TodoStore;

/// Command line arguments and environment configuration of the todo service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generates GraphQL schema in `./schemas/todo.graphql`.
    #[arg(long)]
    generate_schema: bool,
    /// Port the HTTP server listens on.
    #[arg(long, env = "EXPRESS_PORT", default_value_t = 4000)]
    port: u16,
    /// Number of demo todos inserted at start.
    #[arg(long, default_value_t = 0)]
    seed: usize,
}

/// Activates logger and parses arguments for optional schema generation. Otherwise starts the GraphQL server.
#[tokio::main]
async fn main() -> std::io::Result<()> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .map_err(std::io::Error::other)?;

    let args = Args::parse();
    if args.generate_schema {
        fs::create_dir_all("./schemas")?;
        let mut file = File::create("./schemas/todo.graphql")?;
        file.write_all(graphql::sdl().as_bytes())?;
        info!("GraphQL schema: ./schemas/todo.graphql was successfully generated!");
        Ok(())
    } else {
        start_service(args).await
    }
}

/// Starts todo service on the configured port.
async fn start_service(args: Args) -> std::io::Result<()> {
    let mut store = TodoStore::new();
    store.seed(args.seed);
    info!("Todo store initialized with {} todos.", store.len());

    let schema = graphql::build_schema(store.shared());
    let app = http_service::router(schema);

    let listener = TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!("App listening on http://localhost:{}", args.port);
    info!("GraphiQL IDE: http://localhost:{}/graphiql", args.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down application.");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Gracefully shutting down.");
}
