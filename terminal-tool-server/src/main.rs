use axum::routing::get;
use axum::Router;
use clap::{Parser, ValueHint};
use log::LevelFilter;
use std::num::NonZeroU16;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

mod exec;
mod fetch;
mod routes;

use routes::ServerContext;

#[tokio::main(flavor = "current_thread")] // single-threaded, multi requires rt-multi-thread feature
async fn main() -> std::io::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .filter(Some("tower_http"), LevelFilter::Debug)
        .filter(Some("terminal_tool_server"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    let CliArgs {
        host,
        port,
        readme_path,
        fetch_url,
    } = CliArgs::parse();

    log::info!(
        version = env!("CARGO_PKG_VERSION"),
        api_version = terminal_tool_api::api::VERSION;
        "Initializing server"
    );

    let context = Arc::new(ServerContext {
        readme_path,
        fetch_url,
    });

    log::info!(path = "/api"; "nesting sub-routes");
    let router = Router::new()
        .nest("/api", routes::routes(context))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        addr:display = host,
        port:display = port;
        "listening to TCP"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[derive(Parser)]
struct CliArgs {
    /// The host address for the terminal tool server.
    #[arg(
        long,
        value_name = "URI",
        value_hint = ValueHint::Hostname,
        default_value = "127.0.0.1",
        env = "TERMINAL_TOOL_HOST",
    )]
    host: String,
    /// The host port for the terminal tool server.
    #[arg(
        short,
        long,
        value_name = "PORT",
        value_hint = ValueHint::Other,
        default_value = "8000",
        env = "TERMINAL_TOOL_PORT",
    )]
    port: NonZeroU16,
    /// The text file served as the readme resource.
    #[arg(
        long,
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        default_value = routes::DEFAULT_README_PATH,
        env = "TERMINAL_TOOL_README",
    )]
    readme_path: PathBuf,
    /// The url downloaded by `GET /api/fetch`. The shipped default is not a
    /// real url, so fetching stays disabled until an operator overrides it.
    #[arg(
        long,
        value_name = "URL",
        value_hint = ValueHint::Url,
        default_value = routes::DEFAULT_FETCH_URL,
        env = "TERMINAL_TOOL_FETCH_URL",
    )]
    fetch_url: String,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT (ctrl+c) handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("received SIGINT (ctrl+c), shutting down"),
        () = terminate => log::info!("received SIGTERM, shutting down"),
    }
}
