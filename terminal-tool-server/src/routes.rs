use crate::{exec, fetch};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::path::PathBuf;
use std::sync::Arc;
use terminal_tool_api::api::{CommandResult, InfoResponse, OsType, RunRequest, VERSION};

// Sanity check that our conditional compilation won't break with weird error messages.
#[cfg(all(windows, unix))]
compile_error!("Unix and Windows are exclusive!");
#[cfg(not(any(windows, unix)))]
compile_error!("Either Unix or Windows must be targeted!");

/// Default path of the file behind `GET /api/resource/mcpreadme`, relative
/// to the server working directory.
pub const DEFAULT_README_PATH: &str = "resources/MCPREADME.md";

/// Placeholder standing in for the demo download url. Not a resolvable
/// location, so the fetch endpoint answers with a curl error until an
/// operator points it somewhere real.
pub const DEFAULT_FETCH_URL: &str =
    "commented out for security reasons. Re-enable after checking it if you want to demo the functionality";

/// Read-only per-process configuration, built once in `main` and handed to
/// the handlers through axum state.
#[derive(Debug)]
pub struct ServerContext {
    pub readme_path: PathBuf,
    pub fetch_url: String,
}

/// Routes under `/api`.
pub fn routes(context: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/info", get(info))
        .route("/run", post(run_command))
        .route("/fetch", get(fetch_remote))
        .route("/resource/mcpreadme", get(readme_resource))
        .with_state(context)
}

async fn info() -> Json<InfoResponse> {
    log::debug!("sending info");
    Json(InfoResponse {
        server_name: String::from("Terminal Tool Server"),
        version: String::from(VERSION),
        // Determined at compile time, the binaries are incompatible anyway.
        #[cfg(windows)]
        os_type: OsType::Windows,
        #[cfg(unix)]
        os_type: OsType::Unix,
    })
}

async fn run_command(Json(request): Json<RunRequest>) -> Json<CommandResult> {
    let id = fastrand::u64(..);

    log::info!(id; "received command");
    log::debug!(id; "command line: {}", request.command);

    Json(exec::run_shell(id, &request.command).await)
}

async fn fetch_remote(State(context): State<Arc<ServerContext>>) -> String {
    let id = fastrand::u64(..);

    log::info!(id; "received fetch request");
    log::debug!(id; "url: {}", context.fetch_url);

    fetch::fetch_url(id, &context.fetch_url).await
}

async fn readme_resource(State(context): State<Arc<ServerContext>>) -> String {
    log::debug!(path:debug = context.readme_path; "reading readme resource");
    match tokio::fs::read_to_string(&context.readme_path).await {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!(path:debug = context.readme_path; "failed to read readme: {e}");
            format!("Error reading MCPREADME.md: {e}")
        }
    }
}
