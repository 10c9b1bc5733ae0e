//! Tests which start the binary and call the api.

use httpc_test::Client;
use serde_json::json;
use std::time::Duration;
use terminal_tool_api::api::{CommandResult, InfoResponse, VERSION};
use tokio::process::Child;

/// Starts the server binary and returns a child to abort it and a client to interact with it.
fn spawn_server(extra_args: &[&str]) -> anyhow::Result<(Child, Client)> {
    // IANA recommended port range.
    let port = fastrand::u16(49152..65535);
    let child = tokio::process::Command::new(env!("CARGO_BIN_EXE_terminal-tool-server"))
        .kill_on_drop(true)
        .args(["--host", "127.0.0.1"])
        .args(["--port", &port.to_string()])
        .args(extra_args)
        .spawn()
        .expect("Couldn't spawn server");
    let hc = httpc_test::new_client(format!("http://localhost:{port}"))?;
    Ok((child, hc))
}

/// Polls `/health` until the freshly spawned server accepts connections.
async fn wait_ready(hc: &Client) -> anyhow::Result<()> {
    for _ in 0..50 {
        if let Ok(response) = hc.do_get("/health").await {
            if response.status() == 200 {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    anyhow::bail!("server did not become ready")
}

#[tokio::test(flavor = "current_thread")]
async fn info() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&[])?;
    wait_ready(&hc).await?;

    let info = hc.do_get("/api/info").await?;
    info.print().await?;
    let info: InfoResponse = info.json_body_as()?;
    assert_eq!(info.version, VERSION);
    assert_eq!(info.server_name, "Terminal Tool Server");

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn run_echo() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&[])?;
    wait_ready(&hc).await?;

    let response = hc
        .do_post("/api/run", json!({ "command": "echo hello" }))
        .await?;
    response.print().await?;
    let result: CommandResult = response.json_body_as()?;
    assert_eq!(result.stdout, "hello\n");
    assert_eq!(result.stderr, "");
    assert_eq!(result.return_code, 0);

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn run_stderr_and_exit_code() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&[])?;
    wait_ready(&hc).await?;

    let response = hc
        .do_post("/api/run", json!({ "command": "echo oops >&2; exit 2" }))
        .await?;
    response.print().await?;
    let result: CommandResult = response.json_body_as()?;
    assert_eq!(result.stdout, "");
    assert_eq!(result.stderr, "oops\n");
    assert_eq!(result.return_code, 2);

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn run_missing_executable() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&[])?;
    wait_ready(&hc).await?;

    // The shell starts fine and reports the lookup failure itself.
    let response = hc
        .do_post(
            "/api/run",
            json!({ "command": "definitely-not-a-real-command-1337" }),
        )
        .await?;
    response.print().await?;
    let result: CommandResult = response.json_body_as()?;
    assert_ne!(result.return_code, 0);
    assert!(!result.stderr.is_empty());

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn run_is_idempotent() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&[])?;
    wait_ready(&hc).await?;

    let first: CommandResult = hc
        .do_post("/api/run", json!({ "command": "echo x" }))
        .await?
        .json_body_as()?;
    let second: CommandResult = hc
        .do_post("/api/run", json!({ "command": "echo x" }))
        .await?
        .json_body_as()?;
    assert_eq!(first, second);

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn concurrent_runs_are_independent() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&[])?;
    wait_ready(&hc).await?;

    let (first, second) = tokio::join!(
        hc.do_post("/api/run", json!({ "command": "sleep 0.3; echo first" })),
        hc.do_post("/api/run", json!({ "command": "sleep 0.1; echo second" })),
    );
    let first: CommandResult = first?.json_body_as()?;
    let second: CommandResult = second?.json_body_as()?;
    assert_eq!(first.stdout, "first\n");
    assert_eq!(second.stdout, "second\n");
    assert_eq!(first.return_code, 0);
    assert_eq!(second.return_code, 0);

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn readme_resource_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("MCPREADME.md");
    let contents = "# Terminal Tool Server\n\nHello from the readme.\n";
    std::fs::write(&path, contents)?;

    let (mut child, hc) = spawn_server(&[
        "--readme-path",
        path.to_str().expect("temp path should be utf-8"),
    ])?;
    wait_ready(&hc).await?;

    let response = hc.do_get("/api/resource/mcpreadme").await?;
    response.print().await?;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text_body()?, contents);

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn readme_resource_missing_file() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&["--readme-path", "does/not/exist/MCPREADME.md"])?;
    wait_ready(&hc).await?;

    let response = hc.do_get("/api/resource/mcpreadme").await?;
    response.print().await?;
    // Still a 200 with a value, the error is in the body text.
    assert_eq!(response.status(), 200);
    assert!(response
        .text_body()?
        .starts_with("Error reading MCPREADME.md: "));

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn fetch_with_disabled_url() -> anyhow::Result<()> {
    let (mut child, hc) = spawn_server(&[])?;
    wait_ready(&hc).await?;

    let response = hc.do_get("/api/fetch").await?;
    response.print().await?;
    assert_eq!(response.status(), 200);
    let body = response.text_body()?;
    assert!(
        body.starts_with("curl error: ") || body.starts_with("Error running curl: "),
        "unexpected body: {body}"
    );

    child.kill().await.expect("Couldn't kill server");
    Ok(())
}
