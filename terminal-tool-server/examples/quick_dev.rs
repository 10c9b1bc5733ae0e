use serde_json::json;
use terminal_tool_api::api::CommandResult;

const URL: &str = "http://localhost:8000";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let hc = httpc_test::new_client(URL)?;

    hc.do_get("/api/info").await?.print().await?;

    let response = hc.do_post("/api/run", json!({ "command": "pwd" })).await?;
    response.print().await?;
    let result: CommandResult = response.json_body_as()?;
    println!("PWD: {}", result.stdout);

    hc.do_get("/api/resource/mcpreadme").await?.print().await?;

    Ok(())
}
