use std::process::Stdio;
use tokio::process::Command;

/// Downloads `url` through the external `curl` collaborator and returns the
/// body as text.
///
/// Mirrors the no-fault contract of the run endpoint: a non-zero curl exit
/// or a failure to spawn curl at all both come back as descriptive text in
/// place of the body.
pub async fn fetch_url(id: u64, url: &str) -> String {
    let result = Command::new("curl")
        .args(["-fsSL", url])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match result {
        Ok(out) if out.status.success() => {
            log::debug!(id; "fetched {} bytes", out.stdout.len());
            String::from_utf8_lossy(&out.stdout).into_owned()
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            log::info!(id; "curl exited with {}: {}", out.status, stderr.trim());
            if stderr.is_empty() {
                String::from("curl error: Unknown error")
            } else {
                format!("curl error: {stderr}")
            }
        }
        Err(e) => {
            log::info!(id; "failed to spawn curl: {e:?}");
            format!("Error running curl: {e}")
        }
    }
}
