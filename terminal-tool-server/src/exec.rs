use std::process::Stdio;
use terminal_tool_api::api::{CommandResult, SIGNAL_EXIT_CODE};
use tokio::process::Command;

/// Builds the platform shell invocation for one command line. The shell
/// parses quoting and metacharacters, the command line is passed through
/// unmodified.
fn shell_command(command_line: &str) -> Command {
    #[cfg(unix)]
    let mut command = Command::new("sh");
    #[cfg(unix)]
    command.arg("-c");

    #[cfg(windows)]
    let mut command = Command::new("cmd");
    #[cfg(windows)]
    command.arg("/C");

    command.arg(command_line);
    command
}

/// Runs one command line through the shell and waits for it to terminate.
///
/// Only this task suspends while the child runs, other requests keep being
/// served. Every failure to spawn or await the child is folded into the
/// result shape, so this never fails at the protocol level.
pub async fn run_shell(id: u64, command_line: &str) -> CommandResult {
    let mut command = shell_command(command_line);
    // No interactive input, both output streams captured.
    command.stdin(Stdio::null());
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    match command.output().await {
        Ok(out) => {
            log::debug!(id; "status: {}", out.status);
            log::debug!(id; "stdout: {}", String::from_utf8_lossy(&out.stdout).trim());
            log::debug!(id; "stderr: {}", String::from_utf8_lossy(&out.stderr).trim());
            CommandResult {
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                return_code: out.status.code().unwrap_or(SIGNAL_EXIT_CODE),
            }
        }
        Err(e) => {
            log::info!(id; "failed to spawn: {e:?}");
            CommandResult::spawn_failure(&e)
        }
    }
}
