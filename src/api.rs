use serde::{Deserialize, Serialize};

/// The api version, kept in lockstep with the crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returned in place of an exit code when the child process never ran,
/// i.e. the shell itself could not be spawned or awaited.
pub const SPAWN_FAILURE_CODE: i32 = -1;

/// Returned in place of an exit code when the child was terminated by a
/// signal and therefore carries no exit code.
pub const SIGNAL_EXIT_CODE: i32 = -1001;

/// Body of `POST /api/run`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunRequest {
    /// The full command line, handed to the platform shell unmodified.
    ///
    /// The shell, not this api, parses quoting and metacharacters, so
    /// pipes and redirects work as they would in an interactive session.
    pub command: String,
}

/// Describes the json response format for `POST /api/run`.
///
/// Every invocation produces one of these, including invocations where the
/// shell could not be started at all: such failures carry
/// [`SPAWN_FAILURE_CODE`] and a synthesized [`stderr`](Self::stderr)
/// diagnostic instead of raising an error at the protocol level.
///
/// # Serialized Example
/// ```
/// # let ser = r#"
/// {
///     "stdout": "hello\n",
///     "stderr": "",
///     "return_code": 0
/// }
/// # "#;
/// # let deser: terminal_tool_api::api::CommandResult
/// #    = serde_json::from_str(ser).expect("failed parsing");
/// # assert_eq!(deser.return_code, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Captured standard output as text, empty if the command produced none.
    pub stdout: String,
    /// Captured standard error as text, or an
    /// `Error executing command: ...` diagnostic on spawn failure.
    pub stderr: String,
    /// Exit status of the child, [`SPAWN_FAILURE_CODE`] if it never ran,
    /// [`SIGNAL_EXIT_CODE`] if it was killed by a signal.
    pub return_code: i32,
}

impl CommandResult {
    /// Normalizes a failure to spawn or await the child into the regular
    /// result shape. Callers of the server never observe a fault.
    #[must_use]
    pub fn spawn_failure(error: &std::io::Error) -> Self {
        CommandResult {
            stdout: String::new(),
            stderr: format!("Error executing command: {error}"),
            return_code: SPAWN_FAILURE_CODE,
        }
    }
}

/// Response of `GET /api/info`.
#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub server_name: String,
    pub version: String,
    pub os_type: OsType,
}

/// The os family the server binary was compiled for. Determines which shell
/// executes [`RunRequest::command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsType {
    Unix,
    Windows,
}
