//! This crate serves purely as an api abstraction for a terminal tool server.
//! Additionally there is a canonical server implementation in the same repository.
//!
//! The server exposes generic terminal access: a caller submits a command
//! line, the server hands it to the platform shell and returns whatever came
//! out of it.
//!
//! ## Usage
//! For the complete wire format, see the serde structs in [`api`].
//! * `GET /api/info` returns an informative [`api::InfoResponse`] object.
//! * `POST /api/run` runs a shell command and returns an [`api::CommandResult`].
//! * `GET /api/fetch` downloads the configured URL via `curl` and returns the body as text.
//! * `GET /api/resource/mcpreadme` returns the bundled readme file as text.
//!
//! ## Error shape
//! Capability failures never surface as http errors. Every handler answers
//! `200 OK` with a value: `run` folds spawn failures into the result struct
//! ([`api::SPAWN_FAILURE_CODE`]), `fetch` and the readme resource answer with
//! a descriptive error string in place of the content.
//!
//! ## Long running commands
//! There is no timeout: a call waits until the command terminates and returns
//! then. *Make sure your commands always terminate* in order to not lock up
//! valuable resources.
//!
//! ## Security
//! The api does not include any security measures, this is *terminal access
//! as a service*: the command string reaches the shell unmodified, pipes,
//! redirects and metacharacters included. Make sure the server is only
//! reachable from trusted hosts. E.g. by means of ssh port forwarding.

pub mod api;
