//! HTTP server module.
//!
//! Binds the configured address, serves the router, and shuts down
//! gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{bind, serve, start_server, ServerError};
pub use shutdown::shutdown_signal;
