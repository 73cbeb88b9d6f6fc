//! TCP transport: the listener and the per-connection loop.
//!
//! Requests and responses are single JSON objects terminated by `\n`.

mod connection;
mod errors;
mod listener;
mod shutdown;

pub use connection::{MAX_FRAME_BYTES, serve_connection};
pub use errors::{ConnectionError, ListenerError};
pub use listener::Server;
pub use shutdown::{Shutdown, shutdown_channel};
