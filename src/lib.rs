//! # Rollbook
//!
//! A small relationship-management service for schools, classes, teachers
//! and students, served over TCP with newline-delimited JSON.
//!
//! # Layers
//!
//! - [`store`]: Durable schools, persons, classes and enrollments in SQLite
//! - [`engine`]: Role exclusivity and single-school enrollment rules
//! - [`router`]: Method table from request to engine operation
//! - [`transport`]: Listener and per-connection framing loop
//!
//! # Example
//!
//! ```ignore
//! use rollbook::state::init_app_state;
//! use rollbook::transport::Server;
//! use rollbook_config::AppConfig;
//!
//! let state = init_app_state(AppConfig::from_env()).await?;
//! let server = Server::bind("127.0.0.1:8090", state.router()).await?;
//! server.run_until(async { tokio::signal::ctrl_c().await.ok(); }).await?;
//! ```

pub mod engine;
pub mod logging;
pub mod metrics;
pub mod router;
pub mod state;
pub mod store;
pub mod transport;
