//! # Rollbook CLI
//!
//! Protocol client and data seeder for a running Rollbook server.
//!
//! This library crate provides the functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use rollbook_cli::client::RollbookClient;
//! use rollbook_cli::seeder::{seed_all, SeedConfig};
//!
//! let mut client = RollbookClient::connect("127.0.0.1:8090").await?;
//! seed_all(&mut client, SeedConfig::new(3)).await?;
//! ```

pub mod client;
pub mod seeder;
