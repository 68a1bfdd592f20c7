//! # Scoreboard Server Library
//!
//! This library provides the match-state engine and HTTP boundary of a
//! local-network scoreboard. It keeps the live state of any number of
//! concurrently running matches, applies update actions sent by control
//! clients, and serves state snapshots to display clients that poll it.
//!
//! ## Core Responsibilities
//!
//! ### Match State
//! Every match identifier ("Volley", "Basket", or any other text) maps to one
//! [`shared::GameState`]. Unknown identifiers are created lazily with default
//! values and live for the lifetime of the process.
//!
//! ### Update Protocol
//! Control clients send an `action` with parameters (`score`, `timeout`, `sub`,
//! `reset_set`, `reset_match`, `set_config`). Malformed parameters fall back to
//! documented defaults and unknown actions are acknowledged as no-ops, so an
//! update request always succeeds.
//!
//! ### Set Completion
//! After each score change the current set is checked against the target
//! (25, or 15 in the deciding set) with a two-point margin. A won set bumps the
//! winner's set count, clears the scores and advances the set number until one
//! team has taken three sets.
//!
//! ## Concurrency Design
//!
//! Requests for the same match are linearizable: each match sits behind its own
//! mutex, held across the whole read-compute-write of an update, so concurrent
//! score changes never lose an update. Requests for different matches do not
//! contend beyond a brief map lookup.
//!
//! ## Module Organization
//!
//! ### Match Store Module (`match_store`)
//! Identifier-to-state mapping with lazy creation, atomic apply and replace.
//!
//! ### Game Module (`game`)
//! The update processor interpreting actions against a match.
//!
//! ### Set Win Module (`set_win`)
//! Win detection and its side effects on scores, sets and allowances.
//!
//! ### Rules Module (`rules`)
//! Score bound, set targets and allowance-reset policy as one value.
//!
//! ### Network Module (`network`)
//! axum routes, handlers and the bound server.
//!
//! ### Pages Module (`pages`)
//! Home page and the control/display pages read from an assets directory.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::{Server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         addr: "127.0.0.1:8080".to_string(),
//!         ..ServerConfig::default()
//!     };
//!
//!     let server = Server::bind(config).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod game;
pub mod match_store;
pub mod network;
pub mod pages;
pub mod rules;
pub mod set_win;
