//! # Scoreboard Client Library
//!
//! Command-line counterpart of the scoreboard server. It plays both client
//! roles the server expects:
//!
//! ### Control
//! Sends update actions (score changes, timeouts, substitutions, resets and
//! configuration) to a match through [`network::ScoreboardClient::send_action`].
//!
//! ### Display
//! Polls a match snapshot with [`network::ScoreboardClient::fetch_state`] and
//! renders it as text with [`rendering::render_scoreboard`], honoring which
//! team the match shows on the left.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::ScoreboardClient;
//! use client::rendering::render_scoreboard;
//! use shared::{Action, Side};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ScoreboardClient::new("127.0.0.1:8080");
//!
//!     client
//!         .send_action("Volley", &Action::Score { team: Side::A, delta: 1 })
//!         .await?;
//!
//!     let state = client.fetch_state("Volley").await?;
//!     println!("{}", render_scoreboard(&state));
//!
//!     Ok(())
//! }
//! ```

pub mod network;
pub mod rendering;
