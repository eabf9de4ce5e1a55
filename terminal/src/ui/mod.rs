//! # Text Rendering
//!
//! Plain-text views printed by the command loop. Renderers take snapshots
//! and never touch locks or the network.
//!
//! - [`board`]: board diagram, game view, lobby lists, session line

pub mod board;

pub use board::{render_board, render_challenges, render_game, render_games, render_session};
