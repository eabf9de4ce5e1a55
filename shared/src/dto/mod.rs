//! # Data Transfer Objects (DTOs)
//!
//! ## Module Organization
//!
//! - [`contract`] - chess contract messages and responses
//! - [`tx`] - fees, coins, and execution results
//! - [`chain`] - chain registration data sent to the wallet
//! - [`bridge`] - wallet bridge protocol
//!
//! ## Example JSON Communication
//!
//! ```text
//! {"move": {"game_id": 12, "action": {"make_move": "Nf3"}}}
//! {"move": {"game_id": 12, "action": "resign"}}
//! ```

pub mod bridge;
pub mod chain;
pub mod contract;
pub mod tx;

pub use bridge::*;
pub use chain::*;
pub use contract::*;
pub use tx::*;
