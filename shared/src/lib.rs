//! # Shared Contract Types
//!
//! Wire types exchanged between the chess terminal, the CosmWasm chess
//! contract, and the local wallet bridge. Everything here is plain data with
//! `serde` derives; no I/O happens in this crate.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::contract`]**: contract execute/query messages, games, challenges
//!   - **[`dto::tx`]**: coins, fees, and transaction results
//!   - **[`dto::chain`]**: Keplr-compatible chain description
//!   - **[`dto::bridge`]**: wallet bridge requests, accounts, and events
//! - **[`utils`]**: display helpers (addresses, block times, game status)
//!
//! ## Wire Format
//!
//! Contract messages follow CosmWasm conventions:
//! - Message enums are externally tagged with **snake_case** names
//!   (`{"get_game": {"game_id": 7}}`)
//! - Optional fields are omitted when `None`
//! - Chain descriptions use **camelCase**, matching what browser wallets expect
//!
//! ## Usage
//!
//! ```rust
//! use chess_shared::dto::contract::{MoveAction, QueryMsg};
//!
//! let query = QueryMsg::GetGame { game_id: 7 };
//! let json = serde_json::to_value(&query).unwrap();
//! assert_eq!(json, serde_json::json!({"get_game": {"game_id": 7}}));
//!
//! let action = MoveAction::MakeMove("e4".to_string());
//! assert_eq!(serde_json::to_value(&action).unwrap(), serde_json::json!({"make_move": "e4"}));
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
