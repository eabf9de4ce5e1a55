//! # Services Module
//!
//! Integrations with the outside world: the wallet, the chain, local rules
//! and persisted session state.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── api/            - Contract client, LCD client, wallet bridge
//! ├── rules.rs        - Local position replay (chess crate)
//! ├── session_store.rs - Persisted "stay connected" flag
//! └── wallet.rs       - Wallet session manager
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Chess Terminal                        │
//! │                                                           │
//! │  ┌──────────────────┐        ┌─────────────────────────┐ │
//! │  │  ChessContract   │ ─────▶ │  SessionManager         │ │
//! │  │  (api/client.rs) │        │  (wallet.rs)            │ │
//! │  └──────────────────┘        └──────┬───────────┬──────┘ │
//! │                                     │           │        │
//! └─────────────────────────────────────┼───────────┼────────┘
//!                           query (LCD) │           │ execute / approve
//!                                       ▼           ▼
//!                        ┌────────────────┐   ┌──────────────────┐
//!                        │ CosmWasm chain │   │ Wallet bridge    │
//!                        │ (rpc / rest)   │   │ (browser wallet) │
//!                        └────────────────┘   └──────────────────┘
//! ```
//!
//! ## Security Model
//!
//! - **Keys never reach the terminal.** The wallet signs and broadcasts.
//! - Reads never open a wallet prompt.

pub mod api;
pub mod rules;
pub mod session_store;
pub mod wallet;

#[cfg(test)]
pub(crate) mod mock;

pub use rules::{HistoryEntry, LocalPosition};
pub use session_store::FileSessionStore;
pub use wallet::{Session, SessionManager, SessionStatus};
