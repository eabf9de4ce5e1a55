//! # Chess Terminal - Library Root
//!
//! Terminal client for a CosmWasm chess contract. Moves are checked locally
//! with the `chess` crate, staged, and only then signed by the user's wallet.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              terminal (this crate)                     │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio             - Async runtime                     │
//! │  Reqwest           - LCD queries, wallet bridge HTTP   │
//! │  tokio-tungstenite - Wallet account-change events      │
//! │  chess             - Local move legality and replay    │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP / WebSocket             │ LCD (REST)
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Wallet bridge  │ ───────▶ │   CosmWasm chain        │
//! │  (signs, sends) │          │   (chess contract)      │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: command handling, game view model, background tasks
//! - **config**: environment configuration and chain presets
//! - **core**: `AppError` and the service traits
//! - **debug**: file logging
//! - **services**: session manager, contract client, adapters, rules
//! - **ui**: text renderers
//!
//! ```text
//! main.rs
//!   │
//!   ├── app (commands, events, GameView)
//!   │   ├── services::api::ChessContract
//!   │   └── services::wallet::SessionManager
//!   │
//!   └── ui::board (rendering)
//! ```
//!
//! ## State Management
//!
//! Shared state sits behind `parking_lot` locks that are never held across
//! `.await`. Background tasks report back through `AppEvent`.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p chess-terminal
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;
