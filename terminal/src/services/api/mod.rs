//! # Chain and Wallet Adapters
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports
//! ├── client.rs   - ChessContract: typed contract queries and executions
//! ├── lcd.rs      - LCD query client, signing client, client factory
//! └── bridge.rs   - Wallet bridge provider, signer and event stream
//! ```

pub mod bridge;
pub mod client;
pub mod lcd;

pub use bridge::{BridgeSigner, BridgeWalletProvider};
pub use client::ChessContract;
pub use lcd::{CosmWasmClientFactory, LcdQueryClient, SignerClient};
