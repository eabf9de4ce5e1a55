//! # Core Abstractions
//!
//! Error types and the service traits everything else is written against.
//!
//! ## Modules
//!
//! - **[`error`]**: `AppError` and the `Result<T>` alias
//! - **[`service`]**: wallet, client, and storage traits
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chess_terminal::core::service::{ClientFactory, WalletProvider};
//! use chess_terminal::services::api::{BridgeWalletProvider, CosmWasmClientFactory};
//!
//! let provider: Arc<dyn WalletProvider> = Arc::new(BridgeWalletProvider::new("http://127.0.0.1:8787"));
//! let factory: Arc<dyn ClientFactory> = Arc::new(CosmWasmClientFactory::new());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{
    ClientFactory, OfflineSigner, QueryClient, SessionStore, SigningClient, WalletEvent,
    WalletProvider,
};
