//! # Logging Infrastructure
//!
//! File-based structured logging for the chess terminal.
//!
//! - Logs go to `logs/chess-terminal.log.<date>` (daily rotation)
//! - Writes are non-blocking so wallet prompts never wait on disk
//! - Panics are logged with their location before the default hook runs
//!
//! ## Configuration
//!
//! - `RUST_LOG`: filter (default `chess_terminal=info,warn`)
//! - `CHESS_LOG_DIR`: log directory (default `logs`)
//!
//! ```rust,no_run
//! let _guard = chess_terminal::debug::init();
//! tracing::info!(game_id = 7, san = "e4", "Move staged");
//! ```

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::init as init_logger;

use tracing_appender::non_blocking::WorkerGuard;

/// Initialize logging. Call once at startup and hold the guard.
pub fn init() -> Option<WorkerGuard> {
    init_logger()
}
