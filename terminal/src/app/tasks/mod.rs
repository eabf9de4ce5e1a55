//! # Async Tasks
//!
//! Spawned network work. Each task reports back through the `AppEvent`
//! channel; none holds a lock across `.await`.

pub mod game;
pub mod lobby;
pub mod session;
