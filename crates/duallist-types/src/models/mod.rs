//! Core domain models for the dual-list server.
//!
//! This module contains all shared data structures used across the workspace.

pub mod config;
mod item;
mod list;
mod request;
mod stats;

// Re-export all models
pub use config::{AddPlacement, AppConfig, PaginationConfig, QueueConfig, ServerConfig, StoreConfig};
pub use item::Item;
pub use list::{ListKind, ListQuery};
pub use request::{AddRequest, MoveRequest, QueuedResponse, ReorderRequest};
pub use stats::{FlushReport, QueueStats, StoreStats};
