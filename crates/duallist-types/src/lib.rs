//! # Dual-List Types
//!
//! Core types, models, and error definitions for the dual-list server.
//!
//! - **`error`** - Typed error hierarchy for mutation intents and configuration
//! - **`models`** - Domain models (Item, ListKind, requests, stats, config)
//!
//! ## Architecture Role
//!
//! `duallist-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!        duallist-types (this crate)
//!                │
//!                ▼
//!          duallist-core
//!                │
//!                ▼
//!         duallist-server
//! ```
//!
//! All types are designed to be:
//! - **Serializable** via serde for the HTTP API
//! - **Clone** for cheap sharing across async boundaries
//! - **PartialEq** for testing and comparison

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{ConfigError, MutationError};

// Re-export core model types
pub use models::{AppConfig, Item, ListKind, ListQuery, QueueStats, QueuedResponse};
