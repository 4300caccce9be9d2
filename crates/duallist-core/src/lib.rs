//! # Dual-List Core
//!
//! In-memory list engine behind the dual-list server.
//!
//! ```text
//! duallist-core/src/
//! ├── store/        # OrderedCollection + ListStore (Available / Selected)
//! ├── queue/        # Mutation enum, in-flight registry, MutationQueue
//! ├── dispatcher/   # intent validation, keying policy, paginated reads
//! └── error.rs      # errors raised while applying a flushed mutation
//! ```
//!
//! Request handlers never touch the collections directly. They go through
//! [`MutationDispatcher`], which validates an intent against committed state
//! and registers a keyed [`Mutation`] in one of two [`MutationQueue`]s. Only a
//! flush takes the store write lock, and each queue runs at most one flush at
//! a time.

#![allow(
    clippy::significant_drop_tightening,
    reason = "Store write guard intentionally spans a whole flush batch"
)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod dispatcher;
pub mod error;
pub mod queue;
pub mod store;

// Re-export commonly used types
pub use dispatcher::MutationDispatcher;
pub use error::{ApplyError, ApplyResult};
pub use queue::{Anchor, EnqueueOutcome, FlushOutcome, InFlightRegistry, Mutation, MutationQueue};
pub use store::{ListStore, OrderedCollection, SharedStore};
