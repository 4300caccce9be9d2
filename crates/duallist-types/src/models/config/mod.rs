//! Application and server configuration models.

mod app;
mod enums;
mod queue;
mod server;

pub use app::{AppConfig, PaginationConfig, StoreConfig};
pub use enums::AddPlacement;
pub use queue::QueueConfig;
pub use server::ServerConfig;
