//! Configuration enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a newly added item lands in the "all items" collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AddPlacement {
    /// Newest items first
    #[default]
    Front,
    /// Append after existing items
    Back,
}

impl fmt::Display for AddPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Front => write!(f, "front"),
            Self::Back => write!(f, "back"),
        }
    }
}
