//! Collection identifiers and read queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two collections an operation targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ListKind {
    /// The "all items" collection
    #[default]
    #[serde(rename = "all")]
    Available,
    /// The "selected items" collection
    #[serde(rename = "selected")]
    Selected,
}

impl ListKind {
    /// The collection items move into when they leave this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::Available => Self::Selected,
            Self::Selected => Self::Available,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Available => write!(f, "all"),
            Self::Selected => write!(f, "selected"),
        }
    }
}

/// Query string for paginated reads: `?collection=all&page=1&limit=20&filter=12`.
///
/// `selected=true|false` is still accepted for older clients; an explicit
/// `collection` wins when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListQuery {
    #[serde(default)]
    pub collection: Option<ListKind>,
    #[serde(default)]
    pub selected: Option<bool>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub filter: Option<String>,
}

impl ListQuery {
    pub fn kind(&self) -> ListKind {
        match (self.collection, self.selected) {
            (Some(kind), _) => kind,
            (None, Some(true)) => ListKind::Selected,
            (None, _) => ListKind::Available,
        }
    }

    /// 1-based page number; page 0 reads as the first page.
    pub fn page_number(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, defaulted and capped.
    pub fn effective_limit(&self, default_limit: usize, max_limit: usize) -> usize {
        self.limit.unwrap_or(default_limit).min(max_limit)
    }

    /// Blank filters are treated as no filter.
    pub fn filter_text(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }
}
