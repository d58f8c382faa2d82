//! Client-supplied pagination arguments.

use serde::Deserialize;

/// Pagination arguments for list queries.
///
/// Supports forward pagination (`first`/`after`), backward pagination
/// (`last`/`before`) and fixed page numbers (`page`). Which combinations are
/// accepted depends on the paging strategy. Values are kept signed so that
/// out-of-range input reaches validation instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionArgs {
    /// Page of edges by fixed offset page number (1-based).
    pub page: Option<i64>,
    /// Number of edges to fetch (forward pagination).
    pub first: Option<i64>,
    /// Number of edges to fetch (backward pagination).
    pub last: Option<i64>,
    /// Cursor to end before (backward pagination).
    pub before: Option<String>,
    /// Cursor to start after (forward pagination).
    pub after: Option<String>,
}

impl ConnectionArgs {
    pub fn first(n: i64) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }

    pub fn last(n: i64) -> Self {
        Self {
            last: Some(n),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn with_before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }
}
