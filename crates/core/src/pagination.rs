//! Listing helpers shared by every collection: limit/offset clamping and
//! creation-order sorting.

/// Default page size when the caller omits `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Upper bound on a single page.
pub const MAX_LIST_LIMIT: i64 = 100;

define_text_enum! {
    /// Direction of the creation-order sort applied to list queries.
    SortOrder ("sort order") {
        Asc = "asc",
        Desc = "desc",
    }
}

impl SortOrder {
    /// SQL keyword for this direction.
    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

/// Clamp a user-provided limit to `[1, max]`, using `default` if absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// A resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT),
            offset: clamp_offset(offset),
        }
    }

    /// Apply the window to an already filtered and sorted sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}
