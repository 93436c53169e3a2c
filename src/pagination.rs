/// Page size applied when a list request does not specify a limit.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Upper bound on the number of rows a single list request may return.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Limit/offset window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Build a window, clamping the limit to `1..=MAX_PAGE_SIZE` and the
    /// offset to zero or above.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }

    /// Build a window from optional query parameters.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self::new(limit.unwrap_or(DEFAULT_PAGE_SIZE), offset.unwrap_or(0))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}
