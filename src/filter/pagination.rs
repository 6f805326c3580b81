use serde::Deserialize;

/// Page size used when the caller omits `limit` or sends an unusable value
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a caller may request
pub const MAX_LIMIT: u32 = 50;

/// Limit/offset pair for list endpoints.
///
/// Parsing never fails: a `limit` that is non-numeric or outside `1..=50`
/// falls back to 10, and an `offset` that is non-numeric or negative falls back to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, offset: 0 }
    }
}

impl Pagination {
    pub fn from_params(limit: Option<&str>, offset: Option<&str>) -> Self {
        let limit = limit
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|l| (1..=MAX_LIMIT as i64).contains(l))
            .map(|l| l as u32)
            .unwrap_or(DEFAULT_LIMIT);

        let offset = offset
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|o| u32::try_from(o).ok())
            .unwrap_or(0);

        Self { limit, offset }
    }
}

/// `?limit=&offset=` of the plain list endpoints, kept as raw strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_params(self.limit.as_deref(), self.offset.as_deref())
    }
}
