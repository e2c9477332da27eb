//! Offset pagination and the page envelope

use serde::Serialize;

/// Maximum items per page
pub const MAX_LIMIT: u32 = 100;

/// Default items per page
pub const DEFAULT_LIMIT: u32 = 20;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (1..=100)
    pub limit: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Limit is clamped to 1..=100
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Lenient construction from raw request values.
    ///
    /// Malformed or non-positive numbers fall back to page 1 and
    /// `default_limit` instead of failing the request.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, default_limit: u32) -> Self {
        let page = page.and_then(parse_positive).unwrap_or(1);
        let limit = limit.and_then(parse_positive).unwrap_or(default_limit);
        Self::new(page, limit)
    }

    /// SQL OFFSET value
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Parse a positive integer the way a browser form would send it:
/// surrounding whitespace is ignored and a fractional part is truncated.
pub fn parse_positive(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    let value = raw
        .parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?;

    if value < 1 {
        return None;
    }
    Some(u32::try_from(value).unwrap_or(u32::MAX))
}

/// One page of results plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    /// `ceil(total / limit)`; zero when nothing matched.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            return 0;
        }
        let total = self.total as u64;
        let limit = u64::from(self.limit.max(1));
        u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages(),
        }
    }
}

/// `pagination` object of the list envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: i64, page: u32, limit: u32) -> Page<()> {
        Page {
            items: vec![],
            total,
            page,
            limit,
        }
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn clamps_page_and_limit() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(1, 0).limit, 1);
        assert_eq!(Pagination::new(1, 999).limit, MAX_LIMIT);
    }

    #[test]
    fn malformed_raw_values_use_defaults() {
        let p = Pagination::from_raw(Some("abc"), Some("-5"), 20);
        assert_eq!(p, Pagination::new(1, 20));

        let p = Pagination::from_raw(Some(" 3 "), Some("2.9"), 20);
        assert_eq!(p, Pagination::new(3, 2));

        let p = Pagination::from_raw(None, None, 10);
        assert_eq!(p, Pagination::new(1, 10));
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(page_of(0, 1, 10).total_pages(), 0);
        assert_eq!(page_of(20, 1, 10).total_pages(), 2);
        assert_eq!(page_of(21, 1, 10).total_pages(), 3);
        assert_eq!(page_of(5, 1, 20).total_pages(), 1);
    }

    #[test]
    fn meta_serializes_camel_case() {
        let json = serde_json::to_value(page_of(25, 2, 10).meta()).unwrap();
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["total"], 25);
        assert_eq!(json["page"], 2);
        assert_eq!(json["limit"], 10);
    }
}
