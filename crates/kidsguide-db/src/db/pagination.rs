//! Page/limit pagination shared by every listing query.

use serde::Serialize;

/// A 1-based page request with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// ## Summary
    /// Builds a page request from optional query values.
    ///
    /// Missing or zero `page` becomes 1; missing or zero `limit` becomes
    /// `default_limit`; `limit` is capped at `max_limit`.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1));
        Self { page, limit }
    }

    #[must_use]
    pub fn offset(self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    #[must_use]
    pub fn limit(self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// One page of results plus the total row count for the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    #[must_use]
    pub fn total_pages(&self) -> i64 {
        let limit = self.request.limit();
        (self.total + limit - 1) / limit
    }

    /// Converts the items while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }

    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.request.page,
            limit: self.request.limit,
            total: self.total,
            total_pages: self.total_pages(),
        }
    }
}

/// Serializable paging metadata for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let req = PageRequest::new(None, None, 20, 100);
        assert_eq!(req, PageRequest { page: 1, limit: 20 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_zero_values_fall_back() {
        let req = PageRequest::new(Some(0), Some(0), 20, 100);
        assert_eq!(req, PageRequest { page: 1, limit: 20 });
    }

    #[test]
    fn test_limit_is_capped() {
        let req = PageRequest::new(Some(3), Some(500), 20, 100);
        assert_eq!(req.limit, 100);
        assert_eq!(req.offset(), 200);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<()> = Page {
            items: vec![],
            total: 41,
            request: PageRequest { page: 1, limit: 20 },
        };
        assert_eq!(page.total_pages(), 3);

        let empty: Page<()> = Page {
            items: vec![],
            total: 0,
            request: PageRequest::default(),
        };
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let page = Page {
            items: vec![1, 2],
            total: 2,
            request: PageRequest::default(),
        }
        .map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);

        let json = serde_json::to_value(page.meta()).unwrap_or_default();
        assert_eq!(json["totalPages"], 1);
    }
}
