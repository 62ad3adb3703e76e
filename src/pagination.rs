//! Page arithmetic and paging metadata.

use serde::{Deserialize, Serialize};

/// Bounds applied when coercing `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: i64,
    pub max_size: i64,
}

impl From<&crate::config::ApiConfig> for PageLimits {
    fn from(api: &crate::config::ApiConfig) -> Self {
        Self {
            default_size: api.default_page_size,
            max_size: api.max_page_size,
        }
    }
}

/// Validated 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Rows to skip: `(page - 1) * size`
    pub fn skip(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.size)
    }

    pub fn take(&self) -> i64 {
        self.size
    }
}

/// Paging metadata rendered next to `data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page: i64,
    pub total_page: i64,
    pub total_item: i64,
}

impl Paging {
    pub fn new(request: &PageRequest, total_item: i64) -> Self {
        let total_page = if request.size > 0 {
            (total_item + request.size - 1) / request.size
        } else {
            0
        };
        Self {
            page: request.page,
            total_page,
            total_item,
        }
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub paging: Paging,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_and_take() {
        let first = PageRequest { page: 1, size: 10 };
        assert_eq!(first.skip(), 0);
        assert_eq!(first.take(), 10);
        assert_eq!(PageRequest { page: 3, size: 10 }.skip(), 20);
    }

    #[test]
    fn total_page_rounds_up() {
        let request = PageRequest { page: 1, size: 10 };
        assert_eq!(Paging::new(&request, 15).total_page, 2);
        assert_eq!(Paging::new(&request, 20).total_page, 2);
        assert_eq!(Paging::new(&request, 21).total_page, 3);
        assert_eq!(Paging::new(&request, 0).total_page, 0);
    }

    #[test]
    fn paging_serializes_camel_case() {
        let paging = Paging::new(&PageRequest { page: 2, size: 10 }, 15);
        let value = serde_json::to_value(paging).unwrap();
        assert_eq!(value, serde_json::json!({ "page": 2, "totalPage": 2, "totalItem": 15 }));
    }
}
