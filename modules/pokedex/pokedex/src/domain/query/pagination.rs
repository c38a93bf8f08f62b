//! Page-based pagination: request parsing and page metadata.

use pokedex_sdk::PageInfo;

/// Page size limits applied to list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitCfg {
    pub default: u64,
    pub max: u64,
}

impl Default for LimitCfg {
    fn default() -> Self {
        Self {
            default: 20,
            max: 100,
        }
    }
}

/// Validated page window of a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Parse raw `page` / `limit` values.
    ///
    /// Missing, non-numeric or non-positive values fall back to page 1 and
    /// the configured default limit; limits above `cfg.max` are capped.
    #[must_use]
    pub fn parse(page: Option<&str>, limit: Option<&str>, cfg: LimitCfg) -> Self {
        let page = positive(page).unwrap_or(1);
        let limit = positive(limit)
            .unwrap_or(cfg.default)
            .min(cfg.max.max(1));
        Self { page, limit }
    }

    /// Number of records to skip before this page.
    #[must_use]
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}

/// Page metadata for `page` of a result set of `total` items.
///
/// Pages past the end are legal; they simply report no next page.
#[must_use]
pub fn compute(page: u64, total: u64, limit: u64) -> PageInfo {
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
    PageInfo {
        current_page: page,
        total_pages,
        total_items: total,
        items_per_page: limit,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}
