use serde::Deserialize;

use crate::users::repo_types::Page;

pub const DEFAULT_PAGE_SIZE: i64 = 15;

/// Raw `page` / `count` query values. Kept as strings so that junk input
/// degrades to the defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name_substr: Option<String>,
}

/// Parsed pagination, with the page number kept for rendering links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: i64,
    pub count: i64,
}

impl Paging {
    pub fn as_page(&self) -> Page {
        Page {
            limit: self.count,
            offset: self.page.saturating_mul(self.count),
        }
    }
}

/// Non-numeric values count as 0; a non-positive count falls back to
/// [`DEFAULT_PAGE_SIZE`] and a negative page to the first one.
pub fn parse_paging(params: &PageParams) -> Paging {
    let page = lenient_int(params.page.as_deref()).max(0);
    let count = match lenient_int(params.count.as_deref()) {
        c if c <= 0 => DEFAULT_PAGE_SIZE,
        c => c,
    };
    Paging { page, count }
}

pub(crate) fn lenient_int(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0)
}
