//! Free text search and page arithmetic for the capture history.

/// Number of records served per page
pub const PAGE_SIZE: u32 = 50;

/// A parsed listing request: search terms plus the 1-based page to serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub terms: Vec<String>,
    pub page: u32,
}

impl SearchQuery {
    /// Build a query from the raw `q` and `page` parameters. A missing,
    /// zero or unparseable page means page 1.
    pub fn parse(q: Option<&str>, page: Option<&str>) -> Self {
        let sanitized = sanitize_query(q.unwrap_or_default());
        Self {
            terms: split_terms(&sanitized),
            page: parse_page(page),
        }
    }

    /// Rows to skip before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(PAGE_SIZE) * u64::from(self.page.saturating_sub(1))
    }
}

/// Replace every character outside `[0-9a-zA-Z\s.]` with a space and
/// collapse whitespace runs into a single space.
pub fn sanitize_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_blank = false;
    for c in raw.chars() {
        let c = if is_query_char(c) { c } else { ' ' };
        if c.is_ascii_whitespace() {
            if !previous_blank {
                out.push(' ');
            }
            previous_blank = true;
        } else {
            out.push(c);
            previous_blank = false;
        }
    }
    out
}

fn is_query_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_ascii_whitespace() || c == '.'
}

/// Whitespace separated terms; an empty query has none
pub fn split_terms(sanitized: &str) -> Vec<String> {
    sanitized.split_whitespace().map(str::to_string).collect()
}

pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// `ceil(total / PAGE_SIZE)`
pub fn page_count(total: u64) -> u32 {
    let pages = total.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}
