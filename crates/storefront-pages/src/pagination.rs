// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Previous/next links for product listings.

use thiserror::Error;
use url::Url;

/// Pager setup and navigation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagerError {
    /// `limit` was zero, so no page count exists.
    #[error("page limit must be positive")]
    ZeroLimit,
    /// The current location could not be parsed.
    #[error("invalid location: {0}")]
    BadHref(#[from] url::ParseError),
}

/// Position within a paginated listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    limit: u32,
    total: u32,
}

impl Pager {
    /// Pager at `page` of a listing with `total` items, `limit` per page.
    pub fn new(page: u32, limit: u32, total: u32) -> Result<Self, PagerError> {
        if limit == 0 {
            return Err(PagerError::ZeroLimit);
        }
        Ok(Self { page, limit, total })
    }

    /// Current page.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// `ceil(total / limit)`.
    pub const fn total_pages(&self) -> u32 {
        self.total.div_ceil(self.limit)
    }

    /// Page before this one, if any.
    pub fn previous(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// Page after this one, if any.
    pub fn next(&self) -> Option<u32> {
        (self.page < self.total_pages()).then(|| self.page + 1)
    }
}

/// `current_href` with its `page` query parameter set to `page`.
///
/// Other parameters keep their order; an existing `page` is replaced in place.
pub fn page_href(current_href: &str, page: u32) -> Result<String, PagerError> {
    let mut url = Url::parse(current_href)?;
    let page = page.to_string();
    let mut replaced = false;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(name, value)| {
            if name != "page" {
                return Some((name.into_owned(), value.into_owned()));
            }
            if replaced {
                return None;
            }
            replaced = true;
            Some((name.into_owned(), page.clone()))
        })
        .collect();
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (name, value) in &pairs {
            query.append_pair(name, value);
        }
        if !replaced {
            query.append_pair("page", &page);
        }
    }
    Ok(url.into())
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_is_rejected() {
        assert_eq!(Pager::new(1, 0, 10).unwrap_err(), PagerError::ZeroLimit);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pager::new(1, 12, 25).unwrap().total_pages(), 3);
        assert_eq!(Pager::new(1, 12, 24).unwrap().total_pages(), 2);
        assert_eq!(Pager::new(1, 12, 0).unwrap().total_pages(), 0);
    }

    #[test]
    fn bounds_stop_navigation() {
        let first = Pager::new(1, 10, 30).unwrap();
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));
        let last = Pager::new(3, 10, 30).unwrap();
        assert_eq!(last.previous(), Some(2));
        assert_eq!(last.next(), None);
    }

    #[test]
    fn href_replaces_existing_page() {
        let href = page_href("https://shop.test/products?category=mugs&page=2&sort=asc", 3).unwrap();
        assert_eq!(href, "https://shop.test/products?category=mugs&page=3&sort=asc");
    }

    #[test]
    fn href_appends_page() {
        assert_eq!(
            page_href("https://shop.test/products", 2).unwrap(),
            "https://shop.test/products?page=2"
        );
    }

    #[test]
    fn relative_href_is_rejected() {
        assert!(matches!(page_href("/products", 2), Err(PagerError::BadHref(_))));
    }
}
