//! Fixed-size paging over an already ordered list.

use std::ops::Range;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number. Pages below 1 are kept as-is and select nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Self {
        Page(number)
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// Index range this page covers in a list of `len` items, clipped to the list.
    pub fn range(&self, len: usize) -> Range<usize> {
        let Ok(number) = usize::try_from(self.0) else {
            return 0..0;
        };
        if number == 0 {
            return 0..0;
        }
        let start = (number - 1).saturating_mul(QUESTIONS_PER_PAGE).min(len);
        let end = start.saturating_add(QUESTIONS_PER_PAGE).min(len);
        start..end
    }
}

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

/// Takes the items of `page` out of `items`.
pub fn paginate<T>(items: Vec<T>, page: Page) -> Vec<T> {
    let range = page.range(items.len());
    items
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect()
}
