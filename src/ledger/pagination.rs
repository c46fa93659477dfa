use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LedgerError;
use crate::ledger::range::DateRange;

/// Rows-per-page presets offered to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const PRESETS: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Fifty,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = LedgerError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::PRESETS
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(LedgerError::InvalidPageSize(value))
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

/// One window of an ordered collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPage<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_count: usize,
}

impl<T> ViewPage<T> {
    pub fn total_pages(&self) -> usize {
        last_page(self.total_count, self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Highest valid 1-based page number; 1 for an empty collection
pub fn last_page(total_count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_count.div_ceil(page_size).max(1)
}

/// Slice out page `page_number` (1-based) of `items`.
///
/// Page numbers are clamped into `1..=last_page`, so a filter that shrinks
/// the collection lands on its last page instead of an empty one.
pub fn page<T: Clone>(items: &[T], page_number: usize, page_size: usize) -> ViewPage<T> {
    let page_size = page_size.max(1);
    let last = last_page(items.len(), page_size);
    let page_number = page_number.clamp(1, last);

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let slice = items.get(start..end).unwrap_or_default();

    debug!(page_number, page_size, total = items.len(), "paged collection");

    ViewPage {
        items: slice.to_vec(),
        page_number,
        page_size,
        total_count: items.len(),
    }
}

/// Display state of a client view: date window, rows per page and the
/// current page of each table.
///
/// Transitions return a new value. Changing the window or the page size
/// sends both tables back to page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub range: DateRange,
    pub page_size: PageSize,
    pub entry_page: usize,
    pub payment_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DateRange::unbounded(), PageSize::default())
    }
}

impl PaginationState {
    pub fn new(range: DateRange, page_size: PageSize) -> Self {
        Self {
            range,
            page_size,
            entry_page: 1,
            payment_page: 1,
        }
    }

    pub fn with_range(self, range: DateRange) -> Self {
        if range == self.range {
            return self;
        }
        Self::new(range, self.page_size)
    }

    pub fn with_page_size(self, page_size: PageSize) -> Self {
        if page_size == self.page_size {
            return self;
        }
        Self::new(self.range, page_size)
    }

    pub fn with_entry_page(self, entry_page: usize) -> Self {
        Self {
            entry_page: entry_page.max(1),
            ..self
        }
    }

    pub fn with_payment_page(self, payment_page: usize) -> Self {
        Self {
            payment_page: payment_page.max(1),
            ..self
        }
    }
}
