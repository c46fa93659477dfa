use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::ledger::account::{FanSale, Payment, SaleEntry};
use crate::ledger::amount::EnrichedEntry;

/// Inclusive date window. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Parse user supplied YYYY-MM-DD bounds, rejecting a reversed window
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = from.map(parse_bound).transpose()?;
        let to = to.map(parse_bound).transpose()?;

        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(LedgerError::InvalidRange {
                    from: f.to_string(),
                    to: t.to_string(),
                });
            }
        }

        Ok(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

fn parse_bound(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(raw.to_string()))
}

/// Records that can be placed on the ledger timeline
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for SaleEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for EnrichedEntry {
    fn date(&self) -> NaiveDate {
        self.entry.date
    }
}

impl Dated for Payment {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for FanSale {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

pub fn in_range(date: NaiveDate, range: &DateRange) -> bool {
    range.contains(date)
}

/// Keep the records inside `range`, newest first.
///
/// Records sharing a date keep their input order.
pub fn filter_and_sort<T, I>(records: I, range: &DateRange) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Dated,
{
    let mut kept: Vec<T> = records
        .into_iter()
        .filter(|record| in_range(record.date(), range))
        .collect();
    // sort_by is stable
    kept.sort_by(|a, b| b.date().cmp(&a.date()));
    kept
}
