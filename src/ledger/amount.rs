use serde::Serialize;

use crate::ledger::account::SaleEntry;
use crate::ledger::rates::RateResolver;

/// A sale entry with its resolved unit price and line amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedEntry {
    #[serde(flatten)]
    pub entry: SaleEntry,
    pub rate: f64,
    pub amount: f64,
}

/// Price one sale entry. Unknown sizes and unreadable quantities price at 0.
pub fn enrich<R>(entry: &SaleEntry, rates: &R, client_name: &str) -> EnrichedEntry
where
    R: RateResolver + ?Sized,
{
    let rate = rates.rate(client_name, &entry.size);
    let rate = if rate.is_finite() { rate } else { 0.0 };
    let amount = entry.quantity.coerce() * rate;

    EnrichedEntry {
        entry: entry.clone(),
        rate,
        amount,
    }
}
