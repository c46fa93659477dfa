use serde::Serialize;
use tracing::debug;

use crate::ledger::account::{ClientAccount, Payment};
use crate::ledger::amount::{enrich, EnrichedEntry};
use crate::ledger::range::{filter_and_sort, DateRange};
use crate::ledger::rates::RateResolver;

/// Filtered, priced and totalled ledger of one client over one date window.
///
/// `balance` is copied from the account as-is; it does not depend on `range`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerView {
    pub client_name: String,
    pub balance: f64,
    pub range: DateRange,
    pub entries: Vec<EnrichedEntry>,
    pub payments: Vec<Payment>,
    pub total_sales: f64,
    pub total_payments: f64,
}

/// Build the ledger view. Any change to the inputs means calling this again.
pub fn build<R>(account: &ClientAccount, rates: &R, range: &DateRange) -> LedgerView
where
    R: RateResolver + ?Sized,
{
    let entries = filter_and_sort(
        account
            .entries
            .iter()
            .map(|entry| enrich(entry, rates, &account.name)),
        range,
    );
    let payments = filter_and_sort(account.payments.iter().cloned(), range);

    let total_sales: f64 = entries.iter().map(|e| e.amount).sum();
    let total_payments: f64 = payments.iter().map(|p| p.amount.coerce()).sum();

    debug!(
        client = %account.name,
        entries = entries.len(),
        payments = payments.len(),
        total_sales,
        total_payments,
        "built ledger view"
    );

    LedgerView {
        client_name: account.name.clone(),
        balance: account.balance,
        range: *range,
        entries,
        payments,
        total_sales,
        total_payments,
    }
}
