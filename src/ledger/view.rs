use crate::ledger::account::{ClientAccount, Payment};
use crate::ledger::aggregator::{build, LedgerView};
use crate::ledger::amount::EnrichedEntry;
use crate::ledger::pagination::{page, PaginationState, ViewPage};
use crate::ledger::rates::RateResolver;
use crate::report::{render_ledger, Document, RenderContext};

/// Everything a client screen shows: the two visible pages and the
/// exportable document over the full filtered ledger.
#[derive(Debug, Clone)]
pub struct DerivedView {
    pub ledger: LedgerView,
    pub entries: ViewPage<EnrichedEntry>,
    pub payments: ViewPage<Payment>,
    pub document: Document,
}

/// Recompute the whole view from its inputs.
///
/// Called after every change to the account, rates or display state.
pub fn derive_view<R>(
    account: &ClientAccount,
    rates: &R,
    state: &PaginationState,
    ctx: &RenderContext,
) -> DerivedView
where
    R: RateResolver + ?Sized,
{
    let ledger = build(account, rates, &state.range);
    let page_size = state.page_size.get();

    let entries = page(&ledger.entries, state.entry_page, page_size);
    let payments = page(&ledger.payments, state.payment_page, page_size);
    let document = render_ledger(account, &ledger, ctx);

    DerivedView {
        ledger,
        entries,
        payments,
        document,
    }
}
