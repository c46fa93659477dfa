pub mod account;
pub mod aggregator;
pub mod amount;
pub mod pagination;
pub mod range;
pub mod rates;
mod view;

pub use account::{
    ClientAccount, ClientRecord, FanAccount, FanSale, InventoryItem, Medium, NumberLike, Payment,
    SaleEntry, TransferMethod,
};
pub use aggregator::{build, LedgerView};
pub use amount::{enrich, EnrichedEntry};
pub use pagination::{page, PageSize, PaginationState, ViewPage};
pub use range::{filter_and_sort, in_range, DateRange, Dated};
pub use rates::{RateResolver, RateTable};
pub use view::{derive_view, DerivedView};
