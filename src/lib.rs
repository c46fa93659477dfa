pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod pdf;
pub mod report;
pub mod source;

pub use config::{BackendSettings, Config, ReportSettings};
pub use error::{LedgerError, Result};
pub use ledger::{
    build, derive_view, ClientAccount, ClientRecord, DateRange, DerivedView, LedgerView,
    PageSize, PaginationState, Payment, RateResolver, RateTable, SaleEntry, ViewPage,
};
pub use report::{render, Document, RenderContext};
