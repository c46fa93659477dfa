pub mod format;
mod layout;
mod renderer;

pub use layout::{
    Document, DrawOp, Page, Rgb, CONTENT_LIMIT, CONTENT_RIGHT, MARGIN_LEFT, PAGE_HEIGHT,
    PAGE_WIDTH, ROW_HEIGHT, TOP,
};
pub use renderer::{render, render_ledger, RenderContext, NO_SALES, NO_TRANSACTIONS};
