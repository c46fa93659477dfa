use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::ledger::account::{ClientAccount, Payment};
use crate::ledger::aggregator::LedgerView;
use crate::ledger::amount::EnrichedEntry;
use crate::ledger::range::DateRange;
use crate::report::format::{format_date, format_money, period_end, period_start, report_filename};
use crate::report::layout::{
    Document, DrawOp, Page, Rgb, CONTENT_LIMIT, CONTENT_RIGHT, MARGIN_LEFT, PAGE_HEIGHT,
    PAGE_WIDTH, ROW_HEIGHT, TOP,
};

pub const NO_SALES: &str = "No sales found in selected period.";
pub const NO_TRANSACTIONS: &str = "No transactions found in selected period.";

const BODY_SIZE: f64 = 10.0;
const COMMENT_WIDTH: usize = 24;

/// Inputs of a render that do not come from the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub generated_at: NaiveDateTime,
    pub currency_symbol: String,
}

impl RenderContext {
    pub fn new(generated_at: NaiveDateTime, currency_symbol: impl Into<String>) -> Self {
        Self {
            generated_at,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn now(currency_symbol: impl Into<String>) -> Self {
        Self::new(Local::now().naive_local(), currency_symbol)
    }

    fn money(&self, value: f64) -> String {
        format_money(&self.currency_symbol, value)
    }
}

/// Drawing cursor over a growing list of pages
struct Canvas {
    done: Vec<Page>,
    current: Page,
    y: f64,
}

impl Canvas {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            current: Page::default(),
            y: TOP,
        }
    }

    fn text(&mut self, x: f64, text: impl Into<String>, size: f64, color: Rgb, bold: bool) {
        self.current.ops.push(DrawOp::Text {
            x,
            y: self.y,
            text: text.into(),
            size,
            color,
            bold,
        });
    }

    fn row_background(&mut self, color: Rgb) {
        self.current.ops.push(DrawOp::FillRect {
            x: MARGIN_LEFT,
            y: self.y - 4.0,
            width: CONTENT_RIGHT - MARGIN_LEFT,
            height: ROW_HEIGHT,
            color,
        });
    }

    fn rule(&mut self, color: Rgb) {
        self.current.ops.push(DrawOp::Rule {
            x1: MARGIN_LEFT,
            y1: self.y,
            x2: CONTENT_RIGHT,
            y2: self.y,
            color,
        });
    }

    fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Start a new page once the cursor has left the content area
    fn break_if_full(&mut self) {
        if self.y > CONTENT_LIMIT {
            self.done.push(std::mem::take(&mut self.current));
            self.y = TOP;
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.current);
        self.done
    }
}

fn stripe(index: usize) -> Rgb {
    if index % 2 == 0 {
        Rgb::LIGHT_GRAY
    } else {
        Rgb::WHITE
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

fn column_headers(canvas: &mut Canvas, columns: &[(f64, &str)]) {
    canvas.break_if_full();
    for (x, label) in columns {
        canvas.text(*x, *label, BODY_SIZE, Rgb::BLACK, true);
    }
    canvas.advance(5.0);
    canvas.rule(Rgb::LIGHT_GRAY);
    canvas.advance(3.0);
}

fn section_heading(canvas: &mut Canvas, title: &str, color: Rgb) {
    canvas.break_if_full();
    canvas.text(MARGIN_LEFT, title, 14.0, color, true);
    canvas.advance(8.0);
}

fn header(canvas: &mut Canvas, account: &ClientAccount, range: &DateRange, ctx: &RenderContext) {
    let today = ctx.generated_at.date();

    canvas.text(MARGIN_LEFT, account.name.as_str(), 20.0, Rgb::PRIMARY, true);
    canvas.advance(10.0);

    canvas.text(
        MARGIN_LEFT,
        format!(
            "Report Period: {} to {}",
            period_start(range),
            period_end(range, today)
        ),
        11.0,
        Rgb::BLACK,
        false,
    );
    canvas.advance(6.0);
    canvas.text(
        MARGIN_LEFT,
        format!("Generated on: {}", ctx.generated_at.format("%Y-%m-%d %H:%M")),
        11.0,
        Rgb::BLACK,
        false,
    );
    canvas.advance(8.0);

    canvas.text(
        MARGIN_LEFT,
        format!("Remaining Balance: {}", ctx.money(account.balance)),
        12.0,
        Rgb::DANGER,
        true,
    );
    canvas.advance(10.0);

    canvas.rule(Rgb::RULE_GRAY);
    canvas.advance(6.0);
}

fn sales_section(
    canvas: &mut Canvas,
    entries: &[EnrichedEntry],
    total_sales: f64,
    ctx: &RenderContext,
) {
    section_heading(canvas, "Sales", Rgb::PRIMARY);
    column_headers(
        canvas,
        &[(10.0, "Date"), (45.0, "Qty"), (70.0, "Size"), (140.0, "Amount")],
    );

    for (i, enriched) in entries.iter().enumerate() {
        canvas.break_if_full();
        canvas.row_background(stripe(i));
        let entry = &enriched.entry;
        let size = if entry.size.is_empty() {
            "-".to_string()
        } else {
            entry.size.clone()
        };
        canvas.text(10.0, format_date(entry.date), BODY_SIZE, Rgb::BLACK, false);
        canvas.text(45.0, entry.quantity.to_string(), BODY_SIZE, Rgb::BLACK, false);
        canvas.text(70.0, size, BODY_SIZE, Rgb::BLACK, false);
        canvas.text(140.0, ctx.money(enriched.amount), BODY_SIZE, Rgb::BLACK, false);

        canvas.advance(ROW_HEIGHT);
    }

    if entries.is_empty() {
        canvas.break_if_full();
        canvas.text(MARGIN_LEFT, NO_SALES, BODY_SIZE, Rgb::BLACK, false);
        canvas.advance(ROW_HEIGHT);
    }

    canvas.advance(4.0);
    canvas.break_if_full();
    canvas.text(
        MARGIN_LEFT,
        format!("Total Sales: {}", ctx.money(total_sales)),
        BODY_SIZE,
        Rgb::PRIMARY,
        true,
    );
    canvas.advance(10.0);
}

fn transactions_section(
    canvas: &mut Canvas,
    payments: &[Payment],
    total_payments: f64,
    ctx: &RenderContext,
) {
    section_heading(canvas, "Transactions", Rgb::SUCCESS);
    column_headers(
        canvas,
        &[
            (10.0, "Date"),
            (45.0, "Amount"),
            (85.0, "Medium"),
            (125.0, "Method"),
            (160.0, "Comment"),
        ],
    );

    for (i, payment) in payments.iter().enumerate() {
        canvas.break_if_full();
        canvas.row_background(stripe(i));
        let medium = or_dash(payment.medium.as_ref().map(ToString::to_string));
        let method = or_dash(payment.transfer_method.as_ref().map(ToString::to_string));
        let comment = or_dash(payment.comment.as_deref().map(|c| clip(c, COMMENT_WIDTH)));

        canvas.text(10.0, format_date(payment.date), BODY_SIZE, Rgb::BLACK, false);
        canvas.text(45.0, ctx.money(payment.amount.coerce()), BODY_SIZE, Rgb::BLACK, false);
        canvas.text(85.0, medium, BODY_SIZE, Rgb::BLACK, false);
        canvas.text(125.0, method, BODY_SIZE, Rgb::BLACK, false);
        canvas.text(160.0, comment, BODY_SIZE, Rgb::BLACK, false);

        canvas.advance(ROW_HEIGHT);
    }

    if payments.is_empty() {
        canvas.break_if_full();
        canvas.text(MARGIN_LEFT, NO_TRANSACTIONS, BODY_SIZE, Rgb::BLACK, false);
        canvas.advance(ROW_HEIGHT);
    }

    canvas.advance(4.0);
    canvas.break_if_full();
    canvas.text(
        MARGIN_LEFT,
        format!("Total Transactions: {}", ctx.money(total_payments)),
        BODY_SIZE,
        Rgb::PRIMARY,
        true,
    );
    canvas.advance(10.0);
}

fn footer(canvas: &mut Canvas, account: &ClientAccount, total_payments: f64, ctx: &RenderContext) {
    canvas.break_if_full();
    canvas.rule(Rgb::RULE_GRAY);
    canvas.advance(7.0);
    canvas.break_if_full();
    canvas.text(
        MARGIN_LEFT,
        format!("Grand Total of Transactions: {}", ctx.money(total_payments)),
        12.0,
        Rgb::SUCCESS,
        true,
    );
    canvas.advance(7.0);
    canvas.break_if_full();
    canvas.text(
        MARGIN_LEFT,
        format!("Final Balance: {}", ctx.money(account.balance)),
        13.0,
        Rgb::DANGER,
        true,
    );
}

/// Lay out the client report over the whole filtered ledger.
///
/// The banner and footer always show `account.balance`, whatever `range` is.
pub fn render(
    account: &ClientAccount,
    entries: &[EnrichedEntry],
    payments: &[Payment],
    total_sales: f64,
    total_payments: f64,
    range: &DateRange,
    ctx: &RenderContext,
) -> Document {
    let mut canvas = Canvas::new();

    header(&mut canvas, account, range, ctx);
    sales_section(&mut canvas, entries, total_sales, ctx);
    transactions_section(&mut canvas, payments, total_payments, ctx);
    footer(&mut canvas, account, total_payments, ctx);

    let pages = canvas.finish();
    debug!(
        client = %account.name,
        pages = pages.len(),
        entries = entries.len(),
        payments = payments.len(),
        "rendered report"
    );

    Document {
        filename: report_filename(&account.name, range, ctx.generated_at.date()),
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        pages,
    }
}

/// Render straight from an aggregated ledger view
pub fn render_ledger(account: &ClientAccount, view: &LedgerView, ctx: &RenderContext) -> Document {
    render(
        account,
        &view.entries,
        &view.payments,
        view.total_sales,
        view.total_payments,
        &view.range,
        ctx,
    )
}
