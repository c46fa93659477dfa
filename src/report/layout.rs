//! Fixed-layout document model.
//!
//! Coordinates are millimetres from the top-left corner of an A4 page. Text
//! `y` is the baseline.

use serde::Serialize;

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;
pub const MARGIN_LEFT: f64 = 10.0;
pub const CONTENT_RIGHT: f64 = 200.0;
/// Cursor position at the top of every page
pub const TOP: f64 = 10.0;
/// Past this cursor position the next row goes on a new page
pub const CONTENT_LIMIT: f64 = 270.0;
pub const ROW_HEIGHT: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const PRIMARY: Rgb = Rgb(33, 150, 243);
    pub const DANGER: Rgb = Rgb(244, 67, 54);
    pub const SUCCESS: Rgb = Rgb(76, 175, 80);
    pub const LIGHT_GRAY: Rgb = Rgb(230, 230, 230);
    pub const RULE_GRAY: Rgb = Rgb(150, 150, 150);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        color: Rgb,
        bold: bool,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    Rule {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text of every text op on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A rendered report, ready for export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub filename: String,
    pub width: f64,
    pub height: f64,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }
}
