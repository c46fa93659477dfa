mod typst;

pub use typst::{generate_report_pdf, write_report_json};
