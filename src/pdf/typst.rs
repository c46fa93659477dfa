use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::report::Document;

const DATA_FILE: &str = "report_data.json";

/// Embedded Typst program that replays a laid-out report.
/// Uses a placeholder that gets replaced with the actual JSON file path
const REPORT_TEMPLATE: &str = r##"// Client Report Template
// Pages and draw operations are loaded from JSON

#let doc = json("DATA_JSON_PATH")

#set page(
  width: doc.width * 1mm,
  height: doc.height * 1mm,
  margin: 0mm,
)

#set text(font: "Helvetica", size: 10pt)

// Text ops carry the baseline; place() wants the top edge
#let ascent(size) = size * 0.3528 * 0.75

#for (i, pg) in doc.pages.enumerate() {
  if i > 0 { pagebreak() }
  for op in pg.ops {
    if op.kind == "fill_rect" {
      place(top + left, dx: op.x * 1mm, dy: op.y * 1mm,
        rect(width: op.width * 1mm, height: op.height * 1mm, fill: rgb(..op.color), stroke: none))
    } else if op.kind == "rule" {
      place(top + left,
        line(start: (op.x1 * 1mm, op.y1 * 1mm), end: (op.x2 * 1mm, op.y2 * 1mm), stroke: 0.3pt + rgb(..op.color)))
    } else if op.kind == "text" {
      place(top + left, dx: op.x * 1mm, dy: (op.y - ascent(op.size)) * 1mm,
        text(size: op.size * 1pt, fill: rgb(..op.color), weight: if op.bold { "bold" } else { "regular" }, op.text))
    }
  }
}
"##;

/// Write the report data and template into `dir`, returning the template path
fn stage_report(document: &Document, dir: &Path) -> Result<PathBuf> {
    // Serialize the document to JSON
    let json_data = serde_json::to_string(document)
        .map_err(|e| LedgerError::PdfGeneration(e.to_string()))?;
    std::fs::write(dir.join(DATA_FILE), &json_data)?;

    // Template loads the data by its path relative to the root
    let template_content = REPORT_TEMPLATE.replace("DATA_JSON_PATH", DATA_FILE);
    let template_path = dir.join("report.typ");
    std::fs::write(&template_path, &template_content)?;

    Ok(template_path)
}

/// Generate a report PDF using Typst CLI
pub fn generate_report_pdf(document: &Document, output_path: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();

    if typst_check.is_err() {
        return Err(LedgerError::TypstNotFound);
    }

    // Private staging directory per export, removed on drop
    let temp_dir = tempfile::Builder::new().prefix("ledger-cli").tempdir()?;
    let template_path = stage_report(document, temp_dir.path())?;

    debug!(pages = document.page_count(), template = %template_path.display(), "compiling report");

    // Run typst compile with root set to temp directory
    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(temp_dir.path())
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LedgerError::PdfGeneration(stderr.to_string()));
    }

    info!(path = %output_path.display(), "wrote report pdf");
    Ok(())
}

/// Write the laid-out document as pretty JSON
pub fn write_report_json(document: &Document, output_path: &Path) -> Result<()> {
    let json_data = serde_json::to_string_pretty(document)?;
    std::fs::write(output_path, json_data)?;
    info!(path = %output_path.display(), "wrote report json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Page;

    fn document() -> Document {
        Document {
            filename: "Sharma_from-start_to-2024-03-15.pdf".to_string(),
            width: 210.0,
            height: 297.0,
            pages: vec![Page::default()],
        }
    }

    #[test]
    fn test_stage_report_writes_data_next_to_template() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = stage_report(&document(), dir.path()).unwrap();

        let template = std::fs::read_to_string(&template_path).unwrap();
        assert!(template.contains("json(\"report_data.json\")"));

        let data = std::fs::read_to_string(dir.path().join(DATA_FILE)).unwrap();
        assert!(data.contains("Sharma_from-start_to-2024-03-15.pdf"));
    }

    #[test]
    fn test_exports_stage_in_separate_directories() {
        let first = tempfile::Builder::new().prefix("ledger-cli").tempdir().unwrap();
        let second = tempfile::Builder::new().prefix("ledger-cli").tempdir().unwrap();

        let mut other = document();
        other.filename = "Verma_from-start_to-2024-03-15.pdf".to_string();
        stage_report(&document(), first.path()).unwrap();
        stage_report(&other, second.path()).unwrap();

        assert_ne!(first.path(), second.path());
        let data = std::fs::read_to_string(first.path().join(DATA_FILE)).unwrap();
        assert!(data.contains("Sharma"));
    }
}
