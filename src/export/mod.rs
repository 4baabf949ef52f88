// src/export/mod.rs
//! Secondary (PDF) export, best effort. The primary document never depends on it.

pub mod backends;
pub mod html;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::CvConfig;
use crate::document::Document;

pub use backends::{WeasyprintExporter, WkhtmltopdfExporter};

/// A backend able to turn synthesized HTML into a secondary output file
pub trait SecondaryExporter {
    fn name(&self) -> &'static str;

    /// Whether the backend can run on this machine
    fn is_available(&self) -> bool;

    fn export(&self, html: &str, output: &Path) -> Result<()>;

    /// Extension of the produced file
    fn extension(&self) -> &'static str {
        "pdf"
    }
}

/// Candidates in rank order
pub fn default_candidates() -> Vec<Box<dyn SecondaryExporter>> {
    vec![
        Box::new(WkhtmltopdfExporter::default()),
        Box::new(WeasyprintExporter::default()),
    ]
}

/// First available candidate wins
pub fn resolve_exporter(
    candidates: Vec<Box<dyn SecondaryExporter>>,
) -> Option<Box<dyn SecondaryExporter>> {
    for candidate in candidates {
        if candidate.is_available() {
            info!("Using '{}' for PDF export", candidate.name());
            return Some(candidate);
        }
        info!("PDF backend '{}' not available", candidate.name());
    }
    None
}

/// Derive the secondary file next to the primary one. Failures are logged and
/// reported as `None`.
pub fn export_secondary(
    doc: &Document,
    config: &CvConfig,
    title: &str,
    exporter: Option<&dyn SecondaryExporter>,
    primary_path: &Path,
) -> Option<PathBuf> {
    let Some(exporter) = exporter else {
        warn!("No PDF backend available (install wkhtmltopdf or weasyprint); skipping PDF export");
        return None;
    };

    let output = primary_path.with_extension(exporter.extension());
    let html = html::synthesize(doc, title, &config.font_family, config.font_size);

    match exporter.export(&html, &output) {
        Ok(()) => {
            info!("PDF saved successfully: {}", output.display());
            Some(output)
        }
        Err(e) => {
            error!(
                "PDF export with '{}' failed: {:#}. Keeping the .docx only.",
                exporter.name(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    struct FakeExporter {
        available: bool,
        fail: bool,
        seen: RefCell<Vec<String>>,
    }

    impl FakeExporter {
        fn new(available: bool, fail: bool) -> Self {
            Self {
                available,
                fail,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SecondaryExporter for FakeExporter {
        fn name(&self) -> &'static str {
            if self.available {
                "fake-available"
            } else {
                "fake-missing"
            }
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn export(&self, html: &str, output: &Path) -> Result<()> {
            self.seen.borrow_mut().push(html.to_string());
            if self.fail {
                bail!("renderer crashed");
            }
            std::fs::write(output, html)?;
            Ok(())
        }
    }

    fn sample_doc() -> Document {
        let mut doc = Document::new();
        doc.add_heading("Jane Smith", 1);
        doc
    }

    #[test]
    fn test_first_available_wins() {
        let candidates: Vec<Box<dyn SecondaryExporter>> = vec![
            Box::new(FakeExporter::new(false, false)),
            Box::new(FakeExporter::new(true, false)),
        ];
        let chosen = resolve_exporter(candidates).unwrap();
        assert_eq!(chosen.name(), "fake-available");

        let none: Vec<Box<dyn SecondaryExporter>> =
            vec![Box::new(FakeExporter::new(false, false))];
        assert!(resolve_exporter(none).is_none());
    }

    #[test]
    fn test_export_writes_next_to_primary() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("Jane_Smith.docx");
        let exporter = FakeExporter::new(true, false);

        let out = export_secondary(
            &sample_doc(),
            &CvConfig::default(),
            "CV",
            Some(&exporter as &dyn SecondaryExporter),
            &primary,
        )
        .unwrap();

        assert_eq!(out, dir.path().join("Jane_Smith.pdf"));
        let written = std::fs::read_to_string(out).unwrap();
        assert!(written.contains("<h1>Jane Smith</h1>"));
    }

    #[test]
    fn test_export_failure_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("cv.docx");
        let exporter = FakeExporter::new(true, true);

        let out = export_secondary(
            &sample_doc(),
            &CvConfig::default(),
            "CV",
            Some(&exporter as &dyn SecondaryExporter),
            &primary,
        );
        assert!(out.is_none());
        assert_eq!(exporter.seen.borrow().len(), 1);
        assert!(export_secondary(&sample_doc(), &CvConfig::default(), "CV", None, &primary).is_none());
    }
}
