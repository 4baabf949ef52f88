// src/verify.rs
//! Inspect a generated `.docx` for the standard CV sections

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::utils;

/// Section headings a complete CV is expected to contain
pub const EXPECTED_SECTIONS: [&str; 7] = [
    "Professional Summary",
    "Professional Experience",
    "Education",
    "Skills",
    "Certifications",
    "Projects",
    "Languages",
];

/// Minimum number of expected sections for a document to pass
pub const MIN_SECTIONS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub total_paragraphs: usize,
    pub paragraphs: Vec<String>,
    pub found_sections: Vec<String>,
    pub missing_sections: Vec<String>,
    pub font: Option<String>,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        self.found_sections.len() >= MIN_SECTIONS
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.paragraphs.iter().any(|p| p.contains(needle))
    }
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:p>(.*?)</w:p>").expect("valid paragraph regex"))
}

fn text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<w:t[^>]*>(.*?)</w:t>").expect("valid text regex"))
}

fn font_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<w:rFonts w:ascii="([^"]+)""#).expect("valid font regex"))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Paragraph texts and the first run font from a `word/document.xml` body
pub fn inspect_document_xml(xml: &str) -> VerifyReport {
    let mut report = VerifyReport::default();
    for paragraph in paragraph_re().captures_iter(xml) {
        report.total_paragraphs += 1;
        let text: String = text_re()
            .captures_iter(&paragraph[1])
            .map(|t| unescape(&t[1]))
            .collect();
        let text = text.trim().to_string();
        if !text.is_empty() {
            report.paragraphs.push(text);
        }
    }

    for section in EXPECTED_SECTIONS {
        if report.paragraphs.iter().any(|p| p.contains(section)) {
            report.found_sections.push(section.to_string());
        } else {
            report.missing_sections.push(section.to_string());
        }
    }

    report.font = font_re().captures(xml).map(|c| unescape(&c[1]));
    report
}

/// Most recently modified `.docx` in the output directory
pub fn latest_docx(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        bail!("Output directory not found: {}", dir.display());
    }

    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read output directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let extension = utils::get_file_extension(&path.to_string_lossy());
        if !path.is_file() || extension.as_deref() != Some(utils::DOCX_EXTENSION) {
            continue;
        }
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to read timestamp of {}", path.display()))?;
        if latest.as_ref().map_or(true, |(newest, _)| modified > *newest) {
            latest = Some((modified, path));
        }
    }

    match latest {
        Some((_, path)) => {
            debug!("Latest CV file: {}", path.display());
            Ok(path)
        }
        None => bail!("No CV files found in {}", dir.display()),
    }
}

pub fn verify_docx(path: &Path) -> Result<VerifyReport> {
    utils::validate_file_extension(&path.to_string_lossy(), &[utils::DOCX_EXTENSION])?;

    let file = std::fs::File::open(path)
        .with_context(|| format!("CV file not found: {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("Not a valid .docx package: {}", path.display()))?;
    let mut body = String::new();
    archive
        .by_name("word/document.xml")
        .context("Document package has no word/document.xml")?
        .read_to_string(&mut body)
        .context("Failed to read word/document.xml")?;

    let report = inspect_document_xml(&body);

    for section in &report.found_sections {
        info!("Found section: {}", section);
    }
    for section in &report.missing_sections {
        warn!("Missing section: {}", section);
    }
    match &report.font {
        Some(font) => info!("Font detected: {}", font),
        None => warn!("No explicit font found on document runs"),
    }
    info!(
        "Total paragraphs: {}, non-empty: {}, sections found: {}/{}",
        report.total_paragraphs,
        report.paragraphs.len(),
        report.found_sections.len(),
        EXPECTED_SECTIONS.len()
    );

    Ok(report)
}
