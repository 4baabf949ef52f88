// src/renderers/languages.rs
use anyhow::Result;
use serde_yaml::Value;
use tracing::info;

use super::{composite, entries, or_empty};
use crate::document::Document;
use crate::types::cv_data::LanguageEntry;

pub const HEADING: &str = "Languages";

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let languages: Vec<LanguageEntry> = entries("languages", value)?;
    if languages.is_empty() {
        return Ok(());
    }

    doc.add_heading(HEADING, 2);
    for lang in &languages {
        let line = composite(&[or_empty(&lang.language), or_empty(&lang.proficiency)], "");
        if !line.is_empty() {
            doc.add_paragraph(&line);
        }
    }

    info!("Added {} languages", languages.len());
    Ok(())
}
