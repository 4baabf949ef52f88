// src/renderers/summary.rs
use anyhow::{bail, Result};
use serde_yaml::Value;
use tracing::info;

use crate::document::Document;
use crate::types::cv_data::yaml_type_name;

pub const HEADING: &str = "Professional Summary";

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let text = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::String(text)) => text.trim(),
        Some(other) => bail!("summary must be text, found {}", yaml_type_name(other)),
    };
    if text.is_empty() {
        return Ok(());
    }

    doc.add_heading(HEADING, 2);
    doc.add_paragraph(text);
    doc.add_spacer();

    info!("Added professional summary section");
    Ok(())
}
