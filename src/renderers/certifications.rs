// src/renderers/certifications.rs
use anyhow::Result;
use serde_yaml::Value;
use tracing::info;

use super::{composite, entries, or_empty};
use crate::document::Document;
use crate::types::cv_data::CertificationEntry;

pub const HEADING: &str = "Certifications";

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let certs: Vec<CertificationEntry> = entries("certifications", value)?;
    if certs.is_empty() {
        return Ok(());
    }

    doc.add_heading(HEADING, 2);

    for cert in &certs {
        let line = composite(&[or_empty(&cert.name), or_empty(&cert.issuer)], or_empty(&cert.date));
        if !line.is_empty() {
            doc.add_paragraph(&line);
        }
        if let Some(id) = &cert.credential_id {
            doc.add_paragraph(&format!("Credential ID: {}", id)).italic();
        }
    }

    info!("Added {} certifications", certs.len());
    Ok(())
}
