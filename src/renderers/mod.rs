// src/renderers/mod.rs
//! One rendering routine per CV section. Each appends blocks to the document
//! and returns an error only when the section as a whole cannot be rendered.

pub mod additional;
pub mod certifications;
pub mod contact;
pub mod education;
pub mod experience;
pub mod languages;
pub mod projects;
pub mod skills;
pub mod summary;

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::{error, warn};

use crate::config::SectionKind;
use crate::document::Document;
use crate::environment::Identity;
use crate::types::cv_data::{scalar_text, yaml_type_name};
use crate::types::CvRecord;

/// Separator between the parts of a composite entry line
pub const COMPOSITE_SEPARATOR: &str = " - ";

pub fn render_section(
    kind: SectionKind,
    record: &CvRecord,
    identity: &Identity,
    doc: &mut Document,
) -> Result<()> {
    match kind {
        SectionKind::PersonalInfo => contact::render(identity, doc),
        SectionKind::Summary => summary::render(record.section("summary"), doc),
        SectionKind::Experience => experience::render(record.section("experience"), doc),
        SectionKind::Education => education::render(record.section("education"), doc),
        SectionKind::Skills => skills::render(record.section("skills"), doc),
        SectionKind::Certifications => {
            certifications::render(record.section("certifications"), doc)
        }
        SectionKind::Projects => projects::render(record.section("projects"), doc),
        SectionKind::Languages => languages::render(record.section("languages"), doc),
        SectionKind::AdditionalSections => {
            additional::render(record.section("additional_sections"), doc)
        }
    }
}

/// Explicit defaulting for optional text fields
pub fn or_empty(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

/// Join the non-empty parts with " - " and append "(suffix)" when present
pub fn composite(parts: &[&str], suffix: &str) -> String {
    let mut line = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(COMPOSITE_SEPARATOR);

    let suffix = suffix.trim();
    if !suffix.is_empty() {
        if line.is_empty() {
            line = format!("({})", suffix);
        } else {
            line.push_str(&format!(" ({})", suffix));
        }
    }
    line
}

/// Parse the entries of a list section. Entries that are not mappings, or
/// that do not fit the entry type, are logged and skipped.
pub(crate) fn entries<T: DeserializeOwned>(section: &str, value: Option<&Value>) -> Result<Vec<T>> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Sequence(items)) => items,
        Some(other) => bail!(
            "{} must be a list of entries, found {}",
            section,
            yaml_type_name(other)
        ),
    };

    let mut parsed = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if !item.is_mapping() {
            error!(
                "Skipping {}[{}]: expected a mapping of fields, found {}",
                section,
                index,
                yaml_type_name(item)
            );
            continue;
        }
        match serde_yaml::from_value::<T>(item.clone()) {
            Ok(entry) => parsed.push(entry),
            Err(e) => error!("Skipping {}[{}]: {}", section, index, e),
        }
    }
    Ok(parsed)
}

/// Read a list-valued sub-field. A value that is not a list is logged and
/// treated as absent for this entry.
pub(crate) fn list_field(section: &str, index: usize, field: &str, value: &Option<Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let text = scalar_text(item);
                if text.is_none() && !item.is_null() {
                    warn!(
                        "Skipping {}[{}].{}[{}]: expected text, found {}",
                        section,
                        index,
                        field,
                        i,
                        yaml_type_name(item)
                    );
                }
                text
            })
            .collect(),
        Some(other) => {
            warn!(
                "Skipping {}[{}].{}: expected a list, found {}",
                section,
                index,
                field,
                yaml_type_name(other)
            );
            Vec::new()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_omits_missing_parts() {
        assert_eq!(composite(&["Engineer", "Acme"], ""), "Engineer - Acme");
        assert_eq!(composite(&["Engineer", ""], "Berlin"), "Engineer (Berlin)");
        assert_eq!(composite(&["", ""], "2020"), "(2020)");
        assert_eq!(composite(&["", ""], ""), "");
    }

    #[test]
    fn test_list_field_rejects_scalar() {
        let value = Some(Value::String("Rust, Go".to_string()));
        assert!(list_field("projects", 0, "technologies", &value).is_empty());

        let value = Some(test_support::yaml("[Rust, 2021, {a: b}]"));
        assert_eq!(
            list_field("projects", 0, "technologies", &value),
            vec!["Rust", "2021"]
        );
    }
}
