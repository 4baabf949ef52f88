// src/renderers/skills.rs
use anyhow::{bail, Result};
use serde_yaml::Value;
use tracing::{info, warn};

use crate::document::Document;
use crate::types::cv_data::yaml_type_name;

pub const HEADING: &str = "Skills";

/// `programming_languages` -> `Programming Languages`
pub fn category_title(key: &str) -> String {
    key.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let categories = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Mapping(categories)) => categories,
        Some(other) => bail!(
            "skills must be a mapping of category to list, found {}",
            yaml_type_name(other)
        ),
    };

    let mut rendered: Vec<(String, Vec<String>)> = Vec::new();
    for (key, skills) in categories {
        let Some(category) = key.as_str() else {
            warn!("Skipping skills category with a non-text key ({})", yaml_type_name(key));
            continue;
        };
        let items = match skills {
            Value::Null => continue,
            Value::Sequence(items) => items,
            other => {
                warn!(
                    "Skipping skills.{}: expected a list of strings, found {}",
                    category,
                    yaml_type_name(other)
                );
                continue;
            }
        };
        let names: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item.as_str() {
                Some(name) if !name.trim().is_empty() => Some(name.trim().to_string()),
                Some(_) => None,
                None => {
                    warn!(
                        "Skipping skills.{}[{}]: expected a string, found {}",
                        category,
                        index,
                        yaml_type_name(item)
                    );
                    None
                }
            })
            .collect();
        if !names.is_empty() {
            rendered.push((category_title(category), names));
        }
    }

    if rendered.is_empty() {
        return Ok(());
    }

    doc.add_heading(HEADING, 2);
    for (title, names) in &rendered {
        doc.add_heading(title, 3);
        doc.add_paragraph(&names.join(", "));
    }

    info!("Added skills section with {} categories", rendered.len());
    Ok(())
}
