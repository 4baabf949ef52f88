// src/renderers/additional.rs
use anyhow::{bail, Result};
use serde_yaml::Value;
use tracing::{debug, info};

use super::{composite, entries, or_empty};
use crate::document::Document;
use crate::types::cv_data::{yaml_type_name, PublicationEntry, VolunteerEntry};
use crate::types::AdditionalKind;

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let sections = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Mapping(sections)) => sections,
        Some(other) => bail!(
            "additional_sections must be a mapping, found {}",
            yaml_type_name(other)
        ),
    };

    for key in sections.keys() {
        let known = key.as_str().and_then(AdditionalKind::from_key);
        if known.is_none() {
            debug!("Ignoring unrecognized additional section {:?}", key);
        }
    }

    for kind in AdditionalKind::ALL {
        let section = sections.get(kind.key()).filter(|v| !v.is_null());
        match kind {
            AdditionalKind::Volunteer => render_volunteer(section, doc)?,
            AdditionalKind::Publications => render_publications(section, doc)?,
        }
    }

    info!("Added additional sections");
    Ok(())
}

fn render_volunteer(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let volunteers: Vec<VolunteerEntry> = entries("additional_sections.volunteer", value)?;
    if volunteers.is_empty() {
        return Ok(());
    }

    doc.add_heading(AdditionalKind::Volunteer.heading(), 2);
    for vol in &volunteers {
        let title = composite(&[or_empty(&vol.role), or_empty(&vol.organization)], or_empty(&vol.duration));
        if !title.is_empty() {
            doc.add_heading(&title, 3);
        }
        if let Some(description) = &vol.description {
            doc.add_paragraph(description);
        }
        doc.add_spacer();
    }
    Ok(())
}

fn render_publications(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let publications: Vec<PublicationEntry> = entries("additional_sections.publications", value)?;
    if publications.is_empty() {
        return Ok(());
    }

    doc.add_heading(AdditionalKind::Publications.heading(), 2);
    for publication in &publications {
        let title = composite(
            &[or_empty(&publication.title), or_empty(&publication.publication)],
            or_empty(&publication.date),
        );
        if !title.is_empty() {
            doc.add_heading(&title, 3);
        }
        if let Some(url) = &publication.url {
            doc.add_paragraph(&format!("URL: {}", url));
        }
        doc.add_spacer();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::test_support::yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_volunteer_and_publications() {
        let source = "
awards:
  - name: ignored
publications:
  - title: Fast CVs
    publication: Journal of Docs
    date: 2023
    url: example.org/fast-cvs
volunteer:
  - role: Mentor
    organization: Code Club
    duration: 2 years
    description: Weekly sessions.
";
        let mut doc = Document::new();
        render(Some(&yaml(source)), &mut doc).unwrap();
        assert_eq!(
            doc.texts(),
            vec![
                "Volunteer Experience",
                "Mentor - Code Club (2 years)",
                "Weekly sessions.",
                "Publications",
                "Fast CVs - Journal of Docs (2023)",
                "URL: example.org/fast-cvs",
            ]
        );
    }

    #[test]
    fn test_empty_additional_renders_nothing() {
        let mut doc = Document::new();
        render(Some(&yaml("volunteer: []\npublications: null\n")), &mut doc).unwrap();
        assert!(doc.is_empty());
    }
}
