// src/renderers/experience.rs
use anyhow::Result;
use serde_yaml::Value;
use tracing::info;

use super::{composite, entries, list_field, or_empty};
use crate::document::Document;
use crate::types::cv_data::ExperienceEntry;

pub const HEADING: &str = "Professional Experience";
const SECTION: &str = "experience";

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let experiences: Vec<ExperienceEntry> = entries(SECTION, value)?;
    if experiences.is_empty() {
        return Ok(());
    }

    doc.add_heading(HEADING, 2);

    for (index, exp) in experiences.iter().enumerate() {
        let title = composite(&[or_empty(&exp.role), or_empty(&exp.company)], or_empty(&exp.location));
        if !title.is_empty() {
            doc.add_heading(&title, 3);
        }

        if let Some(start) = &exp.start_date {
            let end = exp.end_date.as_deref().unwrap_or("Present");
            doc.add_paragraph(&format!("{} - {}", start, end)).italic();
        }

        if let Some(description) = &exp.description {
            doc.add_paragraph(description);
        }

        for achievement in list_field(SECTION, index, "achievements", &exp.achievements) {
            doc.add_bullet(&achievement);
        }

        let technologies = list_field(SECTION, index, "technologies", &exp.technologies);
        if !technologies.is_empty() {
            doc.add_paragraph(&format!("Technologies: {}", technologies.join(", ")))
                .italic();
        }

        doc.add_spacer();
    }

    info!("Added {} work experience entries", experiences.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockKind;
    use crate::renderers::test_support::yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_entry() {
        let mut doc = Document::new();
        render(Some(&yaml("- role: Engineer\n  company: Acme\n")), &mut doc).unwrap();
        assert_eq!(doc.texts(), vec![HEADING, "Engineer - Acme"]);
        assert_eq!(doc.blocks()[1].kind, BlockKind::Heading(3));
    }

    #[test]
    fn test_full_entry() {
        let source = "
- role: Senior Engineer
  company: Acme
  location: Berlin
  start_date: 2020-01
  description: Built the platform.
  achievements:
    - Cut costs by 30%
    - Led a team of 5
  technologies: [Rust, Postgres]
";
        let mut doc = Document::new();
        render(Some(&yaml(source)), &mut doc).unwrap();
        assert_eq!(
            doc.texts(),
            vec![
                HEADING,
                "Senior Engineer - Acme (Berlin)",
                "2020-01 - Present",
                "Built the platform.",
                "Cut costs by 30%",
                "Led a team of 5",
                "Technologies: Rust, Postgres",
            ]
        );
        let bullets = doc
            .blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::Bullet)
            .count();
        assert_eq!(bullets, 2);
        assert!(doc.blocks()[2].italic);
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let source = "
- role: Engineer
  company: Acme
- just a string
- role: Lead
  company: Initech
  achievements: not a list
";
        let mut doc = Document::new();
        render(Some(&yaml(source)), &mut doc).unwrap();
        assert_eq!(doc.texts(), vec![HEADING, "Engineer - Acme", "Lead - Initech"]);
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let mut doc = Document::new();
        render(Some(&yaml("[]")), &mut doc).unwrap();
        render(None, &mut doc).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_mapping_instead_of_list_is_section_error() {
        let mut doc = Document::new();
        assert!(render(Some(&yaml("role: Engineer")), &mut doc).is_err());
    }
}
