// src/renderers/education.rs
use anyhow::Result;
use serde_yaml::Value;
use tracing::info;

use super::{composite, entries, list_field, or_empty};
use crate::document::Document;
use crate::types::cv_data::EducationEntry;

pub const HEADING: &str = "Education";
const SECTION: &str = "education";

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let education: Vec<EducationEntry> = entries(SECTION, value)?;
    if education.is_empty() {
        return Ok(());
    }

    doc.add_heading(HEADING, 2);

    for (index, edu) in education.iter().enumerate() {
        let title = composite(
            &[or_empty(&edu.degree), or_empty(&edu.institution)],
            or_empty(&edu.location),
        );
        if !title.is_empty() {
            doc.add_heading(&title, 3);
        }

        if let Some(date) = &edu.graduation_date {
            doc.add_paragraph(&format!("Graduated: {}", date)).italic();
        }
        if let Some(gpa) = &edu.gpa {
            doc.add_paragraph(&format!("GPA: {}", gpa));
        }
        if let Some(honors) = &edu.honors {
            doc.add_paragraph(&format!("Honors: {}", honors));
        }

        let coursework = list_field(SECTION, index, "relevant_coursework", &edu.relevant_coursework);
        if !coursework.is_empty() {
            doc.add_paragraph(&format!("Relevant Coursework: {}", coursework.join(", ")));
        }

        doc.add_spacer();
    }

    info!("Added {} education entries", education.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::test_support::yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_education_entry() {
        let source = "
- degree: BSc Computer Science
  institution: MIT
  graduation_date: 2019-06
  gpa: 3.8
  relevant_coursework: [Algorithms, Compilers]
";
        let mut doc = Document::new();
        render(Some(&yaml(source)), &mut doc).unwrap();
        assert_eq!(
            doc.texts(),
            vec![
                HEADING,
                "BSc Computer Science - MIT",
                "Graduated: 2019-06",
                "GPA: 3.8",
                "Relevant Coursework: Algorithms, Compilers",
            ]
        );
    }

    #[test]
    fn test_coursework_scalar_skipped() {
        let source = "- degree: MSc\n  institution: ETH\n  relevant_coursework: Everything\n";
        let mut doc = Document::new();
        render(Some(&yaml(source)), &mut doc).unwrap();
        assert_eq!(doc.texts(), vec![HEADING, "MSc - ETH"]);
    }
}
