// src/renderers/projects.rs
use anyhow::Result;
use serde_yaml::Value;
use tracing::info;

use super::{entries, list_field};
use crate::document::Document;
use crate::types::cv_data::ProjectEntry;

pub const HEADING: &str = "Projects";
const SECTION: &str = "projects";

pub fn render(value: Option<&Value>, doc: &mut Document) -> Result<()> {
    let projects: Vec<ProjectEntry> = entries(SECTION, value)?;
    if projects.is_empty() {
        return Ok(());
    }

    doc.add_heading(HEADING, 2);

    for (index, project) in projects.iter().enumerate() {
        if let Some(name) = &project.name {
            doc.add_heading(name, 3);
        }
        if let Some(description) = &project.description {
            doc.add_paragraph(description);
        }

        let technologies = list_field(SECTION, index, "technologies", &project.technologies);
        if !technologies.is_empty() {
            doc.add_paragraph(&format!("Technologies: {}", technologies.join(", ")))
                .italic();
        }

        if let Some(url) = &project.url {
            doc.add_paragraph(&format!("URL: {}", url));
        }
        if let Some(date) = &project.date {
            doc.add_paragraph(&format!("Date: {}", date));
        }

        doc.add_spacer();
    }

    info!("Added {} projects", projects.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::test_support::yaml;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_entry() {
        let source = "
- name: cv-forge
  description: Generates CVs.
  technologies: [Rust]
  url: github.com/jane/cv-forge
  date: 2024
";
        let mut doc = Document::new();
        render(Some(&yaml(source)), &mut doc).unwrap();
        assert_eq!(
            doc.texts(),
            vec![
                HEADING,
                "cv-forge",
                "Generates CVs.",
                "Technologies: Rust",
                "URL: github.com/jane/cv-forge",
                "Date: 2024",
            ]
        );
    }
}
