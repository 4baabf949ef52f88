// src/validator.rs
use serde_yaml::{Mapping, Value};
use tracing::{error, info};

use crate::environment::Identity;
use crate::types::cv_data::yaml_type_name;
use crate::types::AdditionalKind;

/// Top-level sections that must be lists of mappings
pub const LIST_SECTIONS: [&str; 5] = [
    "experience",
    "education",
    "projects",
    "languages",
    "certifications",
];

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    fn push(&mut self, message: String) {
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
    }
}

pub struct SchemaValidator;

impl SchemaValidator {
    /// Check the record and identity against the expected shapes. All rules run
    /// independently; every violation ends up in the report.
    pub fn validate(record: &Mapping, identity: &Identity) -> ValidationReport {
        let mut report = ValidationReport::default();

        Self::check_identity(identity, &mut report);

        if let Some(summary) = record.get("summary") {
            if !summary.is_null() && !summary.is_string() {
                report.push(format!(
                    "summary must be text, found {}",
                    yaml_type_name(summary)
                ));
            }
        }

        for section in LIST_SECTIONS {
            if let Some(value) = record.get(section) {
                Self::check_list_of_mappings(section, value, &mut report);
            }
        }

        if let Some(skills) = record.get("skills") {
            Self::check_skills(skills, &mut report);
        }

        if let Some(additional) = record.get("additional_sections") {
            Self::check_additional(additional, &mut report);
        }

        if report.is_valid() {
            info!("CV data passed schema validation");
        } else {
            for message in report.errors() {
                error!("Validation error: {}", message);
            }
        }

        report
    }

    fn check_identity(identity: &Identity, report: &mut ValidationReport) {
        if identity.name.trim().is_empty() {
            report.push(
                "Missing required identity field 'name' (set CV_NAME in the environment or .env file)"
                    .to_string(),
            );
        }
        if identity.email.trim().is_empty() {
            report.push(
                "Missing required identity field 'email' (set CV_EMAIL in the environment or .env file)"
                    .to_string(),
            );
        }
    }

    fn check_list_of_mappings(path: &str, value: &Value, report: &mut ValidationReport) {
        match value {
            Value::Null => {}
            Value::String(s) if s.trim() == "pass" => report.push(format!(
                "{} contains 'pass' instead of a list; use an empty list [] for no entries",
                path
            )),
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_mapping() {
                        report.push(format!(
                            "{}[{}] must be a mapping of fields, found {}",
                            path,
                            index,
                            yaml_type_name(item)
                        ));
                    }
                }
            }
            other => report.push(format!(
                "{} must be a list, found {}",
                path,
                yaml_type_name(other)
            )),
        }
    }

    fn check_skills(value: &Value, report: &mut ValidationReport) {
        let categories = match value {
            Value::Null => return,
            Value::Mapping(categories) => categories,
            other => {
                report.push(format!(
                    "skills must be a mapping of category to list, found {}",
                    yaml_type_name(other)
                ));
                return;
            }
        };

        for (key, skills) in categories {
            let category = key_label(key);
            match skills {
                Value::Null => {}
                Value::Sequence(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            report.push(format!(
                                "skills.{}[{}] must be a string, found {}",
                                category,
                                index,
                                yaml_type_name(item)
                            ));
                        }
                    }
                }
                Value::String(s) if s.trim() == "pass" => report.push(format!(
                    "skills.{} contains 'pass' instead of a list; use an empty list []",
                    category
                )),
                other => report.push(format!(
                    "skills.{} must be a list of strings, found {}",
                    category,
                    yaml_type_name(other)
                )),
            }
        }
    }

    fn check_additional(value: &Value, report: &mut ValidationReport) {
        let sections = match value {
            Value::Null => return,
            Value::Mapping(sections) => sections,
            other => {
                report.push(format!(
                    "additional_sections must be a mapping, found {}",
                    yaml_type_name(other)
                ));
                return;
            }
        };

        for kind in AdditionalKind::ALL {
            if let Some(entries) = sections.get(kind.key()) {
                let path = format!("additional_sections.{}", kind.key());
                Self::check_list_of_mappings(&path, entries, report);
            }
        }
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| yaml_type_name(other).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn jane() -> Identity {
        Identity::new("Jane Smith", "jane@x.com")
    }

    #[test]
    fn test_valid_record() {
        let record = mapping(
            "experience:\n  - role: Engineer\n    company: Acme\nskills:\n  languages: [Python, Go]\nprojects: []\ncertifications: null\n",
        );
        assert!(SchemaValidator::validate(&record, &jane()).is_valid());
    }

    #[test]
    fn test_missing_email_is_reported() {
        let report = SchemaValidator::validate(&Mapping::new(), &Identity::new("Jane", ""));
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].contains("'email'"));
    }

    #[test]
    fn test_errors_accumulate() {
        let record = mapping(
            "experience:\n  - role: Engineer\n  - just a string\neducation: {degree: BSc}\nskills:\n  tools: [git, 3]\n  cloud: aws\n",
        );
        let report = SchemaValidator::validate(&record, &Identity::default());
        assert_eq!(
            report.errors(),
            &[
                "Missing required identity field 'name' (set CV_NAME in the environment or .env file)".to_string(),
                "Missing required identity field 'email' (set CV_EMAIL in the environment or .env file)".to_string(),
                "experience[1] must be a mapping of fields, found string".to_string(),
                "education must be a list, found mapping".to_string(),
                "skills.tools[1] must be a string, found number".to_string(),
                "skills.cloud must be a list of strings, found string".to_string(),
            ]
        );
    }

    #[test]
    fn test_pass_token_flagged() {
        let record = mapping("additional_sections:\n  volunteer: pass\n  publications:\n    - 42\n");
        let report = SchemaValidator::validate(&record, &jane());
        assert_eq!(report.errors().len(), 2);
        assert!(report.errors()[0].contains("additional_sections.volunteer contains 'pass'"));
        assert_eq!(
            report.errors()[1],
            "additional_sections.publications[0] must be a mapping of fields, found number"
        );
    }

    #[test]
    fn test_skills_must_be_mapping() {
        let record = mapping("skills: [Python]\n");
        let report = SchemaValidator::validate(&record, &jane());
        assert_eq!(
            report.errors(),
            &["skills must be a mapping of category to list, found list".to_string()]
        );
    }
}
