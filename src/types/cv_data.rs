// src/types/cv_data.rs
//! CV record structures: the raw YAML mapping plus typed entry views

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

use crate::config::CvConfig;

// ===== Raw Record =====

/// The loaded YAML record. Sections stay as raw values so that shape problems
/// can be reported per entry instead of failing the whole document.
#[derive(Debug, Clone)]
pub struct CvRecord {
    raw: Mapping,
}

impl CvRecord {
    pub fn from_yaml_str(content: &str) -> Result<Option<Self>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_yaml::from_str(content).context("Failed to parse CV YAML")?;
        match value {
            Value::Mapping(raw) if !raw.is_empty() => Ok(Some(Self { raw })),
            _ => Ok(None),
        }
    }

    pub fn raw(&self) -> &Mapping {
        &self.raw
    }

    /// Section value, with explicit nulls treated as absent
    pub fn section(&self, key: &str) -> Option<&Value> {
        self.raw.get(key).filter(|v| !v.is_null())
    }

    /// Extract `cv_config`, falling back to defaults when absent
    pub fn config(&self) -> Result<CvConfig> {
        match self.section("cv_config") {
            Some(value) => serde_yaml::from_value(value.clone())
                .context("Invalid cv_config block in CV data"),
            None => Ok(CvConfig::default()),
        }
    }

    pub fn invisible_marker(&self) -> Option<String> {
        self.section("invisible_marker").and_then(scalar_text)
    }
}

// ===== Entry Types =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Option<Value>,
    #[serde(default)]
    pub technologies: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub graduation_date: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub gpa: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub honors: Option<String>,
    #[serde(default)]
    pub relevant_coursework: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificationEntry {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Option<Value>,
    #[serde(default, deserialize_with = "text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageEntry {
    #[serde(default, deserialize_with = "text")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolunteerEntry {
    #[serde(default, deserialize_with = "text")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub organization: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationEntry {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub publication: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub url: Option<String>,
}

// ===== Additional Sections =====

/// Recognized keys of `additional_sections`; anything else is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalKind {
    Volunteer,
    Publications,
}

impl AdditionalKind {
    pub const ALL: [AdditionalKind; 2] = [AdditionalKind::Volunteer, AdditionalKind::Publications];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Publications => "publications",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Self::Volunteer => "Volunteer Experience",
            Self::Publications => "Publications",
        }
    }
}

// ===== Value Helpers =====

/// Human-readable name of a YAML value's shape, used in error messages
pub fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Scalar value rendered as text; blank strings count as missing
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}
