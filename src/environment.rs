// src/environment.rs
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

pub const KEY_NAME: &str = "CV_NAME";
pub const KEY_EMAIL: &str = "CV_EMAIL";
pub const KEY_PHONE: &str = "CV_PHONE";
pub const KEY_LOCATION: &str = "CV_LOCATION";
pub const KEY_LINKEDIN: &str = "CV_LINKEDIN";
pub const KEY_GITHUB: &str = "CV_GITHUB";
pub const KEY_WEBSITE: &str = "CV_WEBSITE";
pub const KEY_FILENAME_PREFIX: &str = "CV_FILENAME_PREFIX";

/// Identity fields, sourced from the environment rather than the CV data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    /// Explicit output filename prefix, overriding everything in cv_config
    pub filename_prefix: Option<String>,
}

impl Identity {
    /// Load identity from the process environment, overlaid on an optional
    /// settings file. Process variables win over the file.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        let file_vars = match env_file {
            Some(path) if path.exists() => {
                info!("Loading identity settings from {}", path.display());
                Self::read_env_file(path)?
            }
            Some(path) => {
                debug!("No settings file at {}, using process environment", path.display());
                HashMap::new()
            }
            None => HashMap::new(),
        };

        Ok(Self::from_lookup(|key| {
            overlay(std::env::var(key).ok(), file_vars.get(key).cloned())
        }))
    }

    fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
        let iter = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let mut vars = HashMap::new();
        for item in iter {
            let (key, value) = item
                .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
            vars.insert(key, value);
        }
        Ok(vars)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            name: get(KEY_NAME).unwrap_or_default(),
            email: get(KEY_EMAIL).unwrap_or_default(),
            phone: get(KEY_PHONE),
            location: get(KEY_LOCATION),
            linkedin: get(KEY_LINKEDIN),
            github: get(KEY_GITHUB),
            website: get(KEY_WEBSITE),
            filename_prefix: get(KEY_FILENAME_PREFIX),
        }
    }

    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            ..Self::default()
        }
    }
}

/// Process value when it has content, otherwise the settings file value
fn overlay(process: Option<String>, file: Option<String>) -> Option<String> {
    process.filter(|v| !v.trim().is_empty()).or(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_lookup_trims_and_drops_blank() {
        let vars: HashMap<&str, &str> = [
            (KEY_NAME, " Jane Smith "),
            (KEY_EMAIL, "jane@x.com"),
            (KEY_PHONE, "   "),
        ]
        .into_iter()
        .collect();
        let identity = Identity::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(identity.name, "Jane Smith");
        assert_eq!(identity.email, "jane@x.com");
        assert!(identity.phone.is_none());
    }

    #[test]
    fn test_blank_process_value_falls_back_to_file() {
        let file = Some("Jane Smith".to_string());
        assert_eq!(overlay(Some(String::new()), file.clone()), file);
        assert_eq!(overlay(Some("  ".to_string()), file.clone()), file);
        assert_eq!(
            overlay(Some("John Doe".to_string()), file),
            Some("John Doe".to_string())
        );
        assert_eq!(overlay(None, None), None);
    }

    #[test]
    fn test_read_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CV_TEST_ONLY_NAME=\"Jane Smith\"").unwrap();
        writeln!(file, "CV_TEST_ONLY_EMAIL=jane@x.com").unwrap();
        let vars = Identity::read_env_file(file.path()).unwrap();
        assert_eq!(vars.get("CV_TEST_ONLY_NAME").map(String::as_str), Some("Jane Smith"));
        assert_eq!(vars.get("CV_TEST_ONLY_EMAIL").map(String::as_str), Some("jane@x.com"));
    }
}
