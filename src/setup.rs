// src/setup.rs
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::utils;

pub const EXAMPLE_CV: &str = include_str!("../data/example_cv.yaml");
pub const ENV_TEMPLATE: &str = include_str!("../data/env_template");

#[derive(Debug, Clone)]
pub struct SetupOptions {
    pub yaml_file: PathBuf,
    pub env_file: PathBuf,
    pub output_dir: PathBuf,
    pub name: Option<String>,
    pub email: Option<String>,
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetupOutcome {
    Created(Vec<PathBuf>),
    /// The data file exists and `force` was not given
    Preserved(PathBuf),
}

/// Replace `{{key}}` placeholders
pub fn process_variables(content: &str, vars: &HashMap<String, String>) -> String {
    vars.iter().fold(content.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{}}}}}", key), value)
    })
}

/// Bootstrap a data file from the bundled example, an identity settings file
/// and the output directory.
pub fn init_workspace(options: &SetupOptions) -> Result<SetupOutcome> {
    if options.yaml_file.exists() && !options.force {
        info!(
            "Master CV file already exists: {} (use --force to overwrite)",
            options.yaml_file.display()
        );
        return Ok(SetupOutcome::Preserved(options.yaml_file.clone()));
    }

    let mut created = Vec::new();

    write_file(&options.yaml_file, EXAMPLE_CV)?;
    info!("Created {} from example template", options.yaml_file.display());
    created.push(options.yaml_file.clone());

    if !options.env_file.exists() || options.force {
        let mut vars = HashMap::new();
        vars.insert(
            "name".to_string(),
            options.name.clone().unwrap_or_else(|| "Your Name".to_string()),
        );
        vars.insert(
            "email".to_string(),
            options
                .email
                .clone()
                .unwrap_or_else(|| "you@example.com".to_string()),
        );
        write_file(&options.env_file, &process_variables(ENV_TEMPLATE, &vars))?;
        info!("Created identity settings file {}", options.env_file.display());
        created.push(options.env_file.clone());
    }

    utils::ensure_dir_exists(&options.output_dir)?;

    info!("Setup complete. Next steps:");
    info!("  1. Edit {} with your information", options.yaml_file.display());
    info!("  2. Set your name and email in {}", options.env_file.display());
    info!("  3. Run cv-generator and check {}", options.output_dir.display());
    Ok(SetupOutcome::Created(created))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        utils::ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Identity;
    use crate::types::CvRecord;
    use crate::validator::SchemaValidator;

    fn options(dir: &Path) -> SetupOptions {
        SetupOptions {
            yaml_file: dir.join("data/master_cv.yaml"),
            env_file: dir.join(".env"),
            output_dir: dir.join("output"),
            name: Some("Jane Smith".to_string()),
            email: Some("jane@x.com".to_string()),
            force: false,
        }
    }

    #[test]
    fn test_process_variables() {
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Jane".to_string());
        assert_eq!(process_variables("Hi {{name}}, {{other}}", &vars), "Hi Jane, {{other}}");
    }

    #[test]
    fn test_example_cv_is_valid() {
        let record = CvRecord::from_yaml_str(EXAMPLE_CV).unwrap().unwrap();
        let identity = Identity::new("Jane Smith", "jane@x.com");
        let report = SchemaValidator::validate(record.raw(), &identity);
        assert!(report.is_valid(), "{:?}", report.errors());
        assert!(record.config().is_ok());
    }

    #[test]
    fn test_init_creates_and_preserves() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());

        let outcome = init_workspace(&opts).unwrap();
        assert_eq!(
            outcome,
            SetupOutcome::Created(vec![opts.yaml_file.clone(), opts.env_file.clone()])
        );
        assert!(opts.output_dir.is_dir());
        let env = fs::read_to_string(&opts.env_file).unwrap();
        assert!(env.contains("CV_NAME=\"Jane Smith\""));

        fs::write(&opts.yaml_file, "summary: mine\n").unwrap();
        let outcome = init_workspace(&opts).unwrap();
        assert_eq!(outcome, SetupOutcome::Preserved(opts.yaml_file.clone()));
        assert_eq!(fs::read_to_string(&opts.yaml_file).unwrap(), "summary: mine\n");
    }
}
