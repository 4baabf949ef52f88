// src/utils.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CvConfig;
use crate::environment::Identity;

pub const DOCX_EXTENSION: &str = "docx";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const FALLBACK_PREFIX: &str = "CV";

/// Name for file system usage: spaces become underscores, unsafe characters are dropped
pub fn sanitize_name(name: &str) -> String {
    let underscored = name.trim().replace(' ', "_");
    sanitize_filename::sanitize(underscored)
}

/// Resolve the filename prefix: explicit override, then configured prefix,
/// then the identity name.
pub fn filename_prefix(identity: &Identity, config: &CvConfig) -> String {
    let candidates = [
        identity.filename_prefix.as_deref(),
        config.filename_prefix.as_deref(),
        Some(identity.name.as_str()),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(sanitize_name)
        .find(|prefix| !prefix.is_empty())
        .unwrap_or_else(|| FALLBACK_PREFIX.to_string())
}

/// `{prefix}_{timestamp}.docx` or `{prefix}.docx`
pub fn output_filename(
    identity: &Identity,
    config: &CvConfig,
    now: DateTime<Local>,
    extension: &str,
) -> String {
    let prefix = filename_prefix(identity, config);
    if config.include_timestamp {
        format!("{}_{}.{}", prefix, now.format(TIMESTAMP_FORMAT), extension)
    } else {
        format!("{}.{}", prefix, extension)
    }
}

/// Build output file path
pub fn output_file_path(output_dir: &Path, identity: &Identity, config: &CvConfig) -> PathBuf {
    output_dir.join(output_filename(identity, config, Local::now(), DOCX_EXTENSION))
}

/// Ensure directory exists
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        info!("Created directory: {}", path.display());
    }
    Ok(())
}

/// Read file content as string with proper error context
pub fn read_file_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}
