// src/export/backends.rs
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::SecondaryExporter;

fn program_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn check_output(program: &str, output: std::process::Output) -> Result<()> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        anyhow::bail!(
            "{} failed: stderr={}, stdout={}",
            program,
            stderr.trim(),
            stdout.trim()
        );
    }
    Ok(())
}

/// Renders HTML read from stdin with `wkhtmltopdf`
pub struct WkhtmltopdfExporter {
    program: String,
}

impl Default for WkhtmltopdfExporter {
    fn default() -> Self {
        Self {
            program: "wkhtmltopdf".to_string(),
        }
    }
}

impl SecondaryExporter for WkhtmltopdfExporter {
    fn name(&self) -> &'static str {
        "wkhtmltopdf"
    }

    fn is_available(&self) -> bool {
        program_available(&self.program)
    }

    fn export(&self, html: &str, output: &Path) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(["--quiet", "--encoding", "utf-8", "-"])
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        {
            let mut stdin = child
                .stdin
                .take()
                .context("Failed to open wkhtmltopdf stdin")?;
            stdin
                .write_all(html.as_bytes())
                .context("Failed to send HTML to wkhtmltopdf")?;
        }

        let result = child
            .wait_with_output()
            .context("Failed to wait for wkhtmltopdf")?;
        check_output(&self.program, result)
    }
}

/// Renders an on-disk HTML file with `weasyprint`
pub struct WeasyprintExporter {
    program: String,
}

impl Default for WeasyprintExporter {
    fn default() -> Self {
        Self {
            program: "weasyprint".to_string(),
        }
    }
}

impl SecondaryExporter for WeasyprintExporter {
    fn name(&self) -> &'static str {
        "weasyprint"
    }

    fn is_available(&self) -> bool {
        program_available(&self.program)
    }

    fn export(&self, html: &str, output: &Path) -> Result<()> {
        let mut intermediate = tempfile::Builder::new()
            .prefix("cv_export_")
            .suffix(".html")
            .tempfile()
            .context("Failed to create temporary HTML file")?;
        intermediate
            .write_all(html.as_bytes())
            .context("Failed to write temporary HTML file")?;
        intermediate
            .flush()
            .context("Failed to flush temporary HTML file")?;

        let result = Command::new(&self.program)
            .arg(intermediate.path())
            .arg(output)
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;
        check_output(&self.program, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let exporter = WeasyprintExporter {
            program: "definitely-not-a-real-pdf-renderer".to_string(),
        };
        assert!(!exporter.is_available());
        assert!(exporter
            .export("<p>x</p>", Path::new("/tmp/never-written.pdf"))
            .is_err());
    }
}
