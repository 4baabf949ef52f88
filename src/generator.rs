// src/generator.rs
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::assembler::DocumentAssembler;
use crate::docx::{self, DocxMetadata};
use crate::environment::Identity;
use crate::error::CvError;
use crate::export::{self, SecondaryExporter};
use crate::types::CvRecord;
use crate::utils;
use crate::validator::SchemaValidator;

pub const DEFAULT_YAML_FILE: &str = "data/master_cv.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Paths for one generation run
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub yaml_file: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            yaml_file: PathBuf::from(DEFAULT_YAML_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl GeneratorOptions {
    pub fn with_yaml_file(mut self, path: PathBuf) -> Self {
        self.yaml_file = path;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }
}

/// Files produced by a successful run
#[derive(Debug, Clone)]
pub struct GeneratedCv {
    pub docx_path: PathBuf,
    pub pdf_path: Option<PathBuf>,
}

pub struct CvGenerator {
    options: GeneratorOptions,
    identity: Identity,
    exporter: Option<Box<dyn SecondaryExporter>>,
}

impl CvGenerator {
    /// Generator with PDF backends resolved from the default candidates
    pub fn new(options: GeneratorOptions, identity: Identity) -> Self {
        let exporter = export::resolve_exporter(export::default_candidates());
        Self::with_exporter(options, identity, exporter)
    }

    pub fn with_exporter(
        options: GeneratorOptions,
        identity: Identity,
        exporter: Option<Box<dyn SecondaryExporter>>,
    ) -> Self {
        info!(
            "Initializing CV generator with file: {}",
            options.yaml_file.display()
        );
        Self {
            options,
            identity,
            exporter,
        }
    }

    /// Load, validate, build, save, then optionally export
    pub fn generate(&self) -> Result<GeneratedCv, CvError> {
        info!("Starting CV generation process");

        let record = self.load_record()?;
        let config = record.config().map_err(CvError::Config)?;

        let report = SchemaValidator::validate(record.raw(), &self.identity);
        if !report.is_valid() {
            return Err(CvError::Validation(report.into_errors()));
        }

        let doc = DocumentAssembler::new(&config).assemble(&record, &self.identity);
        debug!("Assembled document with {} blocks", doc.len());

        utils::ensure_dir_exists(&self.options.output_dir).map_err(CvError::Persist)?;
        let docx_path = utils::output_file_path(&self.options.output_dir, &self.identity, &config);
        let meta = DocxMetadata {
            title: format!("{} - CV", self.identity.name),
            author: self.identity.name.clone(),
        };
        docx::save(&doc, &meta, &docx_path).map_err(CvError::Persist)?;
        info!("CV saved successfully: {}", docx_path.display());

        let pdf_path = if config.export_pdf {
            export::export_secondary(
                &doc,
                &config,
                &meta.title,
                self.exporter.as_deref(),
                &docx_path,
            )
        } else {
            debug!("PDF export disabled in cv_config");
            None
        };

        info!("CV generation completed successfully");
        Ok(GeneratedCv {
            docx_path,
            pdf_path,
        })
    }

    fn load_record(&self) -> Result<CvRecord, CvError> {
        let path = &self.options.yaml_file;
        if !path.exists() {
            error!("YAML file not found: {}", path.display());
            info!("Run `cv-generator init` to create one from the bundled example");
            return Err(CvError::InputNotFound(path.clone()));
        }

        let content = utils::read_file_content(path).map_err(|e| parse_error(path, e))?;
        let record = CvRecord::from_yaml_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))
            .map_err(|e| parse_error(path, e))?
            .ok_or_else(|| CvError::EmptyRecord(path.clone()))?;

        if record.section("personal_info").is_some() {
            debug!("Ignoring personal_info in CV data; identity comes from the environment");
        }

        info!("YAML data loaded successfully");
        Ok(record)
    }
}

fn parse_error(path: &Path, source: anyhow::Error) -> CvError {
    CvError::Parse {
        path: path.to_path_buf(),
        source,
    }
}

/// Convenience function for a one-shot run
pub fn generate_cv(
    yaml_file: &Path,
    output_dir: &Path,
    identity: Identity,
) -> Result<GeneratedCv, CvError> {
    let options = GeneratorOptions::default()
        .with_yaml_file(yaml_file.to_path_buf())
        .with_output_dir(output_dir.to_path_buf());
    CvGenerator::new(options, identity).generate()
}
