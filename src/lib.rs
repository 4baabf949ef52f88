// src/lib.rs
//! Generate a formatted CV document (.docx, optionally PDF) from YAML data

pub mod assembler;
pub mod config;
pub mod document;
pub mod docx;
pub mod environment;
pub mod error;
pub mod export;
pub mod generator;
pub mod renderers;
pub mod setup;
pub mod types;
pub mod utils;
pub mod validator;
pub mod verify;

pub use assembler::DocumentAssembler;
pub use config::{CvConfig, SectionKind};
pub use document::{Block, BlockKind, Document, Run};
pub use environment::Identity;
pub use error::CvError;
pub use export::SecondaryExporter;
pub use generator::{generate_cv, CvGenerator, GeneratedCv, GeneratorOptions};
pub use types::CvRecord;
pub use validator::{SchemaValidator, ValidationReport};
