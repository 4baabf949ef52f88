// src/types/mod.rs
pub mod cv_data;

pub use cv_data::{AdditionalKind, CvRecord};
