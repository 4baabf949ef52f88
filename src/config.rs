// src/config.rs
use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;

/// Named sections a CV can contain, in their default rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    PersonalInfo,
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Languages,
    AdditionalSections,
}

impl SectionKind {
    pub const DEFAULT_ORDER: [SectionKind; 9] = [
        SectionKind::PersonalInfo,
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Projects,
        SectionKind::Languages,
        SectionKind::AdditionalSections,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal_info",
            Self::Summary => "summary",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Certifications => "certifications",
            Self::Projects => "projects",
            Self::Languages => "languages",
            Self::AdditionalSections => "additional_sections",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|kind| kind.name() == normalized)
    }
}

/// Rendering options read from the `cv_config` block of the CV data
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CvConfig {
    pub font_family: String,
    pub font_size: f32,
    pub filename_prefix: Option<String>,
    pub include_timestamp: bool,
    pub section_order: Vec<String>,
    pub hidden_sections: Vec<String>,
    pub invisible_marker: Option<String>,
    pub export_pdf: bool,
}

impl Default for CvConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 11.0,
            filename_prefix: None,
            include_timestamp: true,
            section_order: SectionKind::DEFAULT_ORDER
                .iter()
                .map(|kind| kind.name().to_string())
                .collect(),
            hidden_sections: Vec::new(),
            invisible_marker: None,
            export_pdf: true,
        }
    }
}

impl CvConfig {
    pub fn with_font(mut self, family: &str, size: f32) -> Self {
        self.font_family = family.to_string();
        self.font_size = size;
        self
    }

    pub fn with_timestamp(mut self, include: bool) -> Self {
        self.include_timestamp = include;
        self
    }

    pub fn with_section_order(mut self, order: &[&str]) -> Self {
        self.section_order = order.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_hidden_sections(mut self, hidden: &[&str]) -> Self {
        self.hidden_sections = hidden.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_invisible_marker(mut self, marker: &str) -> Self {
        self.invisible_marker = Some(marker.to_string());
        self
    }

    /// Sections to render: configured order minus hidden ones. Unknown names
    /// are logged and dropped, repeated names render once.
    pub fn visible_sections(&self) -> Vec<SectionKind> {
        let hidden: HashSet<SectionKind> = self
            .hidden_sections
            .iter()
            .filter_map(|name| SectionKind::from_name(name))
            .collect();

        let mut seen = HashSet::new();
        let mut sections = Vec::new();
        for name in &self.section_order {
            let Some(kind) = SectionKind::from_name(name) else {
                warn!("Unknown section '{}' in section_order, ignoring", name);
                continue;
            };
            if !seen.insert(kind) {
                warn!("Section '{}' listed more than once in section_order", name);
                continue;
            }
            if !hidden.contains(&kind) {
                sections.push(kind);
            }
        }
        sections
    }

    /// Configured marker text, if any
    pub fn marker_text(&self) -> Option<&str> {
        self.invisible_marker
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
