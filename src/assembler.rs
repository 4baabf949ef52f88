// src/assembler.rs
use tracing::{debug, error, info};

use crate::config::CvConfig;
use crate::document::{Block, BlockKind, Document, Run, BACKGROUND_COLOR};
use crate::environment::Identity;
use crate::renderers;
use crate::types::CvRecord;

/// Font size of the invisible marker block, in points
pub const MARKER_FONT_SIZE: f32 = 1.0;

pub struct DocumentAssembler<'a> {
    config: &'a CvConfig,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a CvConfig) -> Self {
        Self { config }
    }

    /// Render every visible section in configured order, apply the uniform
    /// formatting pass, then append the invisible marker when one is set.
    pub fn assemble(&self, record: &CvRecord, identity: &Identity) -> Document {
        let mut doc = Document::new();

        for kind in self.config.visible_sections() {
            let before = doc.len();
            if let Err(e) = renderers::render_section(kind, record, identity, &mut doc) {
                error!(
                    "Section '{}' could not be rendered: {:#}. Fix its layout in the CV data \
                     (see data/example_cv.yaml for the expected shape); continuing with the next section.",
                    kind.name(),
                    e
                );
            }
            debug!("Section '{}' produced {} blocks", kind.name(), doc.len() - before);
        }

        doc.apply_formatting(&self.config.font_family, self.config.font_size);
        info!(
            "Applied formatting: {}, {}pt",
            self.config.font_family, self.config.font_size
        );

        if let Some(marker) = self.marker_text(record) {
            self.append_marker(&mut doc, &marker);
        }

        doc
    }

    fn marker_text(&self, record: &CvRecord) -> Option<String> {
        self.config
            .marker_text()
            .map(str::to_string)
            .or_else(|| record.invisible_marker())
    }

    fn append_marker(&self, doc: &mut Document, text: &str) {
        let run = Run {
            font_family: Some(self.config.font_family.clone()),
            font_size: Some(MARKER_FONT_SIZE),
            ..Run::plain(text)
        };
        let mut block = Block::new(BlockKind::Paragraph, vec![run]);
        block.color = Some(BACKGROUND_COLOR.to_string());
        block.spacing_after = Some(0.0);
        doc.push(block);
        info!("Appended invisible marker block");
    }
}
