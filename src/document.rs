// src/document.rs
//! In-memory document model: an ordered list of styled blocks

/// Page background color; text in this color is not visible on the page
pub const BACKGROUND_COLOR: &str = "FFFFFF";

pub const HEADING_SPACING_AFTER: f32 = 6.0;
pub const BODY_SPACING_AFTER: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Heading level 1 to 3
    Heading(u8),
    Paragraph,
    Bullet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    /// Hyperlink target (mailto:, tel:, https://)
    pub link: Option<String>,
    pub font_family: Option<String>,
    /// Size in points
    pub font_size: Option<f32>,
}

impl Run {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn linked(text: &str, target: &str) -> Self {
        Self {
            text: text.to_string(),
            link: Some(target.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    pub italic: bool,
    /// Hex RGB foreground color without '#'
    pub color: Option<String>,
    /// Spacing after the paragraph in points
    pub spacing_after: Option<f32>,
}

impl Block {
    pub fn new(kind: BlockKind, runs: Vec<Run>) -> Self {
        Self {
            kind,
            runs,
            alignment: Alignment::Left,
            italic: false,
            color: None,
            spacing_after: None,
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading(_))
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    pub fn is_invisible(&self) -> bool {
        self.color.as_deref() == Some(BACKGROUND_COLOR)
    }

    pub fn centered(&mut self) -> &mut Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn italic(&mut self) -> &mut Self {
        self.italic = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push(&mut self, block: Block) -> &mut Block {
        self.blocks.push(block);
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    pub fn add_heading(&mut self, text: &str, level: u8) -> &mut Block {
        let level = level.clamp(1, 3);
        self.push(Block::new(BlockKind::Heading(level), vec![Run::plain(text)]))
    }

    pub fn add_paragraph(&mut self, text: &str) -> &mut Block {
        self.push(Block::new(BlockKind::Paragraph, vec![Run::plain(text)]))
    }

    pub fn add_runs(&mut self, runs: Vec<Run>) -> &mut Block {
        self.push(Block::new(BlockKind::Paragraph, runs))
    }

    pub fn add_bullet(&mut self, text: &str) -> &mut Block {
        self.push(Block::new(BlockKind::Bullet, vec![Run::plain(text)]))
    }

    /// Empty paragraph used as vertical space between entries
    pub fn add_spacer(&mut self) -> &mut Block {
        self.push(Block::new(BlockKind::Paragraph, Vec::new()))
    }

    /// Set font on every run and spacing on every paragraph
    pub fn apply_formatting(&mut self, font_family: &str, font_size: f32) {
        for block in &mut self.blocks {
            for run in &mut block.runs {
                run.font_family = Some(font_family.to_string());
                run.font_size = Some(font_size);
            }
            block.spacing_after = Some(if block.is_heading() {
                HEADING_SPACING_AFTER
            } else {
                BODY_SPACING_AFTER
            });
        }
    }

    /// Text of every non-empty block, in order
    pub fn texts(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|b| !b.is_empty())
            .map(Block::text)
            .collect()
    }

    pub fn headings(&self, level: u8) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Heading(level))
            .map(Block::text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_pass() {
        let mut doc = Document::new();
        doc.add_heading("Skills", 2);
        doc.add_paragraph("Python, Go").italic();
        doc.apply_formatting("Calibri", 10.5);

        let heading = &doc.blocks()[0];
        assert_eq!(heading.spacing_after, Some(HEADING_SPACING_AFTER));
        assert_eq!(heading.runs[0].font_family.as_deref(), Some("Calibri"));

        let body = &doc.blocks()[1];
        assert_eq!(body.spacing_after, Some(BODY_SPACING_AFTER));
        assert_eq!(body.runs[0].font_size, Some(10.5));
        assert!(body.italic);
    }

    #[test]
    fn test_heading_level_clamped() {
        let mut doc = Document::new();
        doc.add_heading("Deep", 7);
        assert_eq!(doc.blocks()[0].kind, BlockKind::Heading(3));
    }

    #[test]
    fn test_texts_skip_spacers() {
        let mut doc = Document::new();
        doc.add_paragraph("one");
        doc.add_spacer();
        doc.add_runs(vec![Run::plain("Email: "), Run::linked("a@b.c", "mailto:a@b.c")]);
        assert_eq!(doc.texts(), vec!["one", "Email: a@b.c"]);
    }
}
