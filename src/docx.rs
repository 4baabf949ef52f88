// src/docx.rs
//! Office Open XML writer for [`Document`]
//!
//! A `.docx` file is a zip package of XML parts. Only the parts needed by the
//! CV layout are written: body, styles, bullet numbering, hyperlink
//! relationships and core properties. Entry timestamps are pinned so that the
//! same document always serializes to the same bytes.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::document::{Alignment, Block, BlockKind, Document, Run};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// Relationship ids 1 and 2 are styles and numbering; links start after them
const FIRST_LINK_REL: usize = 3;

/// One inch in twentieths of a point
const INCH_TWIPS: u32 = 1440;

#[derive(Debug, Clone, Default)]
pub struct DocxMetadata {
    pub title: String,
    pub author: String,
}

pub fn save(doc: &Document, meta: &DocxMetadata, path: &Path) -> Result<()> {
    let bytes = to_bytes(doc, meta)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write document: {}", path.display()))
}

pub fn to_bytes(doc: &Document, meta: &DocxMetadata) -> Result<Vec<u8>> {
    let (body, links) = document_xml(doc);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let parts: [(&str, String); 7] = [
        ("[Content_Types].xml", content_types_xml()),
        ("_rels/.rels", package_rels_xml()),
        ("docProps/core.xml", core_xml(meta)),
        ("word/document.xml", body),
        ("word/_rels/document.xml.rels", document_rels_xml(&links)),
        ("word/styles.xml", styles_xml()),
        ("word/numbering.xml", numbering_xml()),
    ];

    for (name, content) in parts {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to add {} to document package", name))?;
        zip.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {} into document package", name))?;
    }

    let cursor = zip.finish().context("Failed to finalize document package")?;
    Ok(cursor.into_inner())
}

pub fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Points to half-points, the unit of `w:sz`
fn half_points(size: f32) -> u32 {
    (size * 2.0).round().max(1.0) as u32
}

/// Points to twentieths of a point, the unit of `w:spacing`
fn twips(points: f32) -> u32 {
    (points * 20.0).round().max(0.0) as u32
}

fn document_xml(doc: &Document) -> (String, Vec<String>) {
    let mut links = Vec::new();
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    let _ = write!(xml, r#"<w:document xmlns:w="{}" xmlns:r="{}"><w:body>"#, NS_W, NS_R);

    for block in doc.blocks() {
        write_paragraph(&mut xml, block, &mut links);
    }

    let _ = write!(
        xml,
        r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#,
        m = INCH_TWIPS
    );
    xml.push_str("</w:body></w:document>");
    (xml, links)
}

fn write_paragraph(xml: &mut String, block: &Block, links: &mut Vec<String>) {
    xml.push_str("<w:p><w:pPr>");
    match block.kind {
        BlockKind::Heading(level) => {
            let _ = write!(xml, r#"<w:pStyle w:val="Heading{}"/>"#, level);
        }
        BlockKind::Bullet => xml.push_str(r#"<w:pStyle w:val="ListBullet"/>"#),
        BlockKind::Paragraph => {}
    }
    if let Some(after) = block.spacing_after {
        let _ = write!(xml, r#"<w:spacing w:after="{}"/>"#, twips(after));
    }
    if block.alignment == Alignment::Center {
        xml.push_str(r#"<w:jc w:val="center"/>"#);
    }
    xml.push_str("</w:pPr>");

    for run in &block.runs {
        match &run.link {
            Some(target) => {
                links.push(target.clone());
                let rel = FIRST_LINK_REL + links.len() - 1;
                let _ = write!(xml, r#"<w:hyperlink r:id="rId{}" w:history="1">"#, rel);
                write_run(xml, run, block, true);
                xml.push_str("</w:hyperlink>");
            }
            None => write_run(xml, run, block, false),
        }
    }
    xml.push_str("</w:p>");
}

fn write_run(xml: &mut String, run: &Run, block: &Block, hyperlink: bool) {
    xml.push_str("<w:r><w:rPr>");
    if hyperlink {
        xml.push_str(r#"<w:rStyle w:val="Hyperlink"/>"#);
    }
    if let Some(family) = &run.font_family {
        let family = xml_escape(family);
        let _ = write!(
            xml,
            r#"<w:rFonts w:ascii="{f}" w:hAnsi="{f}" w:cs="{f}"/>"#,
            f = family
        );
    }
    if block.italic {
        xml.push_str("<w:i/>");
    }
    if let Some(color) = &block.color {
        let _ = write!(xml, r#"<w:color w:val="{}"/>"#, xml_escape(color));
    }
    if let Some(size) = run.font_size {
        let hp = half_points(size);
        let _ = write!(xml, r#"<w:sz w:val="{hp}"/><w:szCs w:val="{hp}"/>"#);
    }
    let _ = write!(
        xml,
        r#"</w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        xml_escape(&run.text)
    );
}

fn content_types_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
        r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"</Types>"#
    )
    .to_string()
}

fn package_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
        r#"</Relationships>"#
    )
    .to_string()
}

fn document_rels_xml(links: &[String]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#,
    ));
    for (i, target) in links.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}" Target="{}" TargetMode="External"/>"#,
            FIRST_LINK_REL + i,
            REL_HYPERLINK,
            xml_escape(target)
        );
    }
    xml.push_str("</Relationships>");
    xml
}

fn core_xml(meta: &DocxMetadata) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
            r#"<dc:title>{}</dc:title><dc:creator>{}</dc:creator>"#,
            r#"</cp:coreProperties>"#
        ),
        xml_escape(&meta.title),
        xml_escape(&meta.author)
    )
}

fn styles_xml() -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>"#,
        r#"<w:pPrDefault><w:pPr><w:spacing w:after="60"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    ));
    for (level, size) in [(1u8, 32u32), (2, 26), (3, 24)] {
        let _ = write!(
            xml,
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{l}"><w:name w:val="heading {l}"/>"#,
                r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
                r#"<w:pPr><w:keepNext/><w:spacing w:before="240"/><w:outlineLvl w:val="{o}"/></w:pPr>"#,
                r#"<w:rPr><w:b/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:style>"#
            ),
            l = level,
            o = level - 1,
            s = size
        );
    }
    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>"#,
        r#"<w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr></w:style>"#,
        r#"<w:style w:type="character" w:styleId="Hyperlink"><w:name w:val="Hyperlink"/>"#,
        r#"<w:rPr><w:color w:val="0563C1"/><w:u w:val="single"/></w:rPr></w:style>"#,
        r#"</w:styles>"#
    ));
    xml
}

fn numbering_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
        r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/>"#,
        r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#,
        r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#,
        r#"</w:numbering>"#
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.add_heading("Jane & Co", 1).centered();
        doc.add_runs(vec![Run::linked("jane@x.com", "mailto:jane@x.com")]);
        doc.add_bullet("Shipped <fast>");
        doc.apply_formatting("Arial", 11.0);
        doc
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(xml_escape("bell\u{7}"), "bell");
    }

    #[test]
    fn test_document_part_content() {
        let meta = DocxMetadata {
            title: "CV".to_string(),
            author: "Jane".to_string(),
        };
        let bytes = to_bytes(&sample(), &meta).unwrap();
        let body = read_part(&bytes, "word/document.xml");

        assert!(body.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(body.contains(r#"<w:jc w:val="center"/>"#));
        assert!(body.contains("Jane &amp; Co"));
        assert!(body.contains("Shipped &lt;fast&gt;"));
        assert!(body.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
        assert!(body.contains(r#"<w:hyperlink r:id="rId3""#));
        assert!(body.contains(r#"<w:sz w:val="22"/>"#));
        assert!(body.contains(r#"<w:rFonts w:ascii="Arial""#));

        let rels = read_part(&bytes, "word/_rels/document.xml.rels");
        assert!(rels.contains(r#"Id="rId3""#));
        assert!(rels.contains(r#"Target="mailto:jane@x.com" TargetMode="External""#));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let meta = DocxMetadata::default();
        let first = to_bytes(&sample(), &meta).unwrap();
        let second = to_bytes(&sample(), &meta).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invisible_run_properties() {
        let mut doc = Document::new();
        let mut block = Block::new(
            BlockKind::Paragraph,
            vec![Run {
                font_size: Some(1.0),
                ..Run::plain("token-123")
            }],
        );
        block.color = Some("FFFFFF".to_string());
        doc.push(block);

        let bytes = to_bytes(&doc, &DocxMetadata::default()).unwrap();
        let body = read_part(&bytes, "word/document.xml");
        assert!(body.contains(r#"<w:color w:val="FFFFFF"/><w:sz w:val="2"/>"#));
        assert!(body.contains("token-123"));
    }
}
