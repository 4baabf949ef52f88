// src/export/html.rs
//! HTML synthesis from an assembled document, used as input for PDF rendering

use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;

use crate::document::{Alignment, Block, BlockKind, Document};
use crate::renderers::contact::{mailto_target, tel_target, web_target};

pub const DATE_RANGE_CLASS: &str = "date-range";
pub const HIDDEN_MARKER_CLASS: &str = "hidden-marker";

const PROFILE_LABELS: [&str; 3] = ["LinkedIn:", "GitHub:", "Website:"];

fn date_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2} - (\d{4}-\d{2}|Present)$").expect("valid date range regex")
    })
}

fn year_range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}\s*-\s*(\d{4}|Present)$").expect("valid year range regex")
    })
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[\d\s().-]{7,}$").expect("valid phone regex"))
}

fn inline_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(https?://[^\s<]+|www\.[^\s<]+|[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})")
            .expect("valid inline link regex")
    })
}

pub fn is_date_range(text: &str) -> bool {
    date_range_re().is_match(text.trim())
}

/// Year-only ranges such as `2019 - 2021`, which are never phone numbers
fn is_year_range(text: &str) -> bool {
    year_range_re().is_match(text.trim())
}

pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn anchor(target: &str, text: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        html_escape(target),
        html_escape(text)
    )
}

/// Escape a line of body text and turn contact details into links
pub fn linkify(text: &str) -> String {
    let trimmed = text.trim();

    for label in PROFILE_LABELS {
        if let Some(value) = trimmed.strip_prefix(label) {
            let value = value.trim();
            if let Some(target) = web_target(value) {
                return format!("{} {}", html_escape(label), anchor(&target, value));
            }
        }
    }

    if email_re().is_match(trimmed) {
        if let Some(target) = mailto_target(trimmed) {
            return anchor(&target, trimmed);
        }
    }

    if phone_re().is_match(trimmed) && !is_date_range(trimmed) && !is_year_range(trimmed) {
        if let Some(target) = tel_target(trimmed) {
            return anchor(&target, trimmed);
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in inline_link_re().find_iter(text) {
        out.push_str(&html_escape(&text[last..m.start()]));
        let found = m.as_str().trim_end_matches(['.', ',', ';', ')']);
        let target = if found.contains('@') && !found.contains('/') {
            mailto_target(found)
        } else {
            web_target(found)
        };
        match target {
            Some(target) => out.push_str(&anchor(&target, found)),
            None => out.push_str(&html_escape(found)),
        }
        last = m.start() + found.len();
    }
    out.push_str(&html_escape(&text[last..]));
    out
}

fn class_attr(classes: &[&str]) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, classes.join(" "))
    }
}

fn write_block(html: &mut String, block: &Block) {
    let text = block.text();
    let center = block.alignment == Alignment::Center;

    if block.is_invisible() {
        let _ = writeln!(
            html,
            r#"<p class="{}">{}</p>"#,
            HIDDEN_MARKER_CLASS,
            html_escape(&text)
        );
        return;
    }

    match block.kind {
        BlockKind::Heading(level) => {
            let classes: &[&str] = if center { &["center"] } else { &[] };
            let _ = writeln!(
                html,
                "<h{l}{c}>{t}</h{l}>",
                l = level,
                c = class_attr(classes),
                t = html_escape(&text)
            );
        }
        BlockKind::Bullet => {
            let _ = writeln!(html, "<li>{}</li>", linkify(&text));
        }
        BlockKind::Paragraph => {
            if is_date_range(&text) {
                let _ = writeln!(
                    html,
                    r#"<p class="{}">{}</p>"#,
                    DATE_RANGE_CLASS,
                    html_escape(text.trim())
                );
                return;
            }
            let mut body = linkify(&text);
            if block.italic {
                body = format!("<em>{}</em>", body);
            }
            let classes: &[&str] = if center { &["center"] } else { &[] };
            let _ = writeln!(html, "<p{}>{}</p>", class_attr(classes), body);
        }
    }
}

fn stylesheet(font_family: &str, font_size: f32) -> String {
    format!(
        concat!(
            "body {{ font-family: \"{f}\", sans-serif; font-size: {s}pt; margin: 1in; color: #222; }}\n",
            "h1 {{ font-size: {h1}pt; margin-bottom: 4pt; }}\n",
            "h2 {{ font-size: {h2}pt; border-bottom: 1px solid #999; margin-top: 14pt; }}\n",
            "h3 {{ font-size: {h3}pt; margin-bottom: 2pt; }}\n",
            "p {{ margin: 0 0 3pt 0; }}\n",
            ".center {{ text-align: center; }}\n",
            ".{date} {{ font-style: italic; color: #555; }}\n",
            ".{hidden} {{ color: #ffffff; font-size: 1pt; opacity: 0.01; }}\n",
            "a {{ color: #0563c1; }}\n"
        ),
        f = html_escape(font_family),
        s = font_size,
        h1 = font_size + 5.0,
        h2 = font_size + 2.0,
        h3 = font_size + 1.0,
        date = DATE_RANGE_CLASS,
        hidden = HIDDEN_MARKER_CLASS
    )
}

/// Walk the blocks in order and emit an HTML page
pub fn synthesize(doc: &Document, title: &str, font_family: &str, font_size: f32) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, r#"<html><head><meta charset="utf-8">"#);
    let _ = writeln!(html, "<title>{}</title>", html_escape(title));
    let _ = writeln!(html, "<style>\n{}</style>", stylesheet(font_family, font_size));
    let _ = writeln!(html, "</head><body>");

    let mut in_list = false;
    for block in doc.blocks() {
        if block.is_empty() {
            continue;
        }
        let is_bullet = block.kind == BlockKind::Bullet && !block.is_invisible();
        if is_bullet && !in_list {
            let _ = writeln!(html, "<ul>");
            in_list = true;
        } else if !is_bullet && in_list {
            let _ = writeln!(html, "</ul>");
            in_list = false;
        }
        write_block(&mut html, block);
    }
    if in_list {
        let _ = writeln!(html, "</ul>");
    }

    let _ = writeln!(html, "</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Run, BACKGROUND_COLOR};

    #[test]
    fn test_date_range_detection() {
        assert!(is_date_range("2020-01 - 2022-06"));
        assert!(is_date_range("2020-01 - Present"));
        assert!(!is_date_range("2020 - Present"));
        assert!(!is_date_range("Graduated: 2019-06"));
    }

    #[test]
    fn test_date_range_paragraph_tagged() {
        let mut doc = Document::new();
        doc.add_paragraph("2020-01 - Present").italic();
        doc.add_paragraph("Built things");
        let html = synthesize(&doc, "CV", "Arial", 11.0);
        assert!(html.contains(r#"<p class="date-range">2020-01 - Present</p>"#));
        assert!(html.contains("<p>Built things</p>"));
    }

    #[test]
    fn test_no_date_range_without_pattern() {
        let mut doc = Document::new();
        doc.add_paragraph("Graduated: 2019-06");
        let html = synthesize(&doc, "CV", "Arial", 11.0);
        assert!(!html.contains(r#"class="date-range""#));
    }

    #[test]
    fn test_bullets_grouped_into_lists() {
        let mut doc = Document::new();
        doc.add_bullet("one");
        doc.add_bullet("two");
        doc.add_paragraph("between");
        doc.add_bullet("three");
        let html = synthesize(&doc, "CV", "Arial", 11.0);
        assert_eq!(html.matches("<ul>").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
        assert!(html.contains("<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<p>between</p>"));
    }

    #[test]
    fn test_headings_and_marker() {
        let mut doc = Document::new();
        doc.add_heading("Jane <Smith>", 1).centered();
        doc.add_heading("Skills", 2);
        let mut marker = Block::new(BlockKind::Paragraph, vec![Run::plain("token-123")]);
        marker.color = Some(BACKGROUND_COLOR.to_string());
        doc.push(marker);

        let html = synthesize(&doc, "CV", "Arial", 11.0);
        assert!(html.contains(r#"<h1 class="center">Jane &lt;Smith&gt;</h1>"#));
        assert!(html.contains("<h2>Skills</h2>"));
        assert!(html.contains(r#"<p class="hidden-marker">token-123</p>"#));
    }

    #[test]
    fn test_linkify_contact_lines() {
        assert_eq!(
            linkify("jane@x.com"),
            r#"<a href="mailto:jane@x.com">jane@x.com</a>"#
        );
        assert_eq!(
            linkify("+1 555 123 4567"),
            r#"<a href="tel:+15551234567">+1 555 123 4567</a>"#
        );
        assert_eq!(
            linkify("LinkedIn: linkedin.com/in/jane"),
            r#"LinkedIn: <a href="https://linkedin.com/in/jane">linkedin.com/in/jane</a>"#
        );
        assert_eq!(
            linkify("URL: github.com/jane & www.jane.dev."),
            r#"URL: github.com/jane &amp; <a href="https://www.jane.dev">www.jane.dev</a>."#
        );
        assert_eq!(linkify("Plain <text>"), "Plain &lt;text&gt;");
    }

    #[test]
    fn test_year_range_is_not_a_phone() {
        assert_eq!(linkify("2019 - 2021"), "2019 - 2021");
        assert_eq!(linkify("2019-2021"), "2019-2021");
        assert_eq!(linkify("2015 - Present"), "2015 - Present");

        let mut doc = Document::new();
        doc.add_paragraph("2019 - 2021").italic();
        let html = synthesize(&doc, "CV", "Arial", 11.0);
        assert!(html.contains("<p><em>2019 - 2021</em></p>"));
        assert!(!html.contains("tel:"));
    }
}
