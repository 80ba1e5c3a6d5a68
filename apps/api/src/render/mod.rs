//! Template rendering: pure functions from a resume snapshot to a layout.
//!
//! A template produces an ordered list of [`Block`]s. Serializers turn blocks
//! into plain text or HTML; the export pipeline paginates the same blocks.
//! Nothing here touches the store.

pub mod templates;

use serde::Serialize;

use crate::models::{ResumeDocument, TemplateChoice};

pub use templates::{catalog, TemplateInfo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryBlock {
    pub title: String,
    pub subtitle: String,
    pub dates: String,
    pub location: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Block {
    Name(String),
    Title(String),
    Contact(Vec<String>),
    Heading(String),
    Entry(EntryBlock),
    Paragraph { text: String, emphasis: bool },
    Tags(Vec<String>),
    List(Vec<String>),
    Rating { label: String, level: u8 },
    /// Ends the sidebar column in two-column templates.
    ColumnBreak,
}

impl Block {
    /// Headings must not end a page without the block that follows them.
    pub fn keeps_with_next(&self) -> bool {
        matches!(self, Block::Heading(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedResume {
    pub template: TemplateChoice,
    pub blocks: Vec<Block>,
}

impl RenderedResume {
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.blocks {
            lines.extend(block_text_lines(block));
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Standalone HTML fragment. Two-column templates get a sidebar `<aside>`.
    pub fn to_html(&self) -> String {
        let two_column = self.blocks.contains(&Block::ColumnBreak);
        let mut html = format!(r#"<article class="resume resume-{}">"#, self.template);
        html.push_str(if two_column {
            r#"<aside class="sidebar">"#
        } else {
            r#"<main class="content">"#
        });
        for block in &self.blocks {
            if *block == Block::ColumnBreak {
                html.push_str(r#"</aside><main class="content">"#);
            } else {
                html.push_str(&block_html(block));
            }
        }
        html.push_str("</main></article>");
        html
    }
}

/// Renders `document` with `template`. The document's own selection is not
/// consulted, so callers can preview any template.
pub fn render(document: &ResumeDocument, template: TemplateChoice) -> RenderedResume {
    let blocks = match template {
        TemplateChoice::Modern => templates::modern(document),
        TemplateChoice::Professional => templates::professional(document),
        TemplateChoice::Minimal => templates::minimal(document),
        TemplateChoice::Creative => templates::creative(document),
    };
    RenderedResume { template, blocks }
}

/// Logical (unwrapped) text lines of one block.
pub fn block_text_lines(block: &Block) -> Vec<String> {
    match block {
        Block::Name(name) => vec![name.clone()],
        Block::Title(title) => vec![title.clone()],
        Block::Contact(items) => vec![items.join(" | ")],
        Block::Heading(text) => vec![String::new(), text.clone()],
        Block::Entry(entry) => {
            let mut head = entry.title.clone();
            if !entry.subtitle.is_empty() {
                head.push_str(" — ");
                head.push_str(&entry.subtitle);
            }
            if !entry.dates.is_empty() {
                head.push_str(&format!(" ({})", entry.dates));
            }
            let mut lines = vec![head];
            if !entry.location.is_empty() {
                lines.push(entry.location.clone());
            }
            if let Some(link) = &entry.link {
                lines.push(format!("View Project: {link}"));
            }
            lines
        }
        Block::Paragraph { text, .. } => vec![text.clone()],
        Block::Tags(tags) => vec![tags.join(" · ")],
        Block::List(items) => items.iter().map(|i| format!("• {i}")).collect(),
        Block::Rating { label, level } => vec![format!("{label} {}", stars(*level))],
        Block::ColumnBreak => Vec::new(),
    }
}

/// HTML for one block. All text is escaped.
pub fn block_html(block: &Block) -> String {
    match block {
        Block::Name(name) => format!(r#"<h1 class="name">{}</h1>"#, escape(name)),
        Block::Title(title) => format!(r#"<p class="title">{}</p>"#, escape(title)),
        Block::Contact(items) => list_html("contact", items),
        Block::Heading(text) => format!("<h2>{}</h2>", escape(text)),
        Block::Entry(entry) => {
            let mut html = String::from(r#"<div class="entry">"#);
            html.push_str(&format!("<h3>{}</h3>", escape(&entry.title)));
            for (class, value) in [
                ("subtitle", &entry.subtitle),
                ("dates", &entry.dates),
                ("location", &entry.location),
            ] {
                if !value.is_empty() {
                    html.push_str(&format!(r#"<p class="{class}">{}</p>"#, escape(value)));
                }
            }
            if let Some(link) = &entry.link {
                html.push_str(&format!(r#"<a href="{}">View Project</a>"#, escape(link)));
            }
            html.push_str("</div>");
            html
        }
        Block::Paragraph { text, emphasis } => {
            if *emphasis {
                format!("<p><em>{}</em></p>", escape(text))
            } else {
                format!("<p>{}</p>", escape(text))
            }
        }
        Block::Tags(tags) => list_html("tags", tags),
        Block::List(items) => list_html("list", items),
        Block::Rating { label, level } => format!(
            r#"<div class="rating"><span>{}</span><span class="stars">{}</span></div>"#,
            escape(label),
            stars(*level)
        ),
        Block::ColumnBreak => String::new(),
    }
}

fn list_html(class: &str, items: &[String]) -> String {
    let mut html = format!(r#"<ul class="{class}">"#);
    for item in items {
        html.push_str(&format!("<li>{}</li>", escape(item)));
    }
    html.push_str("</ul>");
    html
}

fn stars(level: u8) -> String {
    let filled = usize::from(level.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entity, Experience, ExperiencePatch, PersonalInfo, Skill, SkillLevel};

    fn sample() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                title: "Engineer".to_string(),
                summary: "Builds <reliable> systems & tools".to_string(),
                ..PersonalInfo::default()
            },
            experience: vec![Experience::create(
                "x1".to_string(),
                ExperiencePatch {
                    company: Some("Acme".to_string()),
                    position: Some("Lead".to_string()),
                    start_date: Some("2020-01".to_string()),
                    end_date: Some("2021-01".to_string()),
                    current: Some(true),
                    ..ExperiencePatch::default()
                },
            )],
            skills: vec![Skill {
                id: "s1".to_string(),
                name: "Rust".to_string(),
                level: SkillLevel::new(4),
            }],
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn test_text_shows_present_for_current_role() {
        let text = render(&sample(), TemplateChoice::Modern).to_text();
        assert!(text.contains("Lead — Acme (2020-01 – Present)"), "{text}");
        assert!(!text.contains("2021-01"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let html = render(&sample(), TemplateChoice::Modern).to_html();
        assert!(html.contains("Builds &lt;reliable&gt; systems &amp; tools"));
        assert!(!html.contains("<reliable>"));
    }

    #[test]
    fn test_creative_html_has_sidebar_and_main() {
        let html = render(&sample(), TemplateChoice::Creative).to_html();
        assert!(html.starts_with(r#"<article class="resume resume-creative"><aside class="sidebar">"#));
        assert!(html.contains(r#"</aside><main class="content">"#));
        assert!(html.ends_with("</main></article>"));
    }

    #[test]
    fn test_rating_renders_stars() {
        let lines = block_text_lines(&Block::Rating {
            label: "Rust".to_string(),
            level: 4,
        });
        assert_eq!(lines, vec!["Rust ★★★★☆".to_string()]);
    }

    #[test]
    fn test_heading_keeps_with_next() {
        assert!(Block::Heading("Skills".to_string()).keeps_with_next());
        assert!(!Block::Name("x".to_string()).keeps_with_next());
    }
}
