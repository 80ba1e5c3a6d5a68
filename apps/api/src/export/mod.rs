//! Export of a resume snapshot to a printable file.
//!
//! Rendering, pagination and the file write all run on a blocking thread.
//! The artifact is written to a temp file inside the export directory and
//! renamed into place only once complete, so a failed export leaves nothing
//! behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::layout::{fill_summary, paginate_resume, Page};
use crate::models::{ResumeDocument, TemplateChoice};
use crate::render::{block_html, escape, render, RenderedResume};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    #[default]
    Html,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Html => "html",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "html" => Ok(ExportFormat::Html),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub content_type: &'static str,
    pub bytes: Bytes,
    pub pages: usize,
    pub created_at: DateTime<Utc>,
}

/// Page separator in text exports.
pub const FORM_FEED: char = '\u{0C}';

#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Exporter {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Exports `document` with `template` in `format`. The document itself is
    /// never modified.
    pub async fn export(
        &self,
        document: ResumeDocument,
        template: TemplateChoice,
        format: ExportFormat,
    ) -> Result<ExportArtifact, ExportError> {
        let output_dir = self.output_dir.clone();

        let artifact = tokio::task::spawn_blocking(move || {
            let rendered = render(&document, template);
            let (pages, config) = paginate_resume(&rendered);
            let fill = fill_summary(&pages, &config);
            tracing::debug!(
                template = %template,
                pages = fill.page_count,
                last_page_fill = fill.last_page_fill,
                "Paginated resume"
            );

            let body = match format {
                ExportFormat::Text => text_document(&pages),
                ExportFormat::Html => html_document(&rendered, &pages),
            };

            let created_at = Utc::now();
            let file_name = format!(
                "resume-{}-{}.{}",
                template,
                created_at.format("%Y%m%dT%H%M%S%3fZ"),
                format.extension()
            );
            let path = write_atomically(&output_dir, &file_name, body.as_bytes())?;

            Ok::<_, ExportError>(ExportArtifact {
                file_name,
                path,
                content_type: format.content_type(),
                bytes: Bytes::from(body),
                pages: pages.len(),
                created_at,
            })
        })
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?;

        match &artifact {
            Ok(a) => info!(
                "Exported {} ({} pages) at {}",
                a.path.display(),
                a.pages,
                a.created_at.to_rfc3339()
            ),
            Err(e) => warn!("Export failed: {e}"),
        }
        artifact
    }
}

fn write_atomically(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    let path = dir.join(file_name);
    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

fn text_document(pages: &[Page]) -> String {
    pages
        .iter()
        .map(|page| {
            let mut text = page.lines().join("\n");
            text.push('\n');
            text
        })
        .collect::<Vec<_>>()
        .join(&FORM_FEED.to_string())
}

const PRINT_CSS: &str = "@page { size: A4; margin: 0.75in; } \
section.page { page-break-after: always; } \
section.page:last-child { page-break-after: auto; }";

fn html_document(rendered: &RenderedResume, pages: &[Page]) -> String {
    let title = rendered
        .blocks
        .iter()
        .find_map(|b| match b {
            crate::render::Block::Name(name) if !name.is_empty() => Some(name.as_str()),
            _ => None,
        })
        .unwrap_or("Resume");

    let mut html = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{PRINT_CSS}</style></head>",
        escape(title)
    );
    html.push_str(&format!(
        r#"<body class="resume resume-{}">"#,
        rendered.template
    ));
    for page in pages {
        html.push_str(r#"<section class="page">"#);
        for fragment in &page.fragments {
            match rendered.blocks.get(fragment.block_index) {
                Some(block) if fragment.whole => html.push_str(&block_html(block)),
                Some(_) => html.push_str(&split_fragment_html(&fragment.lines)),
                None => {}
            }
        }
        html.push_str("</section>");
    }
    html.push_str("</body></html>");
    html
}

/// The share of a split block that landed on one page, as wrapped lines.
fn split_fragment_html(lines: &[String]) -> String {
    let mut html = String::from(r#"<div class="split">"#);
    for line in lines {
        html.push_str(&format!("<p>{}</p>", escape(line)));
    }
    html.push_str("</div>");
    html
}
