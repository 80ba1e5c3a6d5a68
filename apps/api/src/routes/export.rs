use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::ExportFormat;
use crate::models::{ResumeDocument, TemplateChoice};
use crate::render::{catalog, render, TemplateInfo};
use crate::state::AppState;

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(catalog())
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
    /// `html`, `text` or `json` (default).
    pub format: Option<String>,
}

fn template_or_selected(
    requested: Option<&str>,
    document: &ResumeDocument,
) -> Result<TemplateChoice, AppError> {
    match requested {
        Some(name) => name.parse().map_err(AppError::Validation),
        None => Ok(document.selected_template),
    }
}

/// GET /api/v1/preview?template=&format=
///
/// Read-only: renders the current snapshot without touching the store.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let document = state.store.snapshot().await;
    let template = template_or_selected(params.template.as_deref(), &document)?;
    let rendered = render(&document, template);

    let response = match params.format.as_deref().unwrap_or("json") {
        "html" => Html(rendered.to_html()).into_response(),
        "text" => rendered.to_text().into_response(),
        "json" => Json(rendered).into_response(),
        other => {
            return Err(AppError::Validation(format!(
                "unknown preview format '{other}'"
            )))
        }
    };
    Ok(response)
}

#[derive(Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

/// POST /api/v1/export
///
/// Streams the artifact back as a download. A failure leaves the resume and
/// the wizard position as they were.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let format: ExportFormat = match req.format.as_deref() {
        Some(name) => name.parse().map_err(AppError::Validation)?,
        None => ExportFormat::default(),
    };
    let document = state.store.snapshot().await;
    let template = template_or_selected(req.template.as_deref(), &document)?;

    let artifact = state.exporter.export(document, template, format).await?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
    ];
    Ok((headers, artifact.bytes))
}
