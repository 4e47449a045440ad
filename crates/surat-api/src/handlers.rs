//! Route handlers.
//!
//! Each handler extracts the [`Session`], calls one [`LetterService`]
//! operation, and serializes the result. Failures flow through [`ApiError`].
//!
//! [`LetterService`]: surat_google::LetterService

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use http::{StatusCode, header};
use serde::{Deserialize, Serialize};
use surat_core::resident::Page;
use surat_core::{ExportFormat, LetterType, ProcessedDocumentHandle, Resident};
use surat_google::{DEFAULT_PER_PAGE, LetterForm, LetterPreview, LetterRequest, SessionSummary};

use crate::error::ApiError;
use crate::session::Session;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn session(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<SessionSummary>> {
    Ok(Json(state.service.session_summary(&session).await?))
}

// ============================================================================
// Residents
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ResidentQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn list_residents(
    State(state): State<AppState>,
    Session(session): Session,
    Query(query): Query<ResidentQuery>,
) -> ApiResult<Json<Page<Resident>>> {
    let page = state
        .service
        .search(
            &session,
            &query.q,
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .await?;
    Ok(Json(page))
}

pub async fn get_resident(
    State(state): State<AppState>,
    Session(session): Session,
    Path(nik): Path<String>,
) -> ApiResult<Json<Resident>> {
    Ok(Json(state.service.resident(&session, &nik).await?))
}

// ============================================================================
// Letter types
// ============================================================================

pub async fn list_letter_types(
    State(state): State<AppState>,
    Session(session): Session,
) -> ApiResult<Json<Vec<LetterType>>> {
    Ok(Json(state.service.letter_types(&session).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub nik: Option<String>,
}

pub async fn letter_form(
    State(state): State<AppState>,
    Session(session): Session,
    Path(id): Path<String>,
    Query(query): Query<FormQuery>,
) -> ApiResult<Json<LetterForm>> {
    let form = state
        .service
        .form(&session, &id, query.nik.as_deref())
        .await?;
    Ok(Json(form))
}

// ============================================================================
// Letters
// ============================================================================

pub async fn preview_letter(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<LetterRequest>,
) -> ApiResult<Json<LetterPreview>> {
    Ok(Json(state.service.preview(&session, &request).await?))
}

pub async fn create_document(
    State(state): State<AppState>,
    Session(session): Session,
    Json(request): Json<LetterRequest>,
) -> ApiResult<(StatusCode, Json<ProcessedDocumentHandle>)> {
    let handle = state.service.materialize(&session, &request).await?;
    Ok((StatusCode::CREATED, Json(handle)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
    pub file_name: Option<String>,
}

pub async fn export_document(
    State(state): State<AppState>,
    Session(session): Session,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let format = match query.format.as_deref() {
        Some(f) => f.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };
    let file_name = query
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(id.as_str())
        .to_string();

    let file = state
        .service
        .export(&session, &id, format, &file_name)
        .await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.file_name.replace(['"', '\\', '\r', '\n'], "_")
    );
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(file.bytes))
        .map_err(|e| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "RESPONSE",
                e.to_string(),
            )
        })?;
    Ok(response)
}

/// Always 204; cleanup failures are only logged.
pub async fn delete_document(
    State(state): State<AppState>,
    Session(session): Session,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.service.dispose(&session, &id).await;
    StatusCode::NO_CONTENT
}
