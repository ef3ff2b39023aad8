//! Upload cleaning handlers.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tidytab::{CleaningReport, CleaningResult, TidyError};
use tracing::info;
use uuid::Uuid;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// Name offered to the browser for the cleaned download.
const DOWNLOAD_NAME: &str = "attachment; filename=\"cleaned_data.csv\"";

/// Header carrying the number of duplicate rows removed.
const DUPLICATES_HEADER: &str = "x-duplicates-removed";

/// Response for the JSON cleaning endpoint.
#[derive(Serialize)]
pub struct CleanResponse {
    /// File name of the persisted cleaned copy.
    pub artifact: String,
    pub rows: usize,
    pub columns: usize,
    pub report: CleaningReport,
}

struct Upload {
    name: String,
    bytes: Bytes,
}

struct Cleaned {
    artifact: String,
    body: Vec<u8>,
    result: CleaningResult,
}

/// Clean an upload and return the cleaned CSV as a download.
pub async fn clean_download(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let cleaned = clean_upload(&state, upload).await?;

    let duplicates = HeaderValue::from(cleaned.result.report.duplicates_removed);
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static(DOWNLOAD_NAME),
            ),
            (HeaderName::from_static(DUPLICATES_HEADER), duplicates),
        ],
        cleaned.body,
    )
        .into_response())
}

/// Clean an upload and return the report as JSON.
pub async fn clean_json(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CleanResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let cleaned = clean_upload(&state, upload).await?;

    Ok(Json(CleanResponse {
        artifact: cleaned.artifact,
        rows: cleaned.result.summary.rows_after,
        columns: cleaned.result.summary.columns_after,
        report: cleaned.result.report,
    }))
}

/// Take the first `file` field, skipping any others.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or("upload.csv").to_string();
        let bytes = field.bytes().await?;
        return Ok(Upload { name, bytes });
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// Run the pipeline off the async runtime and persist the cleaned copy.
async fn clean_upload(state: &AppState, upload: Upload) -> Result<Cleaned, ApiError> {
    let state = state.clone();

    let cleaned = tokio::task::spawn_blocking(move || -> Result<Cleaned, TidyError> {
        let result = state.cleaner.clean_bytes(&upload.name, &upload.bytes)?;
        let body = state.writer.to_bytes(&result.table)?;

        let artifact = format!("cleaned_{}.csv", Uuid::new_v4());
        let path = state.output_dir.join(&artifact);
        std::fs::write(&path, &body).map_err(|e| TidyError::Io { path, source: e })?;

        info!(
            upload = %upload.name,
            %artifact,
            duplicates = result.report.duplicates_removed,
            "stored cleaned upload"
        );

        Ok(Cleaned {
            artifact,
            body,
            result,
        })
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Cleaning task failed: {}", e)))??;

    Ok(cleaned)
}
