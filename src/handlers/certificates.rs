//! Certificate lookup and download handlers

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::AppState;
use crate::services::CertificateDownload;
use crate::utils::errors::Result;
use crate::utils::response::success;

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub usn: String,
}

pub async fn lookup_certificates(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Response> {
    let certificates = state.services.certificate_service.lookup(&query.usn).await?;
    let message = if certificates.is_empty() {
        "No certificates found"
    } else {
        "Certificates retrieved"
    };
    Ok(success(certificates, message))
}

pub async fn download_certificate(
    State(state): State<AppState>,
    Path(certificate_id): Path<Uuid>,
) -> Result<Response> {
    let download = state.services.certificate_service.download(certificate_id).await?;
    Ok(pdf_response(download))
}

/// PDF attachment response
pub fn pdf_response(download: CertificateDownload) -> Response {
    (
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", download.file_name)),
        ],
        download.bytes,
    )
        .into_response()
}
