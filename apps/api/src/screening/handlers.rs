//! Axum route handlers for resume screening and candidate invitations.

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::screening::intake::ResumeUpload;
use crate::screening::{self, DeliveryReceipt};
use crate::state::AppState;
use crate::store::EmailDraft;

const DEFAULT_RESUME_FILENAME: &str = "resume.txt";

#[derive(Debug, Default, Deserialize)]
pub struct DraftInvitationRequest {
    #[serde(default)]
    pub job_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendInvitationRequest {
    pub content: String,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart body: {e}"))
}

/// POST /api/v1/screening/resumes
///
/// Multipart form: `file` (required) and `job_id` (optional, defaults to the
/// selected job). Evaluates the resume and returns the new candidate.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    let mut job_id: Option<String> = None;
    let mut upload: Option<ResumeUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("job_id") => {
                let value = field.text().await.map_err(multipart_error)?;
                let value = value.trim();
                if !value.is_empty() {
                    job_id = Some(value.to_string());
                }
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or(DEFAULT_RESUME_FILENAME)
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload = Some(ResumeUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("file part is required".to_string()))?;

    let candidate = screening::screen_resume(
        &state.store,
        state.gateway.as_ref(),
        &state.in_flight,
        job_id.as_deref(),
        upload,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /api/v1/screening/email-draft
pub async fn handle_get_email_draft(State(state): State<AppState>) -> Json<Option<EmailDraft>> {
    Json(state.store.read().await.email_draft().cloned())
}

/// POST /api/v1/candidates/:id/invitation
///
/// Drafts an invitation for the candidate against `job_id` or the selected job.
/// The body is optional; when present it must be a valid request.
pub async fn handle_draft_invitation(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
    body: Bytes,
) -> Result<Json<EmailDraft>, AppError> {
    let request = parse_draft_request(&body)?;
    let draft = screening::draft_invitation(
        &state.store,
        state.gateway.as_ref(),
        &candidate_id,
        request.job_id.as_deref(),
    )
    .await?;
    Ok(Json(draft))
}

fn parse_draft_request(body: &[u8]) -> Result<DraftInvitationRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DraftInvitationRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid invitation request: {e}")))
}

/// POST /api/v1/candidates/:id/invitation/send
///
/// Simulated delivery; no email leaves the service.
pub async fn handle_send_invitation(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
    Json(request): Json<SendInvitationRequest>,
) -> Result<Json<DeliveryReceipt>, AppError> {
    let receipt = screening::send_invitation(&state.store, &candidate_id, &request.content).await?;
    Ok(Json(receipt))
}
