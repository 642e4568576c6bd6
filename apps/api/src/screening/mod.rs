//! Candidate screening: resume intake → AI evaluation → store commit, plus
//! invitation drafting and (simulated) delivery.
//!
//! No store lock is held while a gateway call is pending. Each flow commits at
//! most once, after its call resolves, so a failure leaves the store untouched.

pub mod handlers;
pub mod intake;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::gateway::AiGateway;
use crate::models::candidate::Candidate;
use crate::store::{EmailDraft, SharedStore};

use self::intake::{derive_display_name, ResumeUpload};

pub const EMAIL_FAILURE_PLACEHOLDER: &str =
    "Failed to generate email template. Please try again.";

/// Counts screenings awaiting the gateway. Drives the "processing" indicator.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicUsize>);

/// Decrements the in-flight count when dropped, whatever the outcome.
#[must_use]
pub struct InFlightGuard(Arc<AtomicUsize>);

impl InFlight {
    pub fn begin(&self) -> InFlightGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        InFlightGuard(Arc::clone(&self.0))
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_processing(&self) -> bool {
        self.count() > 0
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Proof that an invitation was "sent". Delivery is simulated.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReceipt {
    pub candidate_id: String,
    pub recipient: String,
    pub simulated: bool,
    pub sent_at: DateTime<Utc>,
}

/// Picks the explicitly requested job, falling back to the selected one.
fn resolve_job_id(requested: Option<&str>, selected: Option<&str>) -> Result<String, AppError> {
    requested
        .or(selected)
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation("No job selected for screening".to_string()))
}

/// Evaluates an uploaded resume against a job and adds the resulting candidate.
pub async fn screen_resume(
    store: &SharedStore,
    gateway: &dyn AiGateway,
    in_flight: &InFlight,
    job_id: Option<&str>,
    upload: ResumeUpload,
) -> Result<Candidate, AppError> {
    let resume_text = upload.decode_text()?;
    let name = derive_display_name(&upload.filename);

    let job_content = {
        let store = store.read().await;
        let job_id = resolve_job_id(job_id, store.selected_job_id())?;
        store
            .find_job(&job_id)
            .map(|job| job.content.clone())
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?
    };

    let evaluation = {
        let _processing = in_flight.begin();
        gateway
            .evaluate_candidate(&job_content, &resume_text)
            .await?
    };

    let candidate = Candidate::from_evaluation(name, resume_text, evaluation);
    store.write().await.add_candidate(candidate.clone());

    info!(
        "Screened candidate {} ({}): score={} status={:?}",
        candidate.id, candidate.name, candidate.score, candidate.status
    );
    Ok(candidate)
}

/// Asks the gateway for an invitation email and shows it as the current draft.
///
/// On gateway failure the draft holds [`EMAIL_FAILURE_PLACEHOLDER`] and the error
/// is still returned. Drafts for flows the user navigated away from are dropped.
pub async fn draft_invitation(
    store: &SharedStore,
    gateway: &dyn AiGateway,
    candidate_id: &str,
    job_id: Option<&str>,
) -> Result<EmailDraft, AppError> {
    let (candidate, job_id, job_title, token) = {
        let store = store.read().await;
        let candidate = store
            .find_candidate(candidate_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
        let job_id = resolve_job_id(job_id, store.selected_job_id())?;
        let job_title = store
            .find_job(&job_id)
            .map(|job| job.title.clone())
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
        (candidate, job_id, job_title, store.begin_operation())
    };

    let result = gateway
        .generate_email(&candidate.name, &job_title, candidate.score)
        .await;

    let draft = EmailDraft {
        candidate_id: candidate.id.clone(),
        job_id,
        content: match &result {
            Ok(text) => text.clone(),
            Err(_) => EMAIL_FAILURE_PLACEHOLDER.to_string(),
        },
        failed: result.is_err(),
    };
    store.write().await.apply_email_draft(token, draft.clone());

    match result {
        Ok(_) => Ok(draft),
        Err(e) => {
            warn!("Invitation draft failed for candidate {}: {e}", candidate.id);
            Err(e.into())
        }
    }
}

/// Simulates delivering `content` to the candidate. Nothing leaves the process.
pub async fn send_invitation(
    store: &SharedStore,
    candidate_id: &str,
    content: &str,
) -> Result<DeliveryReceipt, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "Invitation content cannot be empty".to_string(),
        ));
    }

    let mut store = store.write().await;
    let candidate = store
        .find_candidate(candidate_id)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let receipt = DeliveryReceipt {
        candidate_id: candidate.id.clone(),
        recipient: candidate.email.clone(),
        simulated: true,
        sent_at: Utc::now(),
    };
    info!(
        "Simulated invitation to {} <{}> ({} chars)",
        candidate.name,
        receipt.recipient,
        content.len()
    );

    store.clear_email_draft();
    Ok(receipt)
}
