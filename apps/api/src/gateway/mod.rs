//! AI Gateway: the boundary between HireAI and the hosted generative model.
//!
//! Two stateless operations: score a resume against a job posting, and draft an
//! interview invitation. `AppState` holds an `Arc<dyn AiGateway>` so the backend
//! can be swapped (tests use scripted gateways).

pub mod prompts;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};
use crate::models::candidate::Evaluation;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The service answered, but not with a usable evaluation.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The call itself did not complete successfully.
    #[error("model service call failed: {0}")]
    TransportFailure(String),
}

impl GatewayError {
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            GatewayError::TransportFailure(_) => "GATEWAY_TRANSPORT_FAILURE",
        }
    }
}

impl From<LlmError> for GatewayError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(_) | LlmError::Api { .. } => {
                GatewayError::TransportFailure(err.to_string())
            }
            LlmError::Parse(_) | LlmError::EmptyContent => {
                GatewayError::MalformedResponse(err.to_string())
            }
        }
    }
}

#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Scores `resume_text` against `job_content`. Fails rather than returning a
    /// partially populated evaluation.
    async fn evaluate_candidate(
        &self,
        job_content: &str,
        resume_text: &str,
    ) -> Result<Evaluation, GatewayError>;

    /// Drafts an invitation email. An empty model response is a valid empty string.
    async fn generate_email(
        &self,
        candidate_name: &str,
        job_title: &str,
        score: u8,
    ) -> Result<String, GatewayError>;
}

/// Evaluation exactly as the model returns it. All five fields are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    pub match_percentage: f64,
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub recommended_questions: Vec<String>,
}

impl TryFrom<EvaluationPayload> for Evaluation {
    type Error = GatewayError;

    fn try_from(payload: EvaluationPayload) -> Result<Self, Self::Error> {
        let raw = payload.match_percentage;
        if !raw.is_finite() {
            return Err(GatewayError::MalformedResponse(format!(
                "matchPercentage is not a finite number: {raw}"
            )));
        }
        let clamped = raw.round().clamp(0.0, 100.0);
        if clamped != raw.round() {
            warn!("Model returned out-of-range matchPercentage {raw}; clamped to {clamped}");
        }

        Ok(Evaluation {
            summary: payload.summary,
            pros: payload.pros,
            cons: payload.cons,
            match_percentage: clamped as u8,
            recommended_questions: payload.recommended_questions,
        })
    }
}

/// Gemini-backed gateway.
pub struct GeminiGateway {
    llm: LlmClient,
}

impl GeminiGateway {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiGateway for GeminiGateway {
    async fn evaluate_candidate(
        &self,
        job_content: &str,
        resume_text: &str,
    ) -> Result<Evaluation, GatewayError> {
        let prompt = prompts::evaluation_prompt(job_content, resume_text);
        let payload: EvaluationPayload = self
            .llm
            .call_json(&prompt, &prompts::evaluation_schema())
            .await?;
        payload.try_into()
    }

    async fn generate_email(
        &self,
        candidate_name: &str,
        job_title: &str,
        score: u8,
    ) -> Result<String, GatewayError> {
        let prompt = prompts::invitation_email_prompt(candidate_name, job_title, score);
        Ok(self.llm.call_text(&prompt).await?)
    }
}
