use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scores strictly above this are shortlisted at evaluation time.
pub const SHORTLIST_THRESHOLD: u8 = 75;

/// Contact address attached to every screened candidate until real extraction exists.
pub const PLACEHOLDER_EMAIL: &str = "contact@candidate.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    New,
    Screened,
    Rejected,
    Shortlisted,
}

/// Structured verdict from the AI gateway, embedded in a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Always equal to the owning candidate's `score`.
    pub match_percentage: u8,
    pub recommended_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub resume_text: String,
    pub score: u8,
    pub status: CandidateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

impl Candidate {
    /// Builds a freshly screened candidate. Score, status and evaluation are
    /// all taken from the single evaluation so they cannot disagree.
    pub fn from_evaluation(name: String, resume_text: String, evaluation: Evaluation) -> Self {
        let score = evaluation.match_percentage;
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email: PLACEHOLDER_EMAIL.to_string(),
            resume_text,
            score,
            status: derive_status(score),
            evaluation: Some(evaluation),
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

/// Status assigned once, when an evaluation lands.
pub fn derive_status(score: u8) -> CandidateStatus {
    if score > SHORTLIST_THRESHOLD {
        CandidateStatus::Shortlisted
    } else {
        CandidateStatus::Screened
    }
}

/// Coarse bucket used when listing candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        if score > 80 {
            ScoreBand::High
        } else if score > 60 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}
