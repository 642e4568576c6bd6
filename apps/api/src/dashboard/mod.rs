//! Dashboard summary: headline counts and the best-scoring candidates.

pub mod handlers;

use serde::Serialize;

use crate::models::candidate::{CandidateStatus, ScoreBand};
use crate::store::AppStore;

pub const TOP_CANDIDATES: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub score: u8,
    pub status: CandidateStatus,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub active_jobs: usize,
    pub total_candidates: usize,
    pub shortlisted: usize,
    pub average_score: f64,
    /// Average rounded to a whole percent, as displayed.
    pub average_score_display: u8,
    pub top_candidates: Vec<RankedCandidate>,
    pub processing: bool,
}

pub fn summarize(store: &AppStore, processing: bool) -> DashboardSummary {
    let average_score = store.average_score();

    DashboardSummary {
        active_jobs: store.jobs().len(),
        total_candidates: store.candidates().len(),
        shortlisted: store.shortlisted_count(),
        average_score,
        average_score_display: average_score.round().clamp(0.0, 100.0) as u8,
        top_candidates: store
            .top_candidates(TOP_CANDIDATES)
            .into_iter()
            .map(|c| RankedCandidate {
                id: c.id.clone(),
                name: c.name.clone(),
                email: c.email.clone(),
                score: c.score,
                status: c.status,
                band: c.score_band(),
            })
            .collect(),
        processing,
    }
}
