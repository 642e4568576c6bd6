//! Axum route handlers for jobs, candidates and navigation state.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::models::job::{JobPosting, NewJobPosting};
use crate::models::view::View;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewChange {
    pub view: View,
}

#[derive(Debug, Serialize)]
pub struct NavigationState {
    pub view: View,
    pub selected_job_id: Option<String>,
    pub processing: bool,
}

async fn navigation_state(state: &AppState) -> NavigationState {
    let store = state.store.read().await;
    NavigationState {
        view: store.view(),
        selected_job_id: store.selected_job_id().map(str::to_string),
        processing: state.in_flight.is_processing(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs?q=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchQuery>,
) -> Json<Vec<JobPosting>> {
    let store = state.store.read().await;
    Json(store.filter_jobs(&params.q).into_iter().cloned().collect())
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<NewJobPosting>,
) -> Result<(StatusCode, Json<JobPosting>), AppError> {
    for (field, value) in [
        ("title", &request.title),
        ("department", &request.department),
        ("content", &request.content),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }

    let job = JobPosting::create(request);
    state.store.write().await.add_job(job.clone());
    tracing::info!("Created job {} ({})", job.id, job.title);

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    let store = state.store.read().await;
    store
        .find_job(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// POST /api/v1/jobs/:id/select
///
/// Makes the job active and switches to the screening view.
pub async fn handle_select_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NavigationState>, AppError> {
    {
        let mut store = state.store.write().await;
        if store.find_job(&id).is_none() {
            return Err(AppError::NotFound(format!("Job {id} not found")));
        }
        store.select_job(id);
        store.set_view(View::Screening);
    }
    Ok(Json(navigation_state(&state).await))
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/candidates
pub async fn handle_list_candidates(State(state): State<AppState>) -> Json<Vec<Candidate>> {
    Json(state.store.read().await.candidates().to_vec())
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    let store = state.store.read().await;
    store
        .find_candidate(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

/// PUT /api/v1/candidates/:id
///
/// Generic replace. Unknown ids leave the store untouched.
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(candidate): Json<Candidate>,
) -> Result<Json<Candidate>, AppError> {
    if candidate.id != id {
        return Err(AppError::Validation(format!(
            "Body id {} does not match path id {id}",
            candidate.id
        )));
    }
    if candidate.score > 100 {
        return Err(AppError::Validation("score must be within 0-100".to_string()));
    }
    if let Some(evaluation) = &candidate.evaluation {
        if evaluation.match_percentage != candidate.score {
            return Err(AppError::Validation(
                "evaluation.match_percentage must equal score".to_string(),
            ));
        }
    }

    if !state.store.write().await.update_candidate(candidate.clone()) {
        return Err(AppError::NotFound(format!("Candidate {id} not found")));
    }
    Ok(Json(candidate))
}

// ────────────────────────────────────────────────────────────────────────────
// Navigation
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/view
pub async fn handle_get_view(State(state): State<AppState>) -> Json<NavigationState> {
    Json(navigation_state(&state).await)
}

/// PUT /api/v1/view
pub async fn handle_set_view(
    State(state): State<AppState>,
    Json(change): Json<ViewChange>,
) -> Json<NavigationState> {
    state.store.write().await.set_view(change.view);
    Json(navigation_state(&state).await)
}
