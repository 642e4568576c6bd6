//! Application State Store: the single in-memory owner of jobs, candidates and
//! navigation state for the lifetime of the process.
//!
//! Mutations are synchronous. Callers share the store as [`SharedStore`] and never
//! hold the lock across a gateway call.

pub mod handlers;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::job::{JobPosting, NewJobPosting};
use crate::models::view::View;

pub type SharedStore = Arc<RwLock<AppStore>>;

/// Identifies a dispatched operation by the navigation generation it started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationToken {
    generation: u64,
}

/// Invitation text shown to the user for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailDraft {
    pub candidate_id: String,
    pub job_id: String,
    pub content: String,
    pub failed: bool,
}

#[derive(Debug, Default)]
pub struct AppStore {
    jobs: Vec<JobPosting>,
    candidates: Vec<Candidate>,
    selected_job_id: Option<String>,
    view: View,
    generation: u64,
    email_draft: Option<EmailDraft>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    /// Newest first. Id uniqueness is the caller's job.
    pub fn add_job(&mut self, job: JobPosting) {
        self.jobs.insert(0, job);
    }

    /// Newest first. Id uniqueness is the caller's job.
    pub fn add_candidate(&mut self, candidate: Candidate) {
        self.candidates.insert(0, candidate);
    }

    /// Replaces the candidate with the same id. Returns false, changing nothing,
    /// when no candidate matches.
    pub fn update_candidate(&mut self, candidate: Candidate) -> bool {
        match self.candidates.iter_mut().find(|c| c.id == candidate.id) {
            Some(slot) => {
                *slot = candidate;
                true
            }
            None => false,
        }
    }

    pub fn select_job(&mut self, id: impl Into<String>) {
        self.selected_job_id = Some(id.into());
        self.generation += 1;
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        self.generation += 1;
    }

    /// Inserts the two postings the dashboard starts with.
    pub fn seed_demo_jobs(&mut self) {
        let demo = [
            (
                "Product Designer",
                "Design",
                "Join our creative team to build the next generation of fintech tools...",
                ["Figma", "UI/UX", "Prototyping"],
            ),
            (
                "Senior Frontend Engineer",
                "Engineering",
                "We are looking for a React expert with 5+ years experience...",
                ["React", "TypeScript", "Tailwind CSS"],
            ),
        ];
        for (title, department, content, skills) in demo {
            self.add_job(JobPosting::create(NewJobPosting {
                title: title.to_string(),
                department: department.to_string(),
                content: content.to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
            }));
        }
    }

    // ── Operation tokens ─────────────────────────────────────────────────────

    pub fn begin_operation(&self) -> OperationToken {
        OperationToken {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: OperationToken) -> bool {
        token.generation == self.generation
    }

    /// Stores the draft unless the user navigated since `token` was issued.
    pub fn apply_email_draft(&mut self, token: OperationToken, draft: EmailDraft) -> bool {
        if !self.is_current(token) {
            debug!(
                "Discarding stale email draft for candidate {}",
                draft.candidate_id
            );
            return false;
        }
        self.email_draft = Some(draft);
        true
    }

    pub fn clear_email_draft(&mut self) {
        self.email_draft = None;
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn find_job(&self, id: &str) -> Option<&JobPosting> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn find_candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn selected_job_id(&self) -> Option<&str> {
        self.selected_job_id.as_deref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn email_draft(&self) -> Option<&EmailDraft> {
        self.email_draft.as_ref()
    }

    // ── Derived ──────────────────────────────────────────────────────────────

    /// Mean candidate score; 0 with no candidates.
    pub fn average_score(&self) -> f64 {
        if self.candidates.is_empty() {
            return 0.0;
        }
        let total: u64 = self.candidates.iter().map(|c| u64::from(c.score)).sum();
        total as f64 / self.candidates.len() as f64
    }

    pub fn shortlisted_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.status == CandidateStatus::Shortlisted)
            .count()
    }

    /// Highest scores first. Equal scores keep collection order.
    pub fn top_candidates(&self, n: usize) -> Vec<&Candidate> {
        let mut ranked: Vec<&Candidate> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(n);
        ranked
    }

    pub fn filter_jobs(&self, query: &str) -> Vec<&JobPosting> {
        self.jobs.iter().filter(|j| j.matches_query(query)).collect()
    }
}
