use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A role description used as the comparison baseline for resume evaluation.
/// Never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub department: String,
    pub content: String,
    /// Order-preserving; duplicates are dropped on creation.
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when creating a posting.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJobPosting {
    pub title: String,
    pub department: String,
    pub content: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobPosting {
    pub fn create(new: NewJobPosting) -> Self {
        let mut skills: Vec<String> = Vec::with_capacity(new.skills.len());
        for skill in new.skills {
            let skill = skill.trim().to_string();
            if !skill.is_empty() && !skills.iter().any(|s| s.eq_ignore_ascii_case(&skill)) {
                skills.push(skill);
            }
        }

        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title.trim().to_string(),
            department: new.department.trim().to_string(),
            content: new.content,
            skills,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match on title or department.
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.department.to_lowercase().contains(&query)
    }
}
