//! Resume intake: turning an uploaded file into text and a display name.

use std::path::Path;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";
const UNNAMED_CANDIDATE: &str = "Unnamed Candidate";

/// A resume file as received from the client.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    /// Reads the whole file as text. Binary formats are rejected; anything else is
    /// decoded as UTF-8, replacing invalid sequences.
    pub fn decode_text(&self) -> Result<String, AppError> {
        if self.is_pdf() {
            return Err(AppError::UnprocessableEntity(format!(
                "'{}' looks like a PDF; only plain-text resumes can be screened",
                self.filename
            )));
        }

        let text = String::from_utf8_lossy(&self.bytes).into_owned();
        if text.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "'{}' contains no resume text",
                self.filename
            )));
        }
        Ok(text)
    }

    fn is_pdf(&self) -> bool {
        let by_extension = Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        by_extension || self.bytes.starts_with(PDF_MAGIC)
    }
}

/// Placeholder name heuristic: the filename up to its first dot, with `-` and `_`
/// turned into spaces. Not a real name parser; swap this out when one exists.
pub fn derive_display_name(filename: &str) -> String {
    let stem = filename.split('.').next().unwrap_or_default();
    let name = stem.replace(['-', '_'], " ");
    let name = name.trim();
    if name.is_empty() {
        UNNAMED_CANDIDATE.to_string()
    } else {
        name.to_string()
    }
}
