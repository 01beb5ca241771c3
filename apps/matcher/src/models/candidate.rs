use serde::{Deserialize, Serialize};

/// One parsed resume. Created once per upload and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub filename: String,
    /// Normalized resume text.
    pub parsed_text: String,
    /// Distinct lowercase skill phrases, longest first.
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}
