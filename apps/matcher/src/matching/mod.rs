//! Scoring a parsed resume against a parsed JD, and ranking the batch.
//!
//! keyword_score + semantic_score → calibration → narrative, orchestrated by `engine`.
//! Every tunable constant lives in `policy::ScoringPolicy`.

pub mod calibration;
pub mod engine;
pub mod keyword_score;
pub mod narrative;
pub mod policy;
pub mod semantic_score;

pub use engine::match_candidates;
pub use keyword_score::{is_meaningful_keyword, score_keywords, KeywordMatch, ResumeEvidence};
pub use policy::ScoringPolicy;
pub use semantic_score::semantic_score;
