//! Resume / job-description matching core.
//!
//! `parse_job_description` → `parse_resume_batch` → `match_candidates`, with the linguistic
//! and embedding models injected through `Capabilities`.

pub mod capabilities;
pub mod config;
pub mod embedding;
pub mod errors;
pub mod jd;
pub mod matching;
pub mod models;
pub mod nlp;
pub mod resume;
pub mod text;

pub use capabilities::{Capabilities, Capability};
pub use config::Config;
pub use errors::MatchError;
pub use jd::parse_job_description;
pub use matching::{match_candidates, ScoringPolicy};
pub use models::{CandidateProfile, JobDescription, MatchResult};
pub use resume::parse_resume_batch;
