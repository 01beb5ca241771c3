pub mod candidate;
pub mod jd;
pub mod result;

pub use candidate::CandidateProfile;
pub use jd::{
    CategorizedKeywords, EmbeddingKey, EmbeddingSet, JdSections, JobDescription, KeywordCategory,
    SectionKind,
};
pub use result::{MatchResult, ScoreBundle};
