//! Resume parsing: text, display name, skills, years of experience and embedding.

pub mod experience;
pub mod name;
pub mod parser;
pub mod skills;

pub use experience::{extract_experience, ExperienceProfile};
pub use name::{extract_name, is_plausible_name};
pub use parser::{parse_resume, parse_resume_batch};
pub use skills::extract_resume_skills;
