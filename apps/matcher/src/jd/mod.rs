//! Job description parsing: segmentation, keyword extraction and section embeddings.

pub mod keywords;
pub mod parser;
pub mod sections;

pub use keywords::{extract_keywords, keyword_order};
pub use parser::{parse_job_description, parse_job_text};
pub use sections::segment;
