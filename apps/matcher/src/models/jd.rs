use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Labels of the JD sections produced by the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    FullText,
    EssentialRequirements,
    DesirableRequirements,
    Responsibilities,
    GeneralSkills,
    Education,
}

/// Cleaned JD text split into labeled sections. `full_text` is always populated;
/// other sections are empty strings when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JdSections {
    pub full_text: String,
    pub essential_requirements: String,
    pub desirable_requirements: String,
    pub responsibilities: String,
    pub general_skills: String,
    pub education: String,
}

impl JdSections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::FullText => &self.full_text,
            SectionKind::EssentialRequirements => &self.essential_requirements,
            SectionKind::DesirableRequirements => &self.desirable_requirements,
            SectionKind::Responsibilities => &self.responsibilities,
            SectionKind::GeneralSkills => &self.general_skills,
            SectionKind::Education => &self.education,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::FullText => &mut self.full_text,
            SectionKind::EssentialRequirements => &mut self.essential_requirements,
            SectionKind::DesirableRequirements => &mut self.desirable_requirements,
            SectionKind::Responsibilities => &mut self.responsibilities,
            SectionKind::GeneralSkills => &mut self.general_skills,
            SectionKind::Education => &mut self.education,
        }
    }
}

/// Priority tier of a JD keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    Essential,
    Desirable,
    General,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 3] = [
        KeywordCategory::Essential,
        KeywordCategory::Desirable,
        KeywordCategory::General,
    ];
}

/// Lowercase keyword phrases per tier. Each list is ordered by word count desc,
/// length desc, then lexically; a keyword appears in at most one tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedKeywords {
    pub essential: Vec<String>,
    pub desirable: Vec<String>,
    pub general: Vec<String>,
}

impl CategorizedKeywords {
    pub fn get(&self, category: KeywordCategory) -> &[String] {
        match category {
            KeywordCategory::Essential => &self.essential,
            KeywordCategory::Desirable => &self.desirable,
            KeywordCategory::General => &self.general,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.essential.is_empty() && self.desirable.is_empty() && self.general.is_empty()
    }

    pub fn len(&self) -> usize {
        self.essential.len() + self.desirable.len() + self.general.len()
    }
}

/// Keys of the JD embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingKey {
    EssentialRequirements,
    SkillsSemanticDocument,
    Responsibilities,
    DesirableRequirements,
    FullText,
}

/// Only sections with non-empty text get an entry.
pub type EmbeddingSet = BTreeMap<EmbeddingKey, Vec<f32>>;

/// Everything `parse_job_description` produces for one JD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub filename: String,
    pub cleaned_text: String,
    pub keywords: CategorizedKeywords,
    pub sections: JdSections,
    pub embeddings: EmbeddingSet,
}

impl JobDescription {
    /// True for the all-empty result of an unrecoverable parse failure.
    pub fn is_empty(&self) -> bool {
        self.cleaned_text.is_empty() && self.keywords.is_empty() && self.embeddings.is_empty()
    }
}
