//! Linguistic analysis capability: tokens, noun-phrase chunks and named entities.
//!
//! Consumed through `Arc<dyn LinguisticAnalyzer>` so a model-backed analyzer can replace the
//! default rule-based one without touching the extractors.

pub mod lexicon;
pub mod rules;

use serde::{Deserialize, Serialize};

pub use rules::RuleBasedAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Number,
    Punctuation,
}

impl PartOfSpeech {
    pub fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::ProperNoun)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Lowercased base form.
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub is_punct: bool,
    /// Every cased character is uppercase (acronym-like).
    pub is_upper: bool,
    /// Byte offsets into the analysed text.
    pub start: usize,
    pub end: usize,
}

/// A noun-phrase chunk: a contiguous token range ending in a noun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NounChunk {
    pub text: String,
    /// Index range into `AnalyzedText::tokens`.
    pub first_token: usize,
    pub last_token: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Org,
    Product,
    Tech,
    Language,
    Norp,
    Gpe,
    Date,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    /// Byte offsets into the analysed text.
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedText {
    pub tokens: Vec<Token>,
    pub noun_chunks: Vec<NounChunk>,
    pub entities: Vec<Entity>,
}

impl AnalyzedText {
    pub fn chunk_tokens(&self, chunk: &NounChunk) -> &[Token] {
        &self.tokens[chunk.first_token..=chunk.last_token]
    }
}

/// The analyzer trait. Implementations must be deterministic for a fixed input.
pub trait LinguisticAnalyzer: Send + Sync {
    fn name(&self) -> &'static str;

    fn analyze(&self, text: &str) -> AnalyzedText;
}
