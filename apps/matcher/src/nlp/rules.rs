//! Rule-based English analyzer.
//!
//! A deterministic stand-in for a pretrained pipeline: regex tokenization, word-list and
//! suffix driven part-of-speech guesses, determiner/adjective/noun chunking, and entity
//! recognition over runs of capitalised tokens.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{is_domain_stopword, is_tech_term, ENGLISH_STOPWORDS};
use super::{AnalyzedText, Entity, EntityLabel, LinguisticAnalyzer, NounChunk, PartOfSpeech, Token};

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.[A-Za-z][\w.]*\w|\w[\w+#]*(?:[.\-/'’][\w+#]+)*[+#]*|\S").unwrap()
});

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "all",
        "no", "our", "your", "their", "its", "my", "his", "another", "both", "either", "neither",
        "such",
    ])
});

static PRONOUNS: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "i", "we", "you", "he", "she", "it", "they", "me", "us", "him", "her", "them", "who",
        "whom", "which", "what", "whose", "yourself", "ourselves", "themselves",
    ])
});

static PREPOSITIONS: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "in", "of", "with", "on", "at", "by", "for", "from", "to", "into", "onto", "over", "under",
        "about", "through", "across", "within", "without", "using", "via", "as", "per",
        "including", "among", "between", "during", "after", "before", "upon", "towards", "toward",
        "like", "than", "around",
    ])
});

static CONJUNCTIONS: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "and", "or", "but", "nor", "&", "yet", "so", "while", "whereas", "if", "because",
        "although", "whether",
    ])
});

static AUXILIARIES: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do",
        "does", "did", "will", "would", "should", "can", "could", "may", "might", "must", "shall",
        "not",
    ])
});

/// Base forms of verbs common in job descriptions and resumes.
static VERBS: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "work", "build", "develop", "lead", "manage", "create", "maintain", "ensure", "provide",
        "deliver", "collaborate", "drive", "write", "implement", "deploy", "own", "join", "help",
        "apply", "improve", "optimize", "mentor", "communicate", "participate", "contribute",
        "analyze", "analyse", "define", "establish", "identify", "monitor", "review",
        "troubleshoot", "translate", "understand", "use", "utilize", "leverage", "grow", "scale",
        "ship", "seek", "look", "bring", "thrive", "require", "prefer", "need", "want", "report",
        "achieve", "coordinate", "execute", "partner", "automate", "integrate", "migrate",
        "architect", "assist", "oversee", "handle", "increase", "reduce", "launch", "led", "built",
        "wrote", "made", "get", "got", "make", "take", "took", "love", "enjoy", "include",
        "involve", "offer", "expect", "enable", "solve", "hire", "gain", "learn", "become",
        "keep", "stay", "think", "know", "see", "feel", "perform", "conduct", "prepare",
        "serve", "follow", "meet",
    ])
});

static ADJECTIVES: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "strong", "good", "excellent", "proven", "solid", "deep", "hands-on", "senior", "junior",
        "new", "large", "small", "key", "core", "basic", "advanced", "expert", "relevant",
        "related", "technical", "preferred", "required", "desired", "essential", "minimum",
        "great", "high", "low", "fast", "scalable", "robust", "reliable", "modern", "effective",
        "efficient", "successful", "various", "multiple", "several", "other", "similar",
        "previous", "current", "familiar", "able", "responsible", "professional", "nice",
        "plus", "bonus", "mandatory", "ideal", "best", "better", "big", "real-time", "full",
        "remote", "hybrid", "agile", "additional", "primary", "overall", "total", "native",
    ])
});

/// `-ing` words that are nouns in skill phrases ("machine learning", "data engineering").
static ING_NOUNS: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "engineering", "learning", "programming", "testing", "computing", "marketing",
        "accounting", "networking", "processing", "modeling", "modelling", "training",
        "scheduling", "banking", "hosting", "logging", "monitoring", "caching", "debugging",
        "planning", "budgeting", "recruiting", "writing", "reporting", "warehousing", "mining",
        "wireframing", "prototyping", "consulting", "manufacturing", "auditing", "branding",
        "scripting", "profiling", "tuning", "messaging", "streaming",
    ])
});

/// Plural-looking words whose lemma is the word itself.
static INVARIANT_PLURALS: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "postgres", "jenkins", "kubernetes", "pandas", "series", "analytics", "statistics",
        "physics", "mathematics", "economics", "logistics", "sales", "news", "ops", "devops",
        "windows", "graphics", "robotics", "electronics", "aws", "apis", "ethics", "mlops",
        "gitops", "finops", "redux", "kudos", "express",
    ])
});

static ORG_SUFFIXES: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "inc", "llc", "ltd", "corp", "corporation", "company", "co", "university", "institute",
        "college", "technologies", "solutions", "systems", "services", "group", "labs", "bank",
        "limited", "pvt", "gmbh", "school", "academy", "foundation", "partners", "consulting",
    ])
});

static LANGUAGES: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "english", "spanish", "french", "german", "hindi", "mandarin", "chinese", "japanese",
        "korean", "arabic", "portuguese", "italian", "russian", "dutch", "tamil", "telugu",
        "bengali", "urdu", "marathi", "kannada", "malayalam", "gujarati", "punjabi",
    ])
});

static NATIONALITIES: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "american", "indian", "british", "european", "asian", "african", "canadian",
        "australian", "latin", "hispanic",
    ])
});

static CALENDAR: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
        "sep", "sept", "oct", "nov", "dec", "monday", "tuesday", "wednesday", "thursday",
        "friday", "saturday", "sunday", "present",
    ])
});

static PLACES: Lazy<HashSet<&str>> = Lazy::new(|| {
    set(&[
        "delhi", "new delhi", "mumbai", "bangalore", "bengaluru", "hyderabad", "chennai", "pune",
        "kolkata", "ahmedabad", "gurgaon", "noida", "london", "new york", "san francisco",
        "paris", "berlin", "singapore", "toronto", "dubai", "sydney", "melbourne", "india", "usa",
        "uk", "united states", "united kingdom", "germany", "canada", "remote", "seattle",
        "boston", "austin", "chicago",
    ])
});

const SENTENCE_BREAKS: &[&str] = &[".", ":", ";", "!", "?", "•", "-", "*", "|"];

/// Deterministic heuristic analyzer; the default `LinguisticAnalyzer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl LinguisticAnalyzer for RuleBasedAnalyzer {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn analyze(&self, text: &str) -> AnalyzedText {
        let tokens = tokenize(text);
        let noun_chunks = chunk_noun_phrases(text, &tokens);
        let entities = recognize_entities(text, &tokens);
        AnalyzedText {
            tokens,
            noun_chunks,
            entities,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tokens
// ────────────────────────────────────────────────────────────────────────────

fn tokenize(text: &str) -> Vec<Token> {
    let spans: Vec<(usize, usize)> = TOKEN
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut tokens: Vec<Token> = Vec::with_capacity(spans.len());
    for (i, &(start, end)) in spans.iter().enumerate() {
        let word = &text[start..end];
        let sentence_start = i == 0
            || gap_has_newline(text, spans[i - 1].1, start)
            || SENTENCE_BREAKS.contains(&&text[spans[i - 1].0..spans[i - 1].1]);
        let prev_pos = tokens
            .last()
            .filter(|_| !sentence_start)
            .map(|t: &Token| t.pos);
        let pos = guess_pos(word, sentence_start, prev_pos);
        let lower = word.to_lowercase();
        tokens.push(Token {
            lemma: lemmatize(&lower, pos, word),
            is_stop: ENGLISH_STOPWORDS.contains(lower.as_str()),
            is_punct: !word.chars().any(char::is_alphanumeric),
            is_upper: is_all_caps(word),
            text: word.to_string(),
            pos,
            start,
            end,
        });
    }
    tokens
}

fn gap_has_newline(text: &str, from: usize, to: usize) -> bool {
    text[from..to].contains('\n')
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn has_inner_capital(word: &str) -> bool {
    word.chars().skip(1).any(char::is_uppercase)
}

fn has_symbol_or_digit(word: &str) -> bool {
    let has_alpha = word.chars().any(char::is_alphabetic);
    has_alpha
        && word
            .chars()
            .any(|c| c.is_ascii_digit() || matches!(c, '+' | '#' | '.' | '/'))
}

fn stem_candidates(lower: &str) -> Vec<String> {
    let mut out = vec![lower.to_string()];
    for suffix in ["s", "es", "ed", "d", "ing"] {
        if let Some(stem) = lower.strip_suffix(suffix) {
            if stem.len() >= 2 {
                out.push(stem.to_string());
                if suffix == "ing" || suffix == "ed" {
                    out.push(format!("{stem}e"));
                }
            }
        }
    }
    out
}

fn guess_pos(word: &str, sentence_start: bool, prev: Option<PartOfSpeech>) -> PartOfSpeech {
    if !word.chars().any(char::is_alphanumeric) {
        return PartOfSpeech::Punctuation;
    }
    if word.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '+' | '%')) {
        return PartOfSpeech::Number;
    }

    let lower = word.to_lowercase();
    let first_upper = word.chars().next().map_or(false, char::is_uppercase);

    // Mid-sentence capitals, acronyms and symbol-bearing tokens are names of things.
    if is_tech_term(&lower) || has_symbol_or_digit(word) || has_inner_capital(word) {
        return PartOfSpeech::ProperNoun;
    }
    if first_upper && !sentence_start && !ENGLISH_STOPWORDS.contains(lower.as_str()) {
        return PartOfSpeech::ProperNoun;
    }

    let l = lower.as_str();
    if DETERMINERS.contains(l) {
        return PartOfSpeech::Determiner;
    }
    if PRONOUNS.contains(l) {
        return PartOfSpeech::Pronoun;
    }
    if PREPOSITIONS.contains(l) {
        return PartOfSpeech::Preposition;
    }
    if CONJUNCTIONS.contains(l) {
        return PartOfSpeech::Conjunction;
    }
    if AUXILIARIES.contains(l) {
        return PartOfSpeech::Verb;
    }
    if ADJECTIVES.contains(l) {
        return PartOfSpeech::Adjective;
    }
    if ING_NOUNS.contains(l) {
        return PartOfSpeech::Noun;
    }
    if stem_candidates(l).iter().any(|s| VERBS.contains(s.as_str())) {
        return PartOfSpeech::Verb;
    }
    if l.len() > 5 && l.ends_with("ing") {
        return match prev {
            Some(PartOfSpeech::Determiner | PartOfSpeech::Adjective) => PartOfSpeech::Noun,
            _ => PartOfSpeech::Verb,
        };
    }
    if l.len() > 4 && l.ends_with("ly") && !matches!(l, "apply" | "supply" | "reply" | "assembly" | "family") {
        return PartOfSpeech::Adverb;
    }
    if l.len() > 4 && l.ends_with("ed") {
        return PartOfSpeech::Adjective;
    }
    let adjective_suffix = ["ical", "ional", "ive", "ous", "ful", "able", "ible"]
        .iter()
        .any(|s| l.len() > s.len() + 2 && l.ends_with(s))
        || (l.len() > 5 && (l.ends_with("ic") || l.ends_with("less")));
    if adjective_suffix {
        return PartOfSpeech::Adjective;
    }
    if is_all_caps(word) && word.chars().count() >= 2 {
        return PartOfSpeech::ProperNoun;
    }
    PartOfSpeech::Noun
}

fn lemmatize(lower: &str, pos: PartOfSpeech, original: &str) -> String {
    if pos != PartOfSpeech::Noun
        || is_tech_term(lower)
        || INVARIANT_PLURALS.contains(lower)
        || is_all_caps(original)
    {
        return lower.to_string();
    }
    if lower.len() > 4 {
        if let Some(stem) = lower.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    let keeps_s = ["ss", "us", "is", "os", "as"].iter().any(|s| lower.ends_with(s));
    if lower.len() > 3 && lower.ends_with('s') && !keeps_s {
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Noun chunks
// ────────────────────────────────────────────────────────────────────────────

fn chunk_noun_phrases(text: &str, tokens: &[Token]) -> Vec<NounChunk> {
    let mut chunks = Vec::new();
    let mut open: Option<usize> = None;
    let mut last_nominal: Option<usize> = None;

    let mut close = |open: &mut Option<usize>, last_nominal: &mut Option<usize>| {
        if let (Some(first), Some(last)) = (*open, *last_nominal) {
            chunks.push(NounChunk {
                text: text[tokens[first].start..tokens[last].end].to_string(),
                first_token: first,
                last_token: last,
            });
        }
        *open = None;
        *last_nominal = None;
    };

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && gap_has_newline(text, tokens[i - 1].end, token.start) {
            close(&mut open, &mut last_nominal);
        }
        match token.pos {
            PartOfSpeech::Determiner => {
                close(&mut open, &mut last_nominal);
                open = Some(i);
            }
            PartOfSpeech::Adjective | PartOfSpeech::Number => {
                // A modifier after the head noun starts a new phrase.
                if last_nominal.is_some() {
                    close(&mut open, &mut last_nominal);
                }
                open.get_or_insert(i);
            }
            PartOfSpeech::Noun | PartOfSpeech::ProperNoun => {
                open.get_or_insert(i);
                last_nominal = Some(i);
            }
            _ => close(&mut open, &mut last_nominal),
        }
    }
    close(&mut open, &mut last_nominal);
    chunks
}

// ────────────────────────────────────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────────────────────────────────────

fn is_capitalized(word: &str) -> bool {
    word.chars().next().map_or(false, char::is_uppercase)
}

fn is_titlecase_name_part(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && chars.all(|c| c.is_lowercase() || matches!(c, '\'' | '’' | '-'))
        && word.chars().all(|c| c.is_alphabetic() || matches!(c, '\'' | '’' | '-'))
}

fn recognize_entities(text: &str, tokens: &[Token]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        if !is_capitalized(&tokens[i].text) {
            i += 1;
            continue;
        }
        let sentence_start = i == 0
            || gap_has_newline(text, tokens[i - 1].end, tokens[i].start)
            || SENTENCE_BREAKS.contains(&tokens[i - 1].text.as_str());

        // Extend the run over capitalised tokens on the same line, keeping "A." initials.
        let mut end = i;
        let mut j = i + 1;
        while j < tokens.len() {
            let gap = &text[tokens[j - 1].end..tokens[j].start];
            let prev = &tokens[j - 1].text;
            let is_initial_dot = tokens[j].text == "."
                && gap.is_empty()
                && prev.chars().count() == 1
                && is_capitalized(prev);
            if is_initial_dot {
                end = j;
                j += 1;
                continue;
            }
            if gap != " " || !is_capitalized(&tokens[j].text) {
                break;
            }
            end = j;
            j += 1;
        }

        let run: Vec<&Token> = tokens[i..=end].iter().filter(|t| t.text != ".").collect();
        if let Some(label) = label_run(&run, sentence_start) {
            let (start, stop) = (tokens[i].start, tokens[end].end);
            entities.push(Entity {
                text: text[start..stop].to_string(),
                label,
                start,
                end: stop,
            });
        }
        i = end + 1;
    }
    entities
}

fn label_run(run: &[&Token], sentence_start: bool) -> Option<EntityLabel> {
    let lower = run
        .iter()
        .map(|t| t.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if run.len() == 1 {
        let token = run[0];
        let l = lower.as_str();
        return if is_tech_term(l) {
            Some(EntityLabel::Tech)
        } else if CALENDAR.contains(l) {
            Some(EntityLabel::Date)
        } else if LANGUAGES.contains(l) {
            Some(EntityLabel::Language)
        } else if NATIONALITIES.contains(l) {
            Some(EntityLabel::Norp)
        } else if PLACES.contains(l) {
            Some(EntityLabel::Gpe)
        } else if has_symbol_or_digit(&token.text) {
            Some(EntityLabel::Product)
        } else if token.is_upper && (2..=5).contains(&token.text.chars().count()) {
            Some(EntityLabel::Org)
        } else if sentence_start || token.is_stop || is_domain_stopword(l) {
            None
        } else if token.pos == PartOfSpeech::ProperNoun {
            Some(EntityLabel::Org)
        } else {
            None
        };
    }

    let words: Vec<String> = run.iter().map(|t| t.text.to_lowercase()).collect();
    let looks_like_person = (2..=4).contains(&run.len())
        && run.iter().all(|t| is_titlecase_name_part(&t.text))
        && !words.iter().filter(|w| w.chars().count() > 1).any(|w| {
            is_tech_term(w)
                || is_domain_stopword(w)
                || ENGLISH_STOPWORDS.contains(w.as_str())
                || CALENDAR.contains(w.as_str())
                || ORG_SUFFIXES.contains(w.as_str())
        })
        && !PLACES.contains(lower.as_str());

    if looks_like_person {
        Some(EntityLabel::Person)
    } else if PLACES.contains(lower.as_str()) {
        Some(EntityLabel::Gpe)
    } else if words.last().map_or(false, |w| ORG_SUFFIXES.contains(w.as_str())) {
        Some(EntityLabel::Org)
    } else if is_tech_term(&lower)
        || words.iter().any(|w| is_tech_term(w))
        || run.iter().any(|t| has_symbol_or_digit(&t.text))
    {
        Some(EntityLabel::Product)
    } else {
        Some(EntityLabel::Other)
    }
}
