use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::name::extract_name;
use super::skills::extract_resume_skills;
use crate::capabilities::Capabilities;
use crate::embedding::embed_bounded;
use crate::models::CandidateProfile;
use crate::text::{normalize, truncate_chars, word_count, TextExtractor};

/// Resumes yielding fewer words than this are excluded from a batch.
pub const MIN_PARSED_WORDS: usize = 25;

/// Parses one resume. Returns `None` when the document yields too little text to score.
pub async fn parse_resume(
    data: &[u8],
    filename: &str,
    extractor: &dyn TextExtractor,
    caps: &Capabilities,
) -> Option<CandidateProfile> {
    let raw_text = extractor.extract_bytes(data, filename).await;
    let parsed_text = normalize(&raw_text);
    let words = word_count(&parsed_text);
    if words < MIN_PARSED_WORDS {
        warn!("Excluding resume {filename}: only {words} words of text could be extracted");
        return None;
    }
    debug!(
        "Resume '{filename}' cleaned text (first 300 chars): {}",
        truncate_chars(&parsed_text, 300)
    );

    let analyzer = caps.analyzer.get();
    // Contact lines (email) are stripped by normalization, so names come from the raw text.
    let name = extract_name(&raw_text, filename, analyzer);
    let skills = extract_resume_skills(&parsed_text, analyzer);

    let embedding = match caps.embedder.get() {
        Some(embedder) => embed_bounded(embedder, &parsed_text, &format!("resume {filename}")).await,
        None => None,
    };

    info!(
        "Parsed resume: {filename}, text length: {}, skills extracted: {}, embedded: {}",
        parsed_text.len(),
        skills.len(),
        embedding.is_some()
    );
    Some(CandidateProfile {
        name,
        filename: filename.to_string(),
        parsed_text,
        skills,
        embedding,
    })
}

/// Parses a batch of `(bytes, filename)` uploads, at most `max_parallel` at a time.
///
/// Output order follows input order. Documents that fail to yield enough text are left out;
/// one bad document never affects the others.
pub async fn parse_resume_batch(
    items: &[(Vec<u8>, String)],
    extractor: &dyn TextExtractor,
    caps: &Capabilities,
    max_parallel: usize,
) -> Vec<CandidateProfile> {
    if caps.embedder.get().is_none() {
        warn!("Embedding capability unavailable; resumes will be scored on keywords only");
    }

    let parsed: Vec<Option<CandidateProfile>> = stream::iter(
        items
            .iter()
            .map(|(data, filename)| parse_resume(data, filename, extractor, caps)),
    )
    .buffered(max_parallel.max(1))
    .collect()
    .await;

    let profiles: Vec<CandidateProfile> = parsed.into_iter().flatten().collect();
    info!(
        "Parsed {} of {} resumes ({} excluded)",
        profiles.len(),
        items.len(),
        items.len() - profiles.len()
    );
    profiles
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::text::{run_extraction, FileTextExtractor};

    /// Decodes bytes on the blocking pool after a pause, recording how many run at once.
    #[derive(Default)]
    struct SlowExtractor {
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextExtractor for SlowExtractor {
        async fn extract(&self, _path: &Path, _original_filename: &str) -> String {
            String::new()
        }

        async fn extract_bytes(&self, data: &[u8], original_filename: &str) -> String {
            let data = data.to_vec();
            let in_flight = Arc::clone(&self.in_flight);
            let peak = Arc::clone(&self.peak);
            run_extraction(original_filename, move || {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(150));
                in_flight.fetch_sub(1, Ordering::SeqCst);
                String::from_utf8_lossy(&data).into_owned()
            })
            .await
        }
    }

    const RESUME: &str = "Jane A. Doe\n\
        jane.doe@example.com\n\
        Backend engineer with 6 years of professional experience building Python and Go \
        services on AWS. Led the migration of a payments platform to Kubernetes and \
        Terraform, and mentored four engineers on testing and observability practices.";

    #[tokio::test]
    async fn test_parse_resume_builds_profile() {
        let profile = parse_resume(
            RESUME.as_bytes(),
            "jane_doe.txt",
            &FileTextExtractor,
            &Capabilities::offline(),
        )
        .await
        .expect("long enough to parse");
        assert_eq!(profile.name, "Jane A. Doe");
        assert!(profile.skills.contains(&"python".to_string()));
        assert!(profile.skills.contains(&"kubernetes".to_string()));
        assert!(profile.embedding.is_some());
        assert!(!profile.parsed_text.contains('@'), "emails are stripped from parsed text");
    }

    #[tokio::test]
    async fn test_batch_excludes_short_documents_and_keeps_order() {
        let items = vec![
            (b"Hi I am a cook".to_vec(), "short.txt".to_string()),
            (RESUME.as_bytes().to_vec(), "first.txt".to_string()),
            (Vec::new(), "empty.pdf".to_string()),
            (RESUME.replace("Jane A. Doe", "John Smith").into_bytes(), "second.txt".to_string()),
        ];
        let profiles =
            parse_resume_batch(&items, &FileTextExtractor, &Capabilities::offline(), 2).await;
        let files: Vec<&str> = profiles.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(files, vec!["first.txt", "second.txt"]);
    }

    #[tokio::test]
    async fn test_batch_without_capabilities_uses_gazetteer_skills() {
        let items = vec![(RESUME.as_bytes().to_vec(), "jane.txt".to_string())];
        let profiles =
            parse_resume_batch(&items, &FileTextExtractor, &Capabilities::unavailable(), 4).await;
        assert_eq!(profiles.len(), 1);
        assert!(profiles[0].embedding.is_none());
        assert!(profiles[0].skills.contains(&"terraform".to_string()));
    }

    #[tokio::test]
    async fn test_batch_extracts_documents_concurrently() {
        let items: Vec<(Vec<u8>, String)> = (0..4)
            .map(|i| (RESUME.as_bytes().to_vec(), format!("resume_{i}.txt")))
            .collect();
        let extractor = SlowExtractor::default();
        let profiles =
            parse_resume_batch(&items, &extractor, &Capabilities::unavailable(), 4).await;

        let files: Vec<&str> = profiles.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(files, vec!["resume_0.txt", "resume_1.txt", "resume_2.txt", "resume_3.txt"]);
        let peak = extractor.peak.load(Ordering::SeqCst);
        assert!(peak >= 2, "Expected overlapping extractions, got peak {peak}");
    }

    #[tokio::test]
    async fn test_batch_respects_parallelism_limit() {
        let items: Vec<(Vec<u8>, String)> = (0..3)
            .map(|i| (RESUME.as_bytes().to_vec(), format!("resume_{i}.txt")))
            .collect();
        let extractor = SlowExtractor::default();
        let profiles =
            parse_resume_batch(&items, &extractor, &Capabilities::unavailable(), 1).await;

        assert_eq!(profiles.len(), 3);
        assert_eq!(extractor.peak.load(Ordering::SeqCst), 1);
    }
}
