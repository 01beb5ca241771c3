//! Text Extraction Service: the one place documents become strings.
//!
//! Dispatches on the file extension (`pdf`, `docx`, `txt`, `doc`, anything else sniffed by
//! magic bytes). Never fails: every error path degrades to a lossy byte decode and finally
//! to an empty string, with a `warn!` so the degradation is visible in logs.

use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::errors::MatchError;

/// Capability interface consumed by both the JD and resume parsing paths.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Reads `path` and returns its text. `original_filename` drives format detection.
    async fn extract(&self, path: &Path, original_filename: &str) -> String;

    /// Same as `extract`, for documents already held in memory.
    async fn extract_bytes(&self, data: &[u8], original_filename: &str) -> String;
}

/// Default extractor backed by `pdf-extract` and `zip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextExtractor;

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract(&self, path: &Path, original_filename: &str) -> String {
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Could not read '{}' ({}): {e}", original_filename, path.display());
                return String::new();
            }
        };
        let filename = original_filename.to_string();
        run_extraction(original_filename, move || extract_document_text(&data, &filename)).await
    }

    async fn extract_bytes(&self, data: &[u8], original_filename: &str) -> String {
        let data = data.to_vec();
        let filename = original_filename.to_string();
        run_extraction(original_filename, move || extract_document_text(&data, &filename)).await
    }
}

/// Runs a CPU-bound extraction on the blocking pool so concurrent documents overlap
/// instead of stalling the task that polls them. A panicked or cancelled task yields "".
pub async fn run_extraction<F>(original_filename: &str, work: F) -> String
where
    F: FnOnce() -> String + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(text) => text,
        Err(e) => {
            let err = MatchError::Internal(anyhow::anyhow!(
                "extraction task for '{original_filename}' failed: {e}"
            ));
            warn!("{err}");
            String::new()
        }
    }
}

/// Extracts text by extension, falling back to a lossy decode on any backend error.
pub fn extract_document_text(data: &[u8], filename: &str) -> String {
    if data.is_empty() {
        warn!("Document '{filename}' is empty");
        return String::new();
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let result = match extension.as_deref() {
        Some("pdf") => extract_pdf_text(data),
        Some("docx") => extract_docx_text(data),
        Some("txt") => Ok(decode_text_bytes(data, filename)),
        Some("doc") => extract_doc_text(data, filename),
        other => {
            debug!("Unknown extension {:?} for '{filename}', sniffing content", other);
            detect_and_extract_unknown(data, filename)
        }
    };

    let text = match result {
        Ok(text) => text,
        Err(e) => {
            warn!("{e}; falling back to lossy decode for '{filename}'");
            decode_text_bytes(data, filename)
        }
    };

    let normalized = normalize_line_endings(&text);
    if normalized.is_empty() {
        warn!("No text could be extracted from '{filename}'");
    }
    normalized
}

fn detect_and_extract_unknown(data: &[u8], filename: &str) -> Result<String, MatchError> {
    if looks_like_pdf(data) {
        return extract_pdf_text(data);
    }
    if looks_like_docx(data) {
        return extract_docx_text(data);
    }
    Ok(decode_text_bytes(data, filename))
}

fn extract_doc_text(data: &[u8], filename: &str) -> Result<String, MatchError> {
    if looks_like_docx(data) {
        return extract_docx_text(data);
    }
    if looks_like_pdf(data) {
        return extract_pdf_text(data);
    }
    warn!("Legacy .doc '{filename}' treated as plain text; save as .docx for better results");
    Ok(decode_text_bytes(data, filename))
}

fn extract_pdf_text(data: &[u8]) -> Result<String, MatchError> {
    // pdf-extract panics on some malformed or encrypted inputs.
    let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data));
    match outcome {
        Ok(Ok(text)) => Ok(text.trim().to_string()),
        Ok(Err(e)) => Err(MatchError::Extraction(format!(
            "Unable to extract text from the PDF document: {e}"
        ))),
        Err(_) => Err(MatchError::Extraction(
            "PDF parser aborted on a malformed document".to_string(),
        )),
    }
}

static DOCX_RUN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|</w:p>|<w:tab/>|<w:br/>").unwrap());

fn extract_docx_text(data: &[u8]) -> Result<String, MatchError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data))
        .map_err(|e| MatchError::Extraction(format!("Unable to read the DOCX archive: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| MatchError::Extraction(format!("DOCX has no document body: {e}")))?
        .read_to_string(&mut xml)?;

    let mut out = String::with_capacity(xml.len() / 4);
    for caps in DOCX_RUN_TEXT.captures_iter(&xml) {
        match caps.get(1) {
            Some(run) => out.push_str(&decode_xml_entities(run.as_str())),
            None => match &caps[0] {
                "</w:p>" | "<w:br/>" => out.push('\n'),
                _ => out.push(' '),
            },
        }
    }
    Ok(out)
}

fn decode_xml_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn decode_text_bytes(data: &[u8], filename: &str) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!("'{filename}' contained invalid UTF-8; some characters were replaced");
            String::from_utf8_lossy(data).into_owned()
        }
    }
}

fn normalize_line_endings(text: &str) -> String {
    let mut normalized = text.replace('\u{0000}', "");
    normalized = normalized.trim_start_matches('\u{FEFF}').to_string();
    normalized = normalized.replace("\r\n", "\n").replace('\r', "\n");
    normalized.trim().to_string()
}

fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}

fn looks_like_docx(data: &[u8]) -> bool {
    data.len() > 4 && data.starts_with(b"PK")
}
