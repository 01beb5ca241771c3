use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher::text::FileTextExtractor;
use matcher::{
    match_candidates, parse_job_description, parse_resume_batch, Capabilities, Config,
    ScoringPolicy,
};

/// Usage: `matcher <job-description> <resume>...`
///
/// Prints the ranked match results as JSON on stdout.
#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let Some(jd_path) = args.next() else {
        bail!("usage: matcher <job-description> <resume>...");
    };
    let resume_paths: Vec<String> = args.collect();
    if resume_paths.is_empty() {
        bail!("no resumes given; usage: matcher <job-description> <resume>...");
    }

    // Load models once; missing ones degrade scoring instead of failing
    let caps = Capabilities::load(&config);
    let extractor = FileTextExtractor;

    let jd_bytes = tokio::fs::read(&jd_path)
        .await
        .with_context(|| format!("Failed to read job description '{jd_path}'"))?;
    let jd = parse_job_description(&jd_bytes, &file_name(&jd_path), &extractor, &caps).await;
    if jd.is_empty() {
        bail!("No text could be extracted from job description '{jd_path}'");
    }
    info!(
        "JD keywords: {} essential, {} desirable, {} general",
        jd.keywords.essential.len(),
        jd.keywords.desirable.len(),
        jd.keywords.general.len()
    );

    let mut uploads = Vec::with_capacity(resume_paths.len());
    for path in &resume_paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read resume '{path}'"))?;
        uploads.push((bytes, file_name(path)));
    }

    let profiles = parse_resume_batch(&uploads, &extractor, &caps, config.max_parallel).await;
    let results = match_candidates(&jd, &profiles, &ScoringPolicy::default());

    println!(
        "{}",
        serde_json::to_string_pretty(&results).context("Failed to serialize match results")?
    );
    Ok(())
}

fn file_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
