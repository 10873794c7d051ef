mod bootstrap;
mod report;

use anyhow::{Context, Result};
use analyser_core::models::Scope;
use analyser_core::settings::Settings;
use analyser_data::analysis::analyze_transcript;
use analyser_data::reader::read_transcript;
use analyser_data::stopwords::load_stopwords;

fn main() -> Result<()> {
    let loaded = Settings::load_with_last_used();
    let settings_warning = loaded.warning().map(str::to_string);
    let settings = loaded.into_value();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    if let Some(warning) = settings_warning {
        tracing::warn!("{}", warning);
    }

    tracing::info!("Chat Analyser v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Transcript: {}, User: {}, Format: {}",
        settings.transcript.display(),
        settings.user,
        settings.format
    );

    let raw = read_transcript(&settings.transcript)?;
    let stopwords = load_stopwords(&settings.stopwords)?;
    let scope = Scope::from_selection(&settings.user);

    let analysis = analyze_transcript(&raw, scope, stopwords)
        .with_context(|| format!("analysing {}", settings.transcript.display()))?;

    tracing::info!(
        "Analysed {} messages in {:.3}s",
        analysis.metadata.records_parsed,
        analysis.metadata.parse_time_seconds + analysis.metadata.aggregate_time_seconds
    );

    if settings.wants_json() {
        println!("{}", analysis.to_json_pretty()?);
    } else {
        print!("{}", report::render_report(&analysis, settings.top as usize));
    }

    Ok(())
}
