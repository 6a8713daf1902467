//! Transcribe command - run the upload pipeline on a local file.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::UploadPipeline;
use anyhow::Result;
use std::path::Path;

/// Run the transcribe command.
pub async fn run_transcribe(file: &str, settings: Settings) -> Result<()> {
    let path = Path::new(file);
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Not a file path: {}", file))?;

    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {}", file, e))?;

    let pipeline = UploadPipeline::from_settings(&settings)?;

    Output::info(&format!("Transcribing {}...", filename));

    match pipeline.run(filename, &bytes).await {
        Ok(receipt) => {
            Output::success(&format!(
                "Stored lecture #{} ({})",
                receipt.id, receipt.filename
            ));
            println!("\n{}\n", receipt.transcript);
        }
        Err(e) => {
            Output::error(&format!("Transcription failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
