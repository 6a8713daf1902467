//! Ask command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::ForeleseError;
use crate::pipeline::QueryPipeline;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(question: &str, settings: Settings) -> Result<()> {
    let pipeline = QueryPipeline::from_settings(&settings)?;

    match pipeline.run(question).await {
        Ok(answer) => {
            println!("\n{}\n", answer);
        }
        Err(ForeleseError::NotFound(_)) => {
            Output::warning("No lectures stored yet.");
            Output::info("Use 'forelese transcribe <file>' or POST /upload-audio to add one.");
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
