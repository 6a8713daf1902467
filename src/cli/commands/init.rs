//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use crate::openai::is_api_key_configured;
use crate::store::SqliteLectureStore;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Forelese Setup");
    println!();
    println!("Welcome to Forelese! Let's make sure everything is configured correctly.\n");

    // Step 1: Check API key
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    if !is_api_key_configured() {
        Output::warning("OPENAI_API_KEY environment variable is not set.");
        println!();
        println!("  Forelese requires an OpenAI API key for transcription and answers.");
        println!(
            "  Get your API key from: {}",
            style("https://platform.openai.com/api-keys").underlined()
        );
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export OPENAI_API_KEY='sk-...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'forelese init' again.");
            return Ok(());
        }
    } else {
        Output::success("OpenAI API key is configured!");
    }

    println!();

    // Step 2: Create directories
    println!("{}", style("Step 2: Setting up directories").bold().cyan());
    println!();

    let data_dir = settings.data_dir();
    let upload_dir = settings.upload_dir();

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    } else {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    }

    if !upload_dir.exists() {
        std::fs::create_dir_all(&upload_dir)?;
        Output::success(&format!("Created upload directory: {}", upload_dir.display()));
    } else {
        Output::info(&format!("Upload directory exists: {}", upload_dir.display()));
    }

    println!();

    // Step 3: Initialize database
    println!("{}", style("Step 3: Initializing database").bold().cyan());
    println!();

    let db_path = settings.sqlite_path();
    // Opening the store creates the lectures table if it is missing.
    SqliteLectureStore::new(&db_path)?;
    Output::success(&format!("Database ready: {}", db_path.display()));

    println!();

    // Step 4: Create config file
    println!("{}", style("Step 4: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Start the HTTP server", style("forelese serve").cyan());
    println!(
        "  {} Transcribe a local recording",
        style("forelese transcribe <file>").cyan()
    );
    println!(
        "  {} Ask questions about your lectures",
        style("forelese ask \"<question>\"").cyan()
    );
    println!();
    println!("For more help: {}", style("forelese --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
