//! CLI module for Forelese.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Forelese - Lecture Transcription and Q&A
///
/// A web backend for transcribing lecture recordings and asking questions
/// about the accumulated transcripts. The name "Forelese" comes from the
/// Norwegian word for "to lecture."
#[derive(Parser, Debug)]
#[command(name = "forelese")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Forelese: directories, database schema, and configuration
    Init,

    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Transcribe a local audio file and store the transcript
    Transcribe {
        /// Path to a wav, mp3, or m4a file
        file: String,
    },

    /// Ask a question about the stored lecture transcripts
    Ask {
        /// The question to ask
        question: String,
    },

    /// List stored lectures
    List,
}
