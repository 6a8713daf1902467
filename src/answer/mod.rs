//! Answer generation module for Forelese.
//!
//! Wraps the language-model call behind a capability trait, and owns the
//! prompt that frames the model as a lecture-transcript analyst.

mod openai;

pub use openai::OpenAiResponder;

use crate::error::Result;
use async_trait::async_trait;

/// Fixed system instruction for answer generation.
pub const SYSTEM_PROMPT: &str =
    "You are an AI assistant specialized in summarizing and analyzing lecture transcripts.";

/// Trait for answer generation services.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Generate an answer for the given user prompt.
    async fn answer(&self, prompt: &str) -> Result<String>;
}

/// Build the user prompt embedding the full transcript blob and the question.
pub fn build_prompt(lectures: &str, question: &str) -> String {
    format!(
        "Based on the following lecture content, answer the question concisely:\n\n{}\n\nQuestion: {}",
        lectures, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_content_and_question_verbatim() {
        let prompt = build_prompt("hello world goodbye world", "What was covered?");

        assert!(prompt.contains("hello world goodbye world"));
        assert!(prompt.contains("Question: What was covered?"));
    }
}
