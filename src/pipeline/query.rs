//! Query pipeline: validate, aggregate transcripts, ask the LLM.

use crate::answer::{build_prompt, OpenAiResponder, Responder};
use crate::config::Settings;
use crate::error::{ForeleseError, Result};
use crate::store::{LectureStore, SqliteLectureStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The query pipeline: one instance serves all requests.
pub struct QueryPipeline {
    responder: Arc<dyn Responder>,
    store: Arc<dyn LectureStore>,
}

impl QueryPipeline {
    /// Create a query pipeline with explicit collaborators.
    pub fn new(responder: Arc<dyn Responder>, store: Arc<dyn LectureStore>) -> Self {
        Self { responder, store }
    }

    /// Create a query pipeline with real adapters from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let responder = Arc::new(OpenAiResponder::new(
            &settings.answer.model,
            settings.answer.max_tokens,
        ));
        let store = Arc::new(SqliteLectureStore::new(&settings.sqlite_path())?);

        Ok(Self::new(responder, store))
    }

    /// Answer a free-text question against all stored transcripts.
    ///
    /// Every failure is terminal for the request; there is no retry or
    /// partial-answer handling.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn run(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ForeleseError::InvalidInput(
                "No question provided".to_string(),
            ));
        }

        let transcripts = self.store.fetch_all_transcripts().await?;
        let lectures = transcripts.join(" ");

        if lectures.trim().is_empty() {
            return Err(ForeleseError::NotFound(
                "No lectures found in the database".to_string(),
            ));
        }

        debug!(
            "Answering against {} transcripts ({} characters)",
            transcripts.len(),
            lectures.len()
        );

        let prompt = build_prompt(&lectures, question);
        let answer = self.responder.answer(&prompt).await?;
        let answer = answer.trim();

        if answer.is_empty() {
            return Err(ForeleseError::Answer(
                "Model returned an empty response".to_string(),
            ));
        }

        info!("Generated answer ({} characters)", answer.len());
        Ok(answer.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeResponder {
        result: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeResponder {
        fn returning(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Responder for FakeResponder {
        async fn answer(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.result.clone().map_err(ForeleseError::OpenAI)
        }
    }

    async fn store_with(transcripts: &[&str]) -> Arc<SqliteLectureStore> {
        let store = Arc::new(SqliteLectureStore::in_memory().unwrap());
        for (i, t) in transcripts.iter().enumerate() {
            store
                .insert_lecture(&format!("lecture{}.wav", i + 1), t)
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_answer_for_single_transcript() {
        let responder = Arc::new(FakeResponder::returning("A greeting."));
        let store = store_with(&["hello world"]).await;
        let pipeline = QueryPipeline::new(responder, store);

        let answer = pipeline.run("What was covered?").await.unwrap();
        assert_eq!(answer, "A greeting.");
    }

    #[tokio::test]
    async fn test_empty_question_skips_the_responder() {
        let responder = Arc::new(FakeResponder::returning("unused"));
        let store = store_with(&["hello world"]).await;
        let pipeline = QueryPipeline::new(responder.clone(), store);

        for question in ["", "   ", "\n\t"] {
            let err = pipeline.run(question).await.unwrap_err();
            assert!(matches!(err, ForeleseError::InvalidInput(ref msg) if msg == "No question provided"));
        }

        assert_eq!(responder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_store_is_not_found() {
        let responder = Arc::new(FakeResponder::returning("unused"));
        let store = store_with(&[]).await;
        let pipeline = QueryPipeline::new(responder.clone(), store);

        let err = pipeline.run("Anything at all?").await.unwrap_err();
        assert!(matches!(err, ForeleseError::NotFound(ref msg) if msg == "No lectures found in the database"));
        assert_eq!(responder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prompt_contains_all_transcripts_and_question() {
        let responder = Arc::new(FakeResponder::returning("An answer."));
        let store = store_with(&["hello world", "thermodynamics recap", "final exam notes"]).await;
        let pipeline = QueryPipeline::new(responder.clone(), store);

        pipeline.run("What was covered?").await.unwrap();

        let prompt = responder.last_prompt();
        assert!(prompt.contains("hello world thermodynamics recap final exam notes"));
        assert!(prompt.contains("Question: What was covered?"));
    }

    #[tokio::test]
    async fn test_answer_is_trimmed() {
        let responder = Arc::new(FakeResponder::returning("  A greeting.\n"));
        let store = store_with(&["hello world"]).await;
        let pipeline = QueryPipeline::new(responder, store);

        let answer = pipeline.run("What was covered?").await.unwrap();
        assert_eq!(answer, "A greeting.");
    }

    #[tokio::test]
    async fn test_blank_answer_is_an_error() {
        let responder = Arc::new(FakeResponder::returning("   "));
        let store = store_with(&["hello world"]).await;
        let pipeline = QueryPipeline::new(responder, store);

        let err = pipeline.run("What was covered?").await.unwrap_err();
        assert!(matches!(err, ForeleseError::Answer(_)));
    }

    #[tokio::test]
    async fn test_responder_failure_propagates() {
        let responder = Arc::new(FakeResponder {
            result: Err("quota exceeded".to_string()),
            prompts: Mutex::new(Vec::new()),
        });
        let store = store_with(&["hello world"]).await;
        let pipeline = QueryPipeline::new(responder, store);

        let err = pipeline.run("What was covered?").await.unwrap_err();
        assert!(matches!(err, ForeleseError::OpenAI(_)));
    }
}
