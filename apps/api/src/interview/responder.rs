//! Response Generator: turns a question plus résumé facts into a spoken
//! first-person answer, falling back to a canned answer on any failure.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::facts::FactSnapshot;
use crate::interview::conversation::Turn;
use crate::interview::prompts::{
    ANSWER_MAX_TOKENS, ANSWER_TEMPERATURE, CANDIDATE_SYSTEM, READY_PROMPT,
};
use crate::interview::{canned, context};
use crate::llm_client::{CompletionRequest, LlmError, TextGenerator};

/// Answers longer than this with no line breaks get re-paragraphed.
const PARAGRAPH_THRESHOLD: usize = 100;
const SENTENCES_PER_PARAGRAPH: usize = 2;

/// Terminal punctuation only ends a sentence when whitespace follows, so
/// "Node.js" and "3.9" stay whole.
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("sentence end pattern is valid"));

/// Why a generated answer was replaced by the canned one.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("generation exceeded {0:?}")]
    DeadlineExceeded(Duration),

    #[error("generation was cancelled")]
    Cancelled,
}

pub struct Responder {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl Responder {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Always produces an answer. Blank questions get the ready prompt.
    pub async fn answer(
        &self,
        question: &str,
        facts: &FactSnapshot,
        history: &[Turn],
        cancel: &CancellationToken,
    ) -> String {
        if question.trim().is_empty() {
            return READY_PROMPT.to_string();
        }

        match self.generate(question, facts, history, cancel).await {
            Ok(text) => paragraphize(&text),
            Err(e) => {
                warn!("Answer generation failed, using canned answer: {e}");
                canned::answer_for(question).to_string()
            }
        }
    }

    async fn generate(
        &self,
        question: &str,
        facts: &FactSnapshot,
        history: &[Turn],
        cancel: &CancellationToken,
    ) -> Result<String, GenerationFailure> {
        let prompt = context::build_prompt(question, facts, history);
        let request = CompletionRequest {
            system: CANDIDATE_SYSTEM,
            prompt: &prompt,
            max_tokens: ANSWER_MAX_TOKENS,
            temperature: ANSWER_TEMPERATURE,
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Answer generation cancelled");
                Err(GenerationFailure::Cancelled)
            }
            result = tokio::time::timeout(self.timeout, self.generator.complete(request)) => {
                match result {
                    Ok(text) => Ok(text?),
                    Err(_) => Err(GenerationFailure::DeadlineExceeded(self.timeout)),
                }
            }
        }
    }
}

/// Splits a long single-block answer into paragraphs of two sentences.
pub fn paragraphize(text: &str) -> String {
    let text = text.trim();
    if text.contains('\n') || text.chars().count() <= PARAGRAPH_THRESHOLD {
        return text.to_string();
    }

    sentences(text)
        .chunks(SENTENCES_PER_PARAGRAPH)
        .map(|pair| pair.join(" "))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for end in SENTENCE_END.find_iter(text) {
        out.push(text[start..end.end()].trim());
        start = end.end();
    }
    out.push(text[start..].trim());
    out.retain(|s| !s.is_empty());
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::OfflineGenerator;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    /// Never resolves on its own.
    struct HangingGenerator;

    #[async_trait]
    impl TextGenerator for HangingGenerator {
        async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, LlmError> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct CountingGenerator(AtomicUsize);

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
            assert_eq!(request.system, CANDIDATE_SYSTEM);
            assert_eq!(request.max_tokens, ANSWER_MAX_TOKENS);
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok("Sure.".to_string())
        }
    }

    fn responder(generator: impl TextGenerator + 'static) -> Responder {
        Responder::new(Arc::new(generator), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_blank_question_gets_ready_prompt_without_generation() {
        let generator = Arc::new(CountingGenerator::default());
        let responder = Responder::new(generator.clone(), Duration::from_secs(5));
        let answer = responder
            .answer("   ", &FactSnapshot::default(), &[], &CancellationToken::new())
            .await;
        assert_eq!(answer, READY_PROMPT);
        assert_eq!(generator.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generated_answer_is_returned() {
        let responder = responder(FixedGenerator("I love Rust."));
        let answer = responder
            .answer("Why Rust?", &FactSnapshot::default(), &[], &CancellationToken::new())
            .await;
        assert_eq!(answer, "I love Rust.");
    }

    #[tokio::test]
    async fn test_failing_generator_gives_same_canned_weakness_answer() {
        let responder = responder(OfflineGenerator);
        let expected = canned::answer_for("What is your weakness?");
        for _ in 0..3 {
            let answer = responder
                .answer(
                    "What is your weakness?",
                    &FactSnapshot::default(),
                    &[],
                    &CancellationToken::new(),
                )
                .await;
            assert_eq!(answer, expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_falls_back_to_canned_answer() {
        let responder = Responder::new(Arc::new(HangingGenerator), Duration::from_millis(50));
        let answer = responder
            .answer(
                "Describe a challenge",
                &FactSnapshot::default(),
                &[],
                &CancellationToken::new(),
            )
            .await;
        assert_eq!(answer, canned::answer_for("Describe a challenge"));
    }

    #[tokio::test]
    async fn test_cancellation_falls_back_to_canned_answer() {
        let responder = responder(HangingGenerator);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let answer = responder
            .answer("Tell me about yourself", &FactSnapshot::default(), &[], &cancel)
            .await;
        assert_eq!(answer, canned::answer_for("Tell me about yourself"));
    }

    #[test]
    fn test_paragraphize_splits_every_second_sentence() {
        let text = "I started in support. Then I moved to backend work! \
            Later I led a small team? Now I mostly build APIs in Rust.";
        assert_eq!(
            paragraphize(text),
            "I started in support. Then I moved to backend work!\n\n\
             Later I led a small team? Now I mostly build APIs in Rust."
        );
    }

    #[test]
    fn test_paragraphize_keeps_short_or_broken_text() {
        assert_eq!(paragraphize("Short answer. Two sentences."), "Short answer. Two sentences.");
        let already = format!("{}\n\nSecond paragraph.", "a".repeat(120));
        assert_eq!(paragraphize(&already), already);
    }

    #[test]
    fn test_paragraphize_keeps_trailing_fragment() {
        let text = format!("{}. And a trailing thought without a period", "x".repeat(110));
        let out = paragraphize(&text);
        assert!(out.ends_with("And a trailing thought without a period"));
    }

    #[test]
    fn test_paragraphize_keeps_dotted_words_and_decimals() {
        let text = "I built the backend in Node.js with Express and graduated with a GPA of 3.9 \
            from my program. I enjoyed it a lot. Version 2.0 shipped on time.";
        assert_eq!(
            paragraphize(text),
            "I built the backend in Node.js with Express and graduated with a GPA of 3.9 \
             from my program. I enjoyed it a lot.\n\nVersion 2.0 shipped on time."
        );
    }
}
