//! One interview: a fact repository, a conversation and at most one answer
//! in flight.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::facts::FactRepository;
use crate::interview::conversation::{ConversationState, Phase, Turn};
use crate::interview::prompts::READY_PROMPT;
use crate::interview::questions;
use crate::interview::responder::Responder;
use crate::models::resume::ResumeRecord;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("An answer is already being generated for this session")]
    Busy,
}

/// Speech-to-text output forwarded by the browser.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub is_final: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub phase: Phase,
    pub history: Vec<Turn>,
    pub resume: Option<ResumeRecord>,
}

struct Inflight {
    ticket: u64,
    cancel: CancellationToken,
}

#[derive(Default)]
struct Exchange {
    conversation: ConversationState,
    next_ticket: u64,
    inflight: Option<Inflight>,
}

impl Exchange {
    /// Clears the in-flight slot if it still belongs to `ticket`.
    fn release(&mut self, ticket: u64) -> bool {
        if matches!(&self.inflight, Some(i) if i.ticket == ticket) {
            self.inflight = None;
            true
        } else {
            false
        }
    }
}

/// Returns the conversation to `Waiting` if an `ask` future is dropped
/// before its answer is recorded.
struct AnswerGuard<'a> {
    exchange: &'a Mutex<Exchange>,
    ticket: u64,
}

impl Drop for AnswerGuard<'_> {
    fn drop(&mut self) {
        let mut exchange = self.exchange.lock();
        if exchange.release(self.ticket) {
            exchange.conversation.abandon_answer();
        }
    }
}

pub struct InterviewSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    facts: FactRepository,
    exchange: Mutex<Exchange>,
    last_active: Mutex<Instant>,
    responder: Arc<Responder>,
}

impl InterviewSession {
    pub fn new(responder: Arc<Responder>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            facts: FactRepository::new(),
            exchange: Mutex::new(Exchange::default()),
            last_active: Mutex::new(Instant::now()),
            responder,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn facts(&self) -> &FactRepository {
        &self.facts
    }

    /// Marks the session as used now.
    pub fn touch(&self) {
        *self.last_active.lock() = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.lock().elapsed()
    }

    pub fn phase(&self) -> Phase {
        self.exchange.lock().conversation.phase()
    }

    pub fn history(&self) -> Vec<Turn> {
        self.exchange.lock().conversation.history().to_vec()
    }

    /// Installs a new record, cancels any in-flight answer and starts the
    /// conversation over.
    pub fn install_resume(&self, record: ResumeRecord) {
        let mut exchange = self.exchange.lock();
        if let Some(inflight) = exchange.inflight.take() {
            inflight.cancel.cancel();
        }
        exchange.conversation.reset();
        self.facts.install(record);
        self.touch();
        info!("Installed new resume for session {}", self.id);
    }

    /// Answers one interviewer question and records the turn pair.
    pub async fn ask(&self, question: &str) -> Result<String, SessionError> {
        self.touch();
        if question.trim().is_empty() {
            return Ok(READY_PROMPT.to_string());
        }

        let (ticket, cancel, history, facts) = {
            let mut exchange = self.exchange.lock();
            if exchange.inflight.is_some() {
                return Err(SessionError::Busy);
            }
            let ticket = exchange.next_ticket;
            exchange.next_ticket += 1;
            let cancel = CancellationToken::new();
            exchange.inflight = Some(Inflight {
                ticket,
                cancel: cancel.clone(),
            });
            exchange.conversation.begin_answer();
            (
                ticket,
                cancel,
                exchange.conversation.history().to_vec(),
                self.facts.snapshot(),
            )
        };
        let _guard = AnswerGuard {
            exchange: &self.exchange,
            ticket,
        };

        let answer = self
            .responder
            .answer(question, &facts, &history, &cancel)
            .await;

        let mut exchange = self.exchange.lock();
        if exchange.release(ticket) {
            exchange.conversation.complete_answer(question.trim(), &answer);
        } else {
            debug!("Session {} was reset during generation; answer not recorded", self.id);
        }
        drop(exchange);
        self.touch();
        Ok(answer)
    }

    /// Interim transcripts are ignored; final ones are asked as questions.
    pub async fn submit_transcript(
        &self,
        transcript: &Transcript,
    ) -> Result<Option<String>, SessionError> {
        if !transcript.is_final {
            return Ok(None);
        }
        self.ask(&transcript.text).await.map(Some)
    }

    /// Cancels the in-flight answer, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        match &self.exchange.lock().inflight {
            Some(inflight) => {
                inflight.cancel.cancel();
                true
            }
            None => false,
        }
    }

    pub fn suggested_questions(&self) -> Vec<String> {
        questions::suggested(self.facts.current().as_deref())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let exchange = self.exchange.lock();
        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            phase: exchange.conversation.phase(),
            history: exchange.conversation.history().to_vec(),
            resume: self.facts.current().map(|r| (*r).clone()),
        }
    }
}
