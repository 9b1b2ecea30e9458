// Interview: candidate answer generation and per-session conversation state.
// All LLM calls go through llm_client::TextGenerator; failures fall back to canned answers.

pub mod canned;
pub mod context;
pub mod conversation;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod responder;
pub mod session;
pub mod store;
