//! LLM domain — Interpretation client.
//!
//! The pipeline only sees the `Interpreter` trait. `GroqClient` talks to
//! Groq's OpenAI-compatible chat completions endpoint.
//!
//!   - prompts.rs — the analysis instruction sent as the single user turn
//!   - types.rs   — request/response shapes for chat completions
//!   - groq.rs    — blocking HTTP client + response decoding

mod groq;
pub mod prompts;
pub mod types;

pub use groq::{parse_completion, GroqClient};

use crate::language::TargetLanguage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpretationError {
    #[error("Analysis request failed: {0}")]
    Transport(String),

    /// The body has no `choices` field (rate limits, auth errors, ...).
    #[error("Analysis failed due to an unexpected response from the API.")]
    UnexpectedFormat { raw: String },

    #[error("Analysis failed: the API returned an empty completion.")]
    EmptyCompletion { raw: String },

    #[error("Analysis failed: response was not valid JSON ({reason})")]
    MalformedResponse { reason: String, raw: String },
}

impl InterpretationError {
    /// The raw response body, kept for diagnosis.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            InterpretationError::Transport(_) => None,
            InterpretationError::UnexpectedFormat { raw }
            | InterpretationError::EmptyCompletion { raw }
            | InterpretationError::MalformedResponse { raw, .. } => Some(raw),
        }
    }
}

/// Turns recognised report text into a plain-language analysis.
pub trait Interpreter {
    /// One completion call. The language directive is part of the prompt;
    /// nothing checks that the reply is actually in `language`.
    fn interpret(&self, text: &str, language: TargetLanguage) -> Result<String, InterpretationError>;
}
