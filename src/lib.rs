//! medscan — scan-report reading assistant.
//!
//! Library root. Wires together the domains; the `medscan` binary in
//! main.rs is the only presentation surface.
//!
//! Domains:
//!   - lexicon     — built-in medical vocabulary (definitions, medications, emergency terms)
//!   - analysis    — keyword matching over text (glossary, emergency, medication)
//!   - upload      — image bytes → base64 data URI for the OCR service
//!   - ocr         — Recognition client (OCR.space)
//!   - llm         — Interpretation client (Groq chat completions)
//!   - translate   — Translation client (Google Translate)
//!   - pipeline    — OCR → truncate → interpret → translate → analyze
//!   - report      — text rendering of a pipeline outcome
//!   - settings    — env / .env / settings.json resolution

pub mod analysis;
pub mod language;
pub mod lexicon;
pub mod llm;
pub mod ocr;
pub mod pipeline;
pub mod report;
pub mod settings;
pub mod translate;
pub mod upload;

pub use language::TargetLanguage;
pub use lexicon::{Lexicon, LexiconEntry};
pub use pipeline::{AnalysisRequest, Pipeline, PipelineOutcome, PipelineResult, Stage, StageFailure};

/// First `max_chars` characters of `text`, for log previews.
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
