//! Translation domain — optional rewrite of the analysis into the target language.
//!
//! Translation is an enhancement: the pipeline treats every
//! `TranslationError` as recoverable and keeps the untranslated text.

mod google;

pub use google::{parse_translation, GoogleTranslateClient, MAX_TRANSLATE_CHARS};

use crate::language::TargetLanguage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("Translation request failed: {0}")]
    Transport(String),

    #[error("Translation service returned status {status}")]
    Status { status: u16 },

    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),

    #[error("Text too long to translate ({len} chars, limit {max})")]
    TextTooLong { len: usize, max: usize },
}

pub trait Translator {
    /// Translate `text` into `target`, letting the service detect the source language.
    fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, TranslationError>;
}
