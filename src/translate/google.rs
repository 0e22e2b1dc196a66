//! Google Translate client (public `translate_a/single` endpoint).
//!
//! Query: `client=gtx&sl=auto&tl=<code>&dt=t`; the text goes in a form body
//! so long analyses don't hit URL length limits. The response is a nested
//! array whose first element lists `[translated, original, ...]` segments.

use serde_json::Value;

use super::{TranslationError, Translator};
use crate::language::TargetLanguage;
use crate::settings::TranslateSettings;

/// Longest input accepted by the free endpoint.
pub const MAX_TRANSLATE_CHARS: usize = 5000;

/// Blocking Google Translate client.
pub struct GoogleTranslateClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl GoogleTranslateClient {
    pub fn new(client: reqwest::blocking::Client, settings: &TranslateSettings) -> Self {
        Self {
            client,
            url: settings.url.clone(),
        }
    }
}

impl Translator for GoogleTranslateClient {
    fn translate(&self, text: &str, target: TargetLanguage) -> Result<String, TranslationError> {
        let len = text.chars().count();
        if len > MAX_TRANSLATE_CHARS {
            return Err(TranslationError::TextTooLong {
                len,
                max: MAX_TRANSLATE_CHARS,
            });
        }

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .map_err(|e| TranslationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| TranslationError::Transport(format!("Failed to read response: {}", e)))?;
        let translated = parse_translation(&body)?;
        log::info!(
            "[TRANSLATE] {} → {} chars ({}) in {}ms",
            len,
            translated.chars().count(),
            target.code(),
            start.elapsed().as_millis()
        );
        Ok(translated)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
pub fn parse_translation(body: &str) -> Result<String, TranslationError> {
    let parsed: Value =
        serde_json::from_str(body).map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

    let segments = parsed
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::MalformedResponse("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslationError::MalformedResponse(
            "no translated text in response".to_string(),
        ));
    }
    Ok(translated)
}
