//! OCR.space recognition client.
//!
//! Request: form-encoded `POST /parse/image` with the image as a base64 data
//! URI, the OCR language, and overlay metadata disabled.
//! Response: `ParsedResults[0].ParsedText` is the only field the pipeline
//! needs. `IsErroredOnProcessing` + `ErrorMessage` explain failures.

use serde::Deserialize;

use super::{RecognitionError, TextRecognizer};
use crate::settings::OcrSettings;
use crate::upload::EncodedImage;

/// Blocking OCR.space client.
pub struct OcrSpaceClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    language: String,
}

impl OcrSpaceClient {
    pub fn new(client: reqwest::blocking::Client, settings: &OcrSettings) -> Self {
        Self {
            client,
            url: settings.url.clone(),
            api_key: settings.api_key.clone(),
            language: settings.language.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(default)]
    is_errored_on_processing: bool,
    /// A string or an array of strings, depending on the failure.
    #[serde(default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: Option<String>,
}

impl TextRecognizer for OcrSpaceClient {
    fn recognize(&self, image: &EncodedImage) -> Result<String, RecognitionError> {
        let start = std::time::Instant::now();
        log::info!(
            "[OCR] Sending {} ({} bytes) to OCR.space, language={}",
            image.mime_type(),
            image.byte_len(),
            self.language
        );

        let data_uri = image.data_uri();
        let response = self
            .client
            .post(&self.url)
            .form(&[
                ("base64Image", data_uri.as_str()),
                ("language", self.language.as_str()),
                ("isOverlayRequired", "false"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| {
                log::error!("[OCR] HTTP request failed: {}", e);
                RecognitionError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RecognitionError::Transport(format!("Failed to read response: {}", e)))?;
        log::info!(
            "[OCR] Response {} in {}ms ({} bytes)",
            status,
            start.elapsed().as_millis(),
            body.len()
        );

        // OCR.space reports most failures inside a JSON body, so the body is
        // parsed regardless of status. A non-JSON error page falls through to
        // MalformedResponse.
        let text = parse_ocr_response(&body)?;
        log::info!("[OCR] Extracted {} chars", text.chars().count());
        Ok(text)
    }
}

/// Decode an OCR.space response body into the recognised text.
pub fn parse_ocr_response(body: &str) -> Result<String, RecognitionError> {
    let parsed: OcrSpaceResponse = serde_json::from_str(body).map_err(|e| {
        log::warn!(
            "[OCR] Unparseable response: {} — raw: {}",
            e,
            crate::preview(body, 200)
        );
        RecognitionError::MalformedResponse(e.to_string())
    })?;

    let first_text = parsed
        .parsed_results
        .as_deref()
        .and_then(|results| results.first())
        .and_then(|r| r.parsed_text.as_deref())
        .map(str::trim)
        .unwrap_or_default();

    if !first_text.is_empty() {
        return Ok(first_text.to_string());
    }

    if parsed.is_errored_on_processing {
        let message = parsed
            .error_message
            .as_ref()
            .map(error_message_text)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unknown error".to_string());
        log::warn!("[OCR] Service error: {}", message);
        return Err(RecognitionError::Service(message));
    }

    Err(RecognitionError::NoReadableText)
}

fn error_message_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
