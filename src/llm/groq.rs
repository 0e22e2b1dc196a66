//! Groq chat completions client.
//!
//! Non-streaming, single attempt. A body without `choices` is a failure and
//! is never retried; the raw body travels with the error for diagnosis.

use super::prompts::{build_analysis_prompt, MAX_TOKENS, TEMPERATURE};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{InterpretationError, Interpreter};
use crate::language::TargetLanguage;
use crate::settings::LlmSettings;

/// Blocking Groq client.
pub struct GroqClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(client: reqwest::blocking::Client, settings: &LlmSettings) -> Self {
        Self {
            client,
            url: settings.url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }
}

impl Interpreter for GroqClient {
    fn interpret(&self, text: &str, language: TargetLanguage) -> Result<String, InterpretationError> {
        let prompt = build_analysis_prompt(text, language);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        log::info!("[LLM] Model: {}, language: {}", self.model, language);
        log::info!("[LLM] Prompt: {} chars", prompt.chars().count());
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                log::error!("[LLM] HTTP request failed: {}", e);
                InterpretationError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| InterpretationError::Transport(format!("Failed to read response: {}", e)))?;
        log::info!("[LLM] Response {} in {}ms", status, start.elapsed().as_millis());
        if !status.is_success() {
            log::warn!("[LLM] API returned {}: {}", status, crate::preview(&body, 200));
        }

        parse_completion(&body)
    }
}

/// Decode a chat completion body into the generated text.
pub fn parse_completion(body: &str) -> Result<String, InterpretationError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| InterpretationError::MalformedResponse {
            reason: e.to_string(),
            raw: body.to_string(),
        })?;

    let choices = match parsed.choices {
        Some(choices) => choices,
        None => {
            log::error!("[LLM] Unexpected response format: {}", crate::preview(body, 200));
            return Err(InterpretationError::UnexpectedFormat {
                raw: body.to_string(),
            });
        }
    };

    if let Some(usage) = &parsed.usage {
        log::info!(
            "[LLM] Tokens: {} prompt, {} completion",
            usage.prompt_tokens,
            usage.completion_tokens
        );
    }

    choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| InterpretationError::EmptyCompletion {
            raw: body.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice_content() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Findings indicate cerebral atrophy."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 40, "completion_tokens": 8, "total_tokens": 48}
        }"#;
        assert_eq!(parse_completion(body).unwrap(), "Findings indicate cerebral atrophy.");
    }

    #[test]
    fn missing_choices_keeps_raw_body() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#;
        let err = parse_completion(body).unwrap_err();
        assert!(matches!(err, InterpretationError::UnexpectedFormat { .. }));
        assert_eq!(err.raw_response(), Some(body));
        assert!(err.to_string().contains("unexpected response"));
    }

    #[test]
    fn empty_choices_is_empty_completion() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, InterpretationError::EmptyCompletion { .. }));
    }

    #[test]
    fn null_content_is_empty_completion() {
        let err = parse_completion(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#)
            .unwrap_err();
        assert!(matches!(err, InterpretationError::EmptyCompletion { .. }));
    }

    #[test]
    fn non_json_body_is_malformed_with_raw() {
        let err = parse_completion("upstream connect error").unwrap_err();
        assert!(matches!(err, InterpretationError::MalformedResponse { .. }));
        assert_eq!(err.raw_response(), Some("upstream connect error"));
    }

    #[test]
    fn request_serialises_to_chat_schema() {
        let request = ChatCompletionRequest {
            model: "llama3-70b-8192",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3-70b-8192");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json["max_tokens"], 1000);
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }
}
