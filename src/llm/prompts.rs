//! Prompt constants for the analysis call.

use crate::language::TargetLanguage;

pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f32 = 0.7;

/// Builds the single user turn sent to the model.
pub fn build_analysis_prompt(text: &str, language: TargetLanguage) -> String {
    format!(
        "Please analyze the following medical image description and provide insights in {}:\n\n{}",
        language.display_name(),
        text
    )
}
