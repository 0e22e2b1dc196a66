//! Output language selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the analysis report should be delivered in.
///
/// English is the primary language: the model answers in it directly and
/// no translation pass runs. Hindi goes through the translation client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    English,
    Hindi,
}

impl TargetLanguage {
    /// Name used inside the model prompt ("provide insights in Hindi").
    pub fn display_name(self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Hindi => "Hindi",
        }
    }

    /// ISO 639-1 code sent to the translation service.
    pub fn code(self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Hindi => "hi",
        }
    }

    pub fn is_primary(self) -> bool {
        self == TargetLanguage::English
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(TargetLanguage::English),
            "hindi" | "hi" => Ok(TargetLanguage::Hindi),
            other => Err(format!(
                "Unsupported language: {}. Use 'english' or 'hindi'.",
                other
            )),
        }
    }
}
