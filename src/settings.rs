//! Service settings and HTTP client construction.
//!
//! Resolution order for every key:
//! 1. Process environment (after `.env.local` / `.env` are loaded by dotenvy)
//! 2. `<config_dir>/medscan/settings.json` — a flat object of the same keys
//! 3. Built-in default (only for non-secret keys)

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OCR_URL: &str = "https://api.ocr.space/parse/image";
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";
pub const DEFAULT_LLM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required setting {0} (set it in the environment, .env.local, or settings.json)")]
    MissingKey(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to read settings file {path}: {reason}")]
    File { path: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrSettings {
    pub api_key: String,
    pub url: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub api_key: String,
    pub url: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateSettings {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ocr: OcrSettings,
    pub llm: LlmSettings,
    pub translate: TranslateSettings,
    pub timeout: Duration,
}

impl Settings {
    /// Resolve settings from the environment and the optional settings file.
    pub fn load() -> Result<Self, SettingsError> {
        let file_values = match settings_path() {
            Some(path) => load_settings_file(&path)?,
            None => HashMap::new(),
        };
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file_values.get(key).cloned())
        })
    }

    /// Resolve settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(SettingsError::MissingKey(key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(SettingsError::InvalidValue {
                    key: "HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            ocr: OcrSettings {
                api_key: required("OCR_SPACE_API_KEY")?,
                url: or_default("OCR_SPACE_URL", DEFAULT_OCR_URL),
                language: or_default("OCR_LANGUAGE", DEFAULT_OCR_LANGUAGE),
            },
            llm: LlmSettings {
                api_key: required("GROQ_API_KEY")?,
                url: or_default("GROQ_URL", DEFAULT_LLM_URL),
                model: or_default("GROQ_MODEL", DEFAULT_LLM_MODEL),
            },
            translate: TranslateSettings {
                url: or_default("TRANSLATE_URL", DEFAULT_TRANSLATE_URL),
            },
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Blocking HTTP client shared by the three service clients.
    pub fn http_client(&self) -> Result<reqwest::blocking::Client, SettingsError> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SettingsError::HttpClient(e.to_string()))
    }
}

/// Load `.env.local`, falling back to `.env`, from `dir`.
///
/// Returns the file that was loaded. Existing environment variables win.
pub fn load_env_files(dir: &Path) -> Option<PathBuf> {
    for env_file in [".env.local", ".env"] {
        let path = dir.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            return Some(path);
        }
    }
    None
}

/// Location of the optional settings file.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("medscan").join("settings.json"))
}

/// Read a flat JSON object of setting keys.
///
/// A missing file is an empty map; a present but invalid file is an error.
pub fn load_settings_file(path: &Path) -> Result<HashMap<String, String>, SettingsError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => {
            return Err(SettingsError::File {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    };

    let parsed: HashMap<String, Value> =
        serde_json::from_str(&raw).map_err(|e| SettingsError::File {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let values = parsed
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) if !s.trim().is_empty() => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            _ => None,
        })
        .collect::<HashMap<_, _>>();
    log::info!("[SETTINGS] Loaded {} keys from {}", values.len(), path.display());
    Ok(values)
}
