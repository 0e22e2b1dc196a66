//! Live checks against the real OCR, LLM and translation services.
//!
//! Loads keys from .env.local using dotenvy, same as the binary. Each test
//! prints SKIP and returns when its key is absent, so `cargo test` stays
//! green offline.

use image::{DynamicImage, ImageFormat, RgbImage};
use medscan_lib::llm::{GroqClient, Interpreter};
use medscan_lib::ocr::{OcrSpaceClient, RecognitionError, TextRecognizer};
use medscan_lib::settings::{self, LlmSettings, OcrSettings, TranslateSettings};
use medscan_lib::translate::{GoogleTranslateClient, Translator};
use medscan_lib::upload::EncodedImage;
use medscan_lib::TargetLanguage;

fn load_env() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    match settings::load_env_files(manifest_dir) {
        Some(path) => eprintln!("[TEST] Loaded {}", path.display()),
        None => eprintln!("[TEST] No .env.local or .env in {}", manifest_dir.display()),
    }
}

fn env_key(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|k| !k.trim().is_empty())
}

fn http() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(settings::DEFAULT_TIMEOUT_SECS))
        .build()
        .unwrap()
}

#[test]
fn test_groq_interprets_report_text() {
    load_env();
    let Some(api_key) = env_key("GROQ_API_KEY") else {
        eprintln!("SKIP: No GROQ_API_KEY");
        return;
    };

    let llm = LlmSettings {
        api_key,
        url: settings::DEFAULT_LLM_URL.to_string(),
        model: env_key("GROQ_MODEL").unwrap_or_else(|| settings::DEFAULT_LLM_MODEL.to_string()),
    };
    let client = GroqClient::new(http(), &llm);

    let report = "MRI BRAIN: Mild cerebral atrophy. No hemorrhage or mass effect.";
    let start = std::time::Instant::now();
    let analysis = client
        .interpret(report, TargetLanguage::English)
        .unwrap_or_else(|e| panic!("interpret failed: {} (raw: {:?})", e, e.raw_response()));

    eprintln!("[TEST] {} chars in {}ms", analysis.len(), start.elapsed().as_millis());
    eprintln!("[TEST] {}", analysis);
    assert!(!analysis.trim().is_empty());
}

#[test]
fn test_ocr_space_rejects_blank_image() {
    load_env();
    let Some(api_key) = env_key("OCR_SPACE_API_KEY") else {
        eprintln!("SKIP: No OCR_SPACE_API_KEY");
        return;
    };

    let ocr = OcrSettings {
        api_key,
        url: settings::DEFAULT_OCR_URL.to_string(),
        language: settings::DEFAULT_OCR_LANGUAGE.to_string(),
    };
    let client = OcrSpaceClient::new(http(), &ocr);

    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255])));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    let encoded = EncodedImage::from_bytes(&bytes).unwrap();

    let result = client.recognize(&encoded);
    eprintln!("[TEST] blank image → {:?}", result);
    assert!(matches!(
        result,
        Err(RecognitionError::NoReadableText) | Err(RecognitionError::Service(_))
    ));
}

#[test]
fn test_google_translates_to_hindi() {
    load_env();
    // No key needed, but the endpoint is public and rate limited.
    if env_key("MEDSCAN_LIVE_TRANSLATE").is_none() {
        eprintln!("SKIP: MEDSCAN_LIVE_TRANSLATE not set");
        return;
    }

    let translate = TranslateSettings {
        url: settings::DEFAULT_TRANSLATE_URL.to_string(),
    };
    let client = GoogleTranslateClient::new(http(), &translate);

    let translated = client
        .translate("The brain scan shows no bleeding.", TargetLanguage::Hindi)
        .unwrap();
    eprintln!("[TEST] {}", translated);
    // Devanagari block.
    assert!(translated.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c)));
}
