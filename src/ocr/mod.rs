//! OCR domain — Recognition client.
//!
//! The pipeline only sees the `TextRecognizer` trait; `OcrSpaceClient` is
//! the production implementation backed by the OCR.space HTTP API.

mod ocr_space;

pub use ocr_space::{parse_ocr_response, OcrSpaceClient};

use crate::upload::EncodedImage;
use thiserror::Error;

/// User-facing message for an image with no recognisable text.
pub const NO_READABLE_TEXT: &str =
    "OCR did not detect any readable text in the image. Please upload a clearer image.";

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("{}", NO_READABLE_TEXT)]
    NoReadableText,

    #[error("OCR request failed: {0}")]
    Transport(String),

    #[error("OCR service reported an error: {0}")]
    Service(String),

    #[error("Malformed OCR response: {0}")]
    MalformedResponse(String),
}

/// Extracts plain text from an encoded image.
pub trait TextRecognizer {
    /// Returns the trimmed, non-empty text found in `image`.
    fn recognize(&self, image: &EncodedImage) -> Result<String, RecognitionError>;
}
