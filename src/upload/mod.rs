//! Upload domain — turns report image bytes into what the OCR service accepts.
//!
//! PNG and JPEG pass through untouched. Anything else the `image` crate can
//! decode (WebP, BMP, TIFF, ...) is re-encoded to PNG in memory first.

use base64::Engine;
use image::ImageFormat;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("The uploaded image is empty")]
    Empty,

    #[error("Unsupported or unreadable image: {0}")]
    Unsupported(String),

    #[error("Failed to re-encode image as PNG: {0}")]
    Encode(String),

    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A report image ready to be sent as a base64 data URI.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    mime_type: &'static str,
    base64: String,
    byte_len: usize,
}

impl EncodedImage {
    /// Sniff the format of `bytes` and base64-encode them.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        let format = image::guess_format(bytes).map_err(|e| ImageError::Unsupported(e.to_string()))?;

        let (mime_type, payload) = match format {
            ImageFormat::Png => ("image/png", bytes.to_vec()),
            ImageFormat::Jpeg => ("image/jpeg", bytes.to_vec()),
            other => {
                let start = std::time::Instant::now();
                let png = reencode_as_png(bytes, other)?;
                log::info!(
                    "[UPLOAD] Re-encoded {:?} → PNG in {}ms ({} → {} bytes)",
                    other,
                    start.elapsed().as_millis(),
                    bytes.len(),
                    png.len()
                );
                ("image/png", png)
            }
        };

        Ok(Self {
            mime_type,
            base64: base64::engine::general_purpose::STANDARD.encode(&payload),
            byte_len: payload.len(),
        })
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Size of the image payload before base64.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// `data:<mime>;base64,<payload>` — the form OCR.space expects in `base64Image`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Read a report image from disk. An empty file is rejected here.
pub fn read_image_file(path: &Path) -> Result<Vec<u8>, ImageError> {
    let bytes = std::fs::read(path).map_err(|source| ImageError::Io {
        path: path.display().to_string(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    Ok(bytes)
}

fn reencode_as_png(bytes: &[u8], format: ImageFormat) -> Result<Vec<u8>, ImageError> {
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::Unsupported(e.to_string()))?;
    let mut png_bytes = Vec::new();
    decoded
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(png_bytes)
}
