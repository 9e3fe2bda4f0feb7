//! OCR branch for raster-image uploads.
//!
//! Shells out to the system `tesseract` binary over a temp file, the same
//! engine the usual Python bindings drive. A missing binary or an engine
//! failure is an extraction failure for image uploads only.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::AppError;

/// Runs optical character recognition over the image bytes and returns the
/// recognized text.
pub fn extract_image(bytes: &[u8]) -> Result<String, AppError> {
    let mut file = NamedTempFile::new().map_err(ocr_error)?;
    file.write_all(bytes).map_err(ocr_error)?;
    file.flush().map_err(ocr_error)?;

    let output = Command::new("tesseract")
        .arg(file.path())
        .arg("stdout")
        .output()
        .map_err(ocr_error)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::Extraction(format!(
            "Error processing image with OCR: tesseract exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!("OCR produced {} bytes of text", text.len());
    Ok(text)
}

fn ocr_error(e: std::io::Error) -> AppError {
    AppError::Extraction(format!("Error processing image with OCR: {e}"))
}
