//! Text extraction: raw document bytes plus a declared format become plain text.
//!
//! Format is decided from the filename extension before any bytes are
//! touched. Every branch trims the final result; emptiness is checked once
//! by the pipeline, not here.

pub mod ocr;

use crate::errors::AppError;

/// Supported upload formats, derived from the filename extension suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
    Image,
}

impl DocumentFormat {
    /// Maps a filename to its format. Anything outside
    /// {pdf, docx, txt, jpg, jpeg, png} is rejected up front.
    pub fn from_filename(filename: &str) -> Result<Self, AppError> {
        let ext = filename
            .rsplit('.')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Ok(DocumentFormat::PlainText),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "jpg" | "jpeg" | "png" => Ok(DocumentFormat::Image),
            other => Err(AppError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Extracts plain text from document bytes, trimmed of surrounding
/// whitespace. A successful extraction may still be empty; the caller owns
/// that check.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, AppError> {
    let text = match format {
        DocumentFormat::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|e| AppError::Extraction(format!("Invalid UTF-8 in text file: {e}")))?,
        DocumentFormat::Pdf => extract_pdf(bytes)?,
        DocumentFormat::Docx => extract_docx(bytes)?,
        DocumentFormat::Image => ocr::extract_image(bytes)?,
    };
    Ok(text.trim().to_string())
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Error processing PDF: {e}")))
}

/// Concatenates the text of every paragraph in document order. Empty
/// paragraphs are kept: blank lines separate sections downstream.
fn extract_docx(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::Extraction(format!("Error processing DOCX: {e:?}")))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            paragraphs.push(paragraph_text(para));
        }
    }
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts: Vec<String> = Vec::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let docx_rs::RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }
    parts.join("")
}
