//! OCR collaborator
//!
//! Recognizing text in an invoice photo is an external capability. The core
//! only ever sees the recognized text; this module defines the boundary and
//! turns failures into a fallback guess so that manual entry is never blocked.

pub mod tesseract;

pub use tesseract::TesseractRecognizer;

use tracing::{info, warn};

use crate::error::{BenefitError, BenefitResult};
use crate::services::interpreter::{InvoiceGuess, Interpreter};

/// Anything that can turn an image payload into text
pub trait TextRecognizer {
    /// Recognize the text in `image` using the given language hints
    fn recognize(&self, image: &[u8], languages: &[String]) -> BenefitResult<String>;
}

/// Recognizer for payloads that already are recognized text (UTF-8)
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRecognizer;

impl TextRecognizer for PlainTextRecognizer {
    fn recognize(&self, image: &[u8], _languages: &[String]) -> BenefitResult<String> {
        String::from_utf8(image.to_vec())
            .map_err(|e| BenefitError::OcrUnavailable(format!("payload is not UTF-8 text: {}", e)))
    }
}

/// Result of scanning an invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub guess: InvoiceGuess,
    /// Recognized text, empty when OCR failed
    pub text: String,
    /// Why OCR could not be used, if it failed
    pub failure: Option<String>,
}

impl ScanOutcome {
    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }
}

/// Recognize an invoice image and interpret the text
///
/// OCR failures and blank results never propagate: they produce a zero amount
/// and the interpreter's default category, and the caller tells the user to
/// enter the expense manually.
pub fn scan_invoice<R: TextRecognizer + ?Sized>(
    recognizer: &R,
    image: &[u8],
    languages: &[String],
    interpreter: &Interpreter,
) -> ScanOutcome {
    let recognized = recognizer.recognize(image, languages).and_then(|text| {
        if text.trim().is_empty() {
            Err(BenefitError::OcrUnavailable("no text recognized".into()))
        } else {
            Ok(text)
        }
    });

    match recognized {
        Ok(text) => {
            let guess = interpreter.interpret(&text);
            info!(amount = %guess.amount, category = %guess.category, "scanned invoice");
            ScanOutcome {
                guess,
                text,
                failure: None,
            }
        }
        Err(err) => {
            warn!(error = %err, "OCR failed, falling back to manual entry");
            ScanOutcome {
                guess: interpreter.fallback(),
                text: String::new(),
                failure: Some(err.to_string()),
            }
        }
    }
}
