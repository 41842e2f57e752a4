//! Tesseract command-line recognizer
//!
//! Pipes the image into `tesseract stdin stdout -l <langs>` and reads the
//! recognized text back from standard output.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use super::TextRecognizer;
use crate::error::{BenefitError, BenefitResult};

/// Program name looked up on `PATH` when none is configured
pub const DEFAULT_PROGRAM: &str = "tesseract";

/// Recognizer backed by an installed tesseract binary
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    program: String,
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl TesseractRecognizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Language argument, e.g. `deu+eng`
    fn language_arg(languages: &[String]) -> Option<String> {
        let joined = languages
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("+");

        (!joined.is_empty()).then_some(joined)
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &[u8], languages: &[String]) -> BenefitResult<String> {
        if image.is_empty() {
            return Err(BenefitError::OcrUnavailable("image is empty".into()));
        }

        let mut command = Command::new(&self.program);
        command.arg("stdin").arg("stdout");
        if let Some(langs) = Self::language_arg(languages) {
            command.arg("-l").arg(langs);
        }

        debug!(program = %self.program, bytes = image.len(), "running OCR");

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BenefitError::OcrUnavailable(format!("failed to start {}: {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image).map_err(|e| {
                BenefitError::OcrUnavailable(format!("failed to send image to {}: {}", self.program, e))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            BenefitError::OcrUnavailable(format!("{} did not finish: {}", self.program, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BenefitError::OcrUnavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_arg() {
        let langs = vec!["deu".to_string(), " eng ".to_string(), String::new()];
        assert_eq!(TesseractRecognizer::language_arg(&langs).as_deref(), Some("deu+eng"));
        assert_eq!(TesseractRecognizer::language_arg(&[]), None);
    }

    #[test]
    fn test_missing_program_is_ocr_unavailable() {
        let recognizer = TesseractRecognizer::new("benefits-no-such-ocr-binary");
        let err = recognizer.recognize(b"image", &[]).unwrap_err();
        assert!(matches!(err, BenefitError::OcrUnavailable(_)));
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = TesseractRecognizer::default().recognize(&[], &[]).unwrap_err();
        assert!(matches!(err, BenefitError::OcrUnavailable(_)));
    }
}
