//! # Tabgrid OCR - Per-Cell Text Recognition
//!
//! The OCR collaborator seam of the pipeline: a [`TextRecognizer`] receives
//! one cropped cell image at a time and returns its recognized text (possibly
//! empty). The reconstructor calls it once per cell, potentially from several
//! rayon workers at once, so implementations must be `Send + Sync`.
//!
//! Two implementations are provided:
//!
//! - [`TesseractRecognizer`] (behind the `tesseract` feature) wraps a leptess
//!   engine. Tesseract handles are not thread-safe, so the engine sits behind
//!   a mutex and concurrent cell recognition degrades to serialized calls.
//! - [`FixedRecognizer`] returns a canned string for every cell; useful for
//!   exercising segmentation without an OCR install and as a test double.

use image::DynamicImage;
use tabgrid_core::Result;

/// Recognizes the text content of a single cell image.
///
/// Contract: one call per cell, no cross-cell state, empty string for a blank
/// cell, [`tabgrid_core::TabgridError::Ocr`] for an engine failure. Failures
/// are cell-local; the caller records them without aborting the table.
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in one cell image.
    ///
    /// # Errors
    ///
    /// Returns [`tabgrid_core::TabgridError::Ocr`] when the engine cannot
    /// process the image.
    fn recognize(&self, cell: &DynamicImage) -> Result<String>;
}

/// Recognizer that returns the same text for every cell.
///
/// Used to run the pipeline without an OCR engine (segmentation debugging)
/// and as a deterministic stand-in under test.
#[derive(Debug, Clone, Default)]
pub struct FixedRecognizer {
    text: String,
}

impl FixedRecognizer {
    /// Create a recognizer that answers `text` for every cell.
    #[must_use = "recognizer is created but not used"]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextRecognizer for FixedRecognizer {
    #[inline]
    fn recognize(&self, _cell: &DynamicImage) -> Result<String> {
        Ok(self.text.clone())
    }
}

#[cfg(feature = "tesseract")]
mod tesseract {
    use super::TextRecognizer;
    use image::DynamicImage;
    use leptess::LepTess;
    use std::io::Cursor;
    use std::sync::Mutex;
    use tabgrid_core::{Result, TabgridError};

    /// Tesseract-backed recognizer (via leptess).
    ///
    /// The engine is created once and reused; `set_image_from_mem` resets its
    /// state between cells. A `LepTess` handle must not be shared across
    /// threads, hence the mutex.
    pub struct TesseractRecognizer {
        engine: Mutex<LepTess>,
    }

    impl TesseractRecognizer {
        /// Create a recognizer for the given language (e.g. `"eng"`), using
        /// the system tessdata path.
        ///
        /// # Errors
        ///
        /// Returns [`TabgridError::Ocr`] if the tesseract engine cannot be
        /// initialized (missing installation or language data).
        pub fn new(language: &str) -> Result<Self> {
            let engine = LepTess::new(None, language)
                .map_err(|e| TabgridError::Ocr(format!("failed to initialize tesseract: {e}")))?;
            log::info!("initialized tesseract engine for language {language}");
            Ok(Self {
                engine: Mutex::new(engine),
            })
        }
    }

    impl TextRecognizer for TesseractRecognizer {
        fn recognize(&self, cell: &DynamicImage) -> Result<String> {
            // Leptess reads encoded image bytes, not raw pixel buffers.
            let mut encoded = Vec::new();
            cell.write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Png)
                .map_err(|e| TabgridError::Ocr(format!("failed to encode cell image: {e}")))?;

            let mut engine = self
                .engine
                .lock()
                .map_err(|_| TabgridError::Ocr("tesseract engine mutex poisoned".to_string()))?;
            engine
                .set_image_from_mem(&encoded)
                .map_err(|e| TabgridError::Ocr(format!("failed to load cell image: {e}")))?;
            let text = engine
                .get_utf8_text()
                .map_err(|e| TabgridError::Ocr(format!("recognition failed: {e}")))?;

            Ok(text.trim().to_string())
        }
    }
}

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractRecognizer;
