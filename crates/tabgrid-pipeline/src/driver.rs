//! Top-level orchestration: documents in, structured table results out.

use crate::html::extract_tables;
use crate::reconstruct::TableReconstructor;
use crate::render::TableRenderer;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tabgrid_core::{DocumentResult, PipelineConfig, RecognizedTable, Result, TabgridError};
use tabgrid_ocr::TextRecognizer;

/// Per-document pipeline driver.
///
/// For each document: read markup from the input directory, extract its
/// table fragments, render each fragment, persist the rendered image under
/// the output directory (`<stem>_<index>.png`), and reconstruct the table.
///
/// Failure containment: a render or segmentation failure aborts only that
/// table; a read failure aborts only that document. Nothing aborts a batch.
/// All extracted fragments are processed.
pub struct PipelineDriver {
    config: PipelineConfig,
    reconstructor: TableReconstructor,
    renderer: Box<dyn TableRenderer>,
    recognizer: Box<dyn TextRecognizer>,
}

impl PipelineDriver {
    /// Build a driver from configuration and its two external collaborators.
    #[must_use = "driver is created but not used"]
    pub fn new(
        config: PipelineConfig,
        renderer: Box<dyn TableRenderer>,
        recognizer: Box<dyn TextRecognizer>,
    ) -> Self {
        let reconstructor = TableReconstructor::new(config.segment);
        Self {
            config,
            reconstructor,
            renderer,
            recognizer,
        }
    }

    /// The driver's configuration.
    #[inline]
    #[must_use = "configuration reference is returned but not used"]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// List processable documents (`.html`, `.htm`, `.xml`) in the input
    /// directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`TabgridError::Io`] if the input directory cannot be read.
    pub fn discover_documents(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.config.input_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_document = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| {
                    let e = e.to_ascii_lowercase();
                    e == "html" || e == "htm" || e == "xml"
                });
            if is_document {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Process one document from the input directory.
    ///
    /// Never fails: acquisition and per-table errors are recorded inside the
    /// returned [`DocumentResult`].
    pub fn process_document(&self, filename: &str) -> DocumentResult {
        let path = self.config.input_dir.join(filename);
        log::info!("processing document {}", path.display());

        let markup = match std::fs::read_to_string(&path) {
            Ok(markup) => markup,
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                return DocumentResult::failed(filename, format!("failed to read document: {e}"));
            }
        };

        let fragments = match extract_tables(&markup) {
            Ok(fragments) => fragments,
            Err(e) => return DocumentResult::failed(filename, e.to_string()),
        };
        if fragments.is_empty() {
            log::info!("{filename}: no tables found");
        }

        let stem = document_stem(filename);

        // Tables within a document are independent; process them in
        // parallel, preserving document order in the collected results.
        let outcomes: Vec<(usize, Result<RecognizedTable>)> = fragments
            .par_iter()
            .enumerate()
            .map(|(index, fragment)| (index, self.process_fragment(&stem, index, fragment)))
            .collect();

        let mut tables = Vec::new();
        let mut errors = Vec::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(table) => tables.push(table),
                Err(e) => {
                    log::warn!("{filename}: table {index} failed: {e}");
                    errors.push(format!("table {index}: {e}"));
                }
            }
        }

        DocumentResult {
            source: filename.to_string(),
            tables,
            errors,
        }
    }

    /// Process every named document, in parallel. Documents are independent;
    /// one failing document never affects its siblings.
    #[must_use = "batch results are returned but not used"]
    pub fn process_batch(&self, filenames: &[String]) -> Vec<DocumentResult> {
        filenames
            .par_iter()
            .map(|filename| self.process_document(filename))
            .collect()
    }

    /// Write a document's structured result as pretty JSON to
    /// `<output_dir>/<stem>.tables.json`.
    ///
    /// # Errors
    ///
    /// Returns [`TabgridError::Io`] or [`TabgridError::Json`] on write
    /// failures.
    pub fn write_result(&self, result: &DocumentResult) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        let path = self
            .config
            .output_dir
            .join(format!("{}.tables.json", document_stem(&result.source)));
        std::fs::write(&path, result.to_json()?)?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Render one fragment, persist the image, reconstruct the table.
    fn process_fragment(&self, stem: &str, index: usize, fragment: &str) -> Result<RecognizedTable> {
        let image = self.renderer.render(fragment)?;

        std::fs::create_dir_all(&self.config.output_dir)?;
        let image_path = self.config.output_dir.join(format!("{stem}_{index}.png"));
        image.save(&image_path).map_err(|e| {
            TabgridError::Render(format!(
                "failed to persist rendered image {}: {e}",
                image_path.display()
            ))
        })?;
        log::debug!("saved rendered table to {}", image_path.display());

        self.reconstructor
            .reconstruct(&image, self.recognizer.as_ref())
    }
}

/// File stem used for derived artifact names (`report.htm` -> `report`).
fn document_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map_or_else(|| filename.to_string(), |s| s.to_string_lossy().into_owned())
}
