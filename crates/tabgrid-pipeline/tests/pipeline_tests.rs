//! End-to-end pipeline tests with stub collaborators.
//!
//! The renderer is replaced by a stub that draws a ruled table image in
//! memory, and OCR by the fixed recognizer, so the full document -> tables
//! flow runs hermetically.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tabgrid_core::{PipelineConfig, Result, TabgridError};
use tabgrid_ocr::FixedRecognizer;
use tabgrid_pipeline::{PipelineDriver, TableRenderer};

/// Renders every fragment as a fixed 2x2 ruled table image; fragments
/// containing the marker string fail instead.
struct StubRenderer {
    fail_marker: Option<String>,
}

impl StubRenderer {
    fn reliable() -> Self {
        Self { fail_marker: None }
    }

    fn failing_on(marker: &str) -> Self {
        Self {
            fail_marker: Some(marker.to_string()),
        }
    }
}

impl TableRenderer for StubRenderer {
    fn render(&self, fragment: &str) -> Result<DynamicImage> {
        if let Some(marker) = &self.fail_marker {
            if fragment.contains(marker.as_str()) {
                return Err(TabgridError::Render("stub renderer refused".to_string()));
            }
        }

        let mut img = RgbImage::new(40, 40);
        for pixel in img.pixels_mut() {
            *pixel = Rgb([255, 255, 255]);
        }
        draw_filled_rect_mut(&mut img, Rect::at(19, 0).of_size(2, 40), Rgb([0, 0, 0]));
        draw_filled_rect_mut(&mut img, Rect::at(0, 19).of_size(40, 2), Rgb([0, 0, 0]));
        Ok(DynamicImage::ImageRgb8(img))
    }
}

/// Driver over temp dirs; returns the tempdir guards alongside it.
fn driver_with(
    renderer: StubRenderer,
) -> (PipelineDriver, tempfile::TempDir, tempfile::TempDir) {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        input_dir: input.path().to_path_buf(),
        output_dir: output.path().to_path_buf(),
        ..PipelineConfig::default()
    };
    let driver = PipelineDriver::new(
        config,
        Box::new(renderer),
        Box::new(FixedRecognizer::new("cell")),
    );
    (driver, input, output)
}

const TWO_TABLE_DOC: &str = r"
    <html><body>
        <h1>Annual report</h1>
        <table><tr><td>a</td><td>b</td></tr></table>
        <p>between</p>
        <table class='totals'><tr><td>c</td><td>d</td></tr></table>
    </body></html>
";

#[test]
fn processes_every_table_in_a_document() {
    let (driver, input, _output) = driver_with(StubRenderer::reliable());
    std::fs::write(input.path().join("report.htm"), TWO_TABLE_DOC).unwrap();

    let result = driver.process_document("report.htm");
    assert_eq!(result.source, "report.htm");
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.tables.len(), 2);
    for table in &result.tables {
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_cols(), 2);
        assert_eq!(table.text(0, 0), Some("cell"));
    }
}

#[test]
fn rendered_images_are_persisted_per_table() {
    let (driver, input, output) = driver_with(StubRenderer::reliable());
    std::fs::write(input.path().join("report.htm"), TWO_TABLE_DOC).unwrap();

    driver.process_document("report.htm");

    assert!(output.path().join("report_0.png").exists());
    assert!(output.path().join("report_1.png").exists());

    // The persisted artifact is a decodable image of the rendered size.
    use image::GenericImageView;
    let persisted = image::open(output.path().join("report_0.png")).unwrap();
    assert_eq!(persisted.dimensions(), (40, 40));
}

#[test]
fn render_failure_aborts_only_that_table() {
    let (driver, input, _output) = driver_with(StubRenderer::failing_on("totals"));
    std::fs::write(input.path().join("report.htm"), TWO_TABLE_DOC).unwrap();

    let result = driver.process_document("report.htm");
    assert_eq!(result.tables.len(), 1, "the good table must survive");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("table 1"));
    assert!(result.errors[0].contains("stub renderer refused"));
}

#[test]
fn missing_document_fails_alone() {
    let (driver, input, _output) = driver_with(StubRenderer::reliable());
    std::fs::write(input.path().join("good.htm"), TWO_TABLE_DOC).unwrap();

    let results = driver.process_batch(&["good.htm".to_string(), "missing.htm".to_string()]);
    assert_eq!(results.len(), 2);

    let good = results.iter().find(|r| r.source == "good.htm").unwrap();
    assert_eq!(good.tables.len(), 2);
    assert!(good.errors.is_empty());

    let missing = results.iter().find(|r| r.source == "missing.htm").unwrap();
    assert!(missing.tables.is_empty());
    assert_eq!(missing.errors.len(), 1);
    assert!(missing.errors[0].contains("failed to read document"));
}

#[test]
fn document_without_tables_yields_empty_result() {
    let (driver, input, _output) = driver_with(StubRenderer::reliable());
    std::fs::write(
        input.path().join("plain.html"),
        "<html><body><p>prose only</p></body></html>",
    )
    .unwrap();

    let result = driver.process_document("plain.html");
    assert!(result.tables.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn discovery_lists_documents_sorted() {
    let (driver, input, _output) = driver_with(StubRenderer::reliable());
    std::fs::write(input.path().join("b.html"), "x").unwrap();
    std::fs::write(input.path().join("a.htm"), "x").unwrap();
    std::fs::write(input.path().join("c.XML"), "x").unwrap();
    std::fs::write(input.path().join("notes.txt"), "x").unwrap();

    let documents = driver.discover_documents().unwrap();
    assert_eq!(documents, vec!["a.htm", "b.html", "c.XML"]);
}

#[test]
fn results_round_trip_through_json() {
    let (driver, input, output) = driver_with(StubRenderer::reliable());
    std::fs::write(input.path().join("report.htm"), TWO_TABLE_DOC).unwrap();

    let result = driver.process_document("report.htm");
    let path = driver.write_result(&result).unwrap();
    assert_eq!(path, output.path().join("report.tables.json"));

    let json = std::fs::read_to_string(&path).unwrap();
    let parsed: tabgrid_core::DocumentResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
}
