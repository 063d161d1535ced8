//! # Tabgrid Pipeline - Orchestration and External Collaborators
//!
//! Ties the pipeline together: acquisition, table extraction, rendering,
//! segmentation and recognition, document by document.
//!
//! ```text
//! fetch (reqwest) ──> extract_tables (scraper) ──> render (wkhtmltoimage)
//!                                                      │
//!                         TableReconstructor <─────────┘
//!                (segment via tabgrid-segment, OCR via tabgrid-ocr)
//!                                                      │
//!                         DocumentResult JSON <────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fetch`] - HTTP acquisition with content-type allow-list and optional
//!   randomized rate-limit delay
//! - [`html`] - `<table>` fragment extraction from markup
//! - [`render`] - the [`render::TableRenderer`] collaborator seam and the
//!   `wkhtmltoimage` implementation
//! - [`reconstruct`] - per-table orchestration with partial-failure OCR
//!   semantics
//! - [`driver`] - per-document and batch orchestration
//!
//! ## Concurrency
//!
//! Documents, tables within a document, and cells within a table are all
//! independent units; each level fans out on the rayon worker pool. The
//! segmentation stages are pure in-memory transforms - the only suspension
//! points are fetch, render and OCR, and each carries its own timeout.

pub mod driver;
pub mod fetch;
pub mod html;
pub mod reconstruct;
pub mod render;

pub use driver::PipelineDriver;
pub use fetch::DocumentFetcher;
pub use html::extract_tables;
pub use reconstruct::TableReconstructor;
pub use render::{TableRenderer, WkhtmltoimageRenderer};
