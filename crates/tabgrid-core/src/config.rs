//! Pipeline configuration types.
//!
//! All tunables are explicit configuration passed to the components that use
//! them; there is no global state. The CLI deserializes [`PipelineConfig`]
//! from a TOML file, so every field carries serde defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default adjacent-pixel intensity difference below which a change is
/// treated as anti-aliasing noise rather than a rule-line edge.
pub const DEFAULT_NOISE_THRESHOLD: u8 = 8;

/// Default fraction of the opposite axis a column/row must be discontinuous
/// for to count as a candidate boundary.
pub const DEFAULT_BOUNDARY_FRACTION: f32 = 0.5;

/// Default pixel distance within which adjacent candidate boundaries are
/// merged into one logical boundary.
pub const DEFAULT_MERGE_DISTANCE: u32 = 2;

/// Tunables for the segmentation stages (transition detection and grid
/// inference).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentOptions {
    /// Adjacent intensities must differ by MORE than this to record a
    /// transition. 0 means "any difference"; the default of 8 suppresses
    /// anti-aliasing noise around rendered text and lines.
    #[serde(default = "default_noise_threshold")]
    pub noise_threshold: u8,

    /// A column (resp. row) is a candidate boundary when its transition count
    /// exceeds this fraction of the image height (resp. width). Rule lines
    /// span most of the table, stray text edges do not.
    #[serde(default = "default_boundary_fraction")]
    pub boundary_fraction: f32,

    /// Candidate boundaries within this many pixels of each other collapse
    /// into a single boundary at their midpoint (anti-aliased lines are
    /// several pixels wide).
    #[serde(default = "default_merge_distance")]
    pub merge_distance: u32,
}

impl Default for SegmentOptions {
    #[inline]
    fn default() -> Self {
        Self {
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            boundary_fraction: DEFAULT_BOUNDARY_FRACTION,
            merge_distance: DEFAULT_MERGE_DISTANCE,
        }
    }
}

const fn default_noise_threshold() -> u8 {
    DEFAULT_NOISE_THRESHOLD
}

const fn default_boundary_fraction() -> f32 {
    DEFAULT_BOUNDARY_FRACTION
}

const fn default_merge_distance() -> u32 {
    DEFAULT_MERGE_DISTANCE
}

/// Document acquisition tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOptions {
    /// Total request timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// A response is accepted only when its declared content type contains
    /// one of these substrings.
    #[serde(default = "default_allowed_content_types")]
    pub allowed_content_types: Vec<String>,

    /// Optional randomized delay applied after each fetch, as an inclusive
    /// `[min, max]` range in seconds. `None` disables rate limiting.
    #[serde(default)]
    pub delay_range_secs: Option<(u64, u64)>,
}

impl Default for FetchOptions {
    #[inline]
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            allowed_content_types: default_allowed_content_types(),
            delay_range_secs: None,
        }
    }
}

const fn default_fetch_timeout() -> u64 {
    30
}

const fn default_connect_timeout() -> u64 {
    10
}

fn default_allowed_content_types() -> Vec<String> {
    vec!["html".to_string(), "xml".to_string()]
}

/// Top-level pipeline configuration.
///
/// `input_dir` holds acquired source documents; rendered table images and
/// structured JSON results are written under `output_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory source documents are read from (and fetched into).
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory rendered images and table JSON are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Render subprocess timeout in seconds.
    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,

    /// Explicit path to the renderer binary. `None` means look up
    /// `wkhtmltoimage` on `PATH`.
    #[serde(default)]
    pub renderer_binary: Option<PathBuf>,

    /// OCR language passed to the recognition engine.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Segmentation tunables.
    #[serde(default)]
    pub segment: SegmentOptions,

    /// Acquisition tunables.
    #[serde(default)]
    pub fetch: FetchOptions,
}

impl Default for PipelineConfig {
    #[inline]
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            render_timeout_secs: default_render_timeout(),
            renderer_binary: None,
            ocr_language: default_ocr_language(),
            segment: SegmentOptions::default(),
            fetch: FetchOptions::default(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/processed")
}

const fn default_render_timeout() -> u64 {
    60
}

fn default_ocr_language() -> String {
    "eng".to_string()
}
