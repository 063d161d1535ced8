//! Document acquisition over HTTP.
//!
//! Thin adapter around a blocking reqwest client: fetch bytes, validate the
//! declared content type against an allow-list, and optionally sleep a
//! randomized delay afterwards so repeated fetches against the same host are
//! paced. The delay is applied per call, on the calling worker only; it never
//! blocks other workers.

use rand::Rng;
use std::path::Path;
use std::time::Duration;
use tabgrid_core::{FetchOptions, Result, TabgridError};

/// Fetches source documents and enforces the acquisition policy
/// (timeouts, content-type allow-list, rate-limit delay).
pub struct DocumentFetcher {
    client: reqwest::blocking::Client,
    options: FetchOptions,
}

impl DocumentFetcher {
    /// Build a fetcher with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`TabgridError::Fetch`] if the HTTP client cannot be
    /// constructed.
    pub fn new(options: FetchOptions) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
            .build()
            .map_err(|e| TabgridError::Fetch {
                url: String::new(),
                status: None,
                content_type: None,
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, options })
    }

    /// Fetch the document at `url` and return its raw bytes.
    ///
    /// The response is accepted only when the status is successful and the
    /// declared content type contains one of the allowed substrings. After a
    /// successful fetch the configured randomized delay (if any) is slept on
    /// the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`TabgridError::Fetch`] for transport failures, non-success
    /// statuses and disallowed content types.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TabgridError::Fetch {
                url: url.to_string(),
                status: None,
                content_type: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        if !status.is_success() {
            return Err(TabgridError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                content_type,
                message: format!("unexpected status {status}"),
            });
        }

        let declared = content_type.clone().unwrap_or_default();
        if !content_type_allowed(&declared, &self.options.allowed_content_types) {
            return Err(TabgridError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                content_type,
                message: format!("disallowed content type: {declared:?}"),
            });
        }

        let bytes = response.bytes().map_err(|e| TabgridError::Fetch {
            url: url.to_string(),
            status: Some(status.as_u16()),
            content_type,
            message: format!("failed to read body: {e}"),
        })?;

        log::info!("fetched {} bytes from {url}", bytes.len());
        self.apply_delay();
        Ok(bytes.to_vec())
    }

    /// Fetch `url` and persist the bytes to `path`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`TabgridError::Fetch`] for acquisition failures and
    /// [`TabgridError::Io`] if the file cannot be written.
    pub fn fetch_to(&self, url: &str, path: &Path) -> Result<()> {
        let bytes = self.fetch(url)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Sleep the configured randomized delay, if any.
    fn apply_delay(&self) {
        if let Some((min, max)) = self.options.delay_range_secs {
            let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
            let secs = rand::thread_rng().gen_range(lo..=hi);
            log::debug!("rate-limit delay: sleeping {secs}s");
            std::thread::sleep(Duration::from_secs(secs));
        }
    }
}

/// True when the declared content type contains one of the allowed
/// substrings (e.g. `"text/html; charset=utf-8"` matches `"html"`).
fn content_type_allowed(declared: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|a| declared.contains(a.as_str()))
}
