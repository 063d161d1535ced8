//! Markup-to-image rendering.
//!
//! Rendering is an external collaborator: the production implementation
//! shells out to the `wkhtmltoimage` binary through a temporary directory and
//! decodes the PNG it produces. The subprocess is killed if it exceeds the
//! configured timeout so one hung render cannot stall a batch.

use image::DynamicImage;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tabgrid_core::{Result, TabgridError};

/// Renders one markup fragment to a raster image.
///
/// Implementations must be `Send + Sync`: fragments of independent tables are
/// rendered from parallel workers.
pub trait TableRenderer: Send + Sync {
    /// Render a table fragment to an image.
    ///
    /// # Errors
    ///
    /// Returns [`TabgridError::Render`] when the fragment cannot be rendered.
    fn render(&self, fragment: &str) -> Result<DynamicImage>;
}

/// Renderer backed by the `wkhtmltoimage` command-line tool.
pub struct WkhtmltoimageRenderer {
    binary: PathBuf,
    timeout: Duration,
}

impl WkhtmltoimageRenderer {
    /// Locate `wkhtmltoimage` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`TabgridError::Render`] if the binary is not installed.
    pub fn new(timeout: Duration) -> Result<Self> {
        let binary = which::which("wkhtmltoimage").map_err(|e| {
            TabgridError::Render(format!("wkhtmltoimage not found in PATH: {e}"))
        })?;
        log::debug!("using renderer binary {}", binary.display());
        Ok(Self { binary, timeout })
    }

    /// Use an explicit renderer binary path.
    #[must_use = "renderer is created but not used"]
    pub const fn with_binary(binary: PathBuf, timeout: Duration) -> Self {
        Self { binary, timeout }
    }
}

impl TableRenderer for WkhtmltoimageRenderer {
    fn render(&self, fragment: &str) -> Result<DynamicImage> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("fragment.html");
        let output = dir.path().join("fragment.png");
        std::fs::write(&input, fragment)?;

        let mut child = Command::new(&self.binary)
            .arg("--format")
            .arg("png")
            .arg("--quiet")
            .arg(&input)
            .arg(&output)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TabgridError::Render(format!(
                    "failed to spawn {}: {e}",
                    self.binary.display()
                ))
            })?;

        let status = wait_with_timeout(&mut child, self.timeout)?;
        if !status.success() {
            let stderr = child
                .stderr
                .take()
                .and_then(|mut s| {
                    use std::io::Read;
                    let mut buf = String::new();
                    s.read_to_string(&mut buf).ok().map(|_| buf)
                })
                .unwrap_or_default();
            return Err(TabgridError::Render(format!(
                "renderer exited with {status}: {}",
                stderr.trim()
            )));
        }

        let image = image::ImageReader::open(&output)
            .map_err(|e| TabgridError::Render(format!("failed to open rendered image: {e}")))?
            .decode()
            .map_err(|e| TabgridError::Render(format!("failed to decode rendered image: {e}")))?;
        Ok(image)
    }
}

/// Wait for a child process, killing it when the deadline passes.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TabgridError::Render(format!(
                "renderer timed out after {}s",
                timeout.as_secs()
            )));
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
