//! Portrait and overlay image loading.
//!
//! Loading is attempted directly; there is no existence pre-check. Any
//! failure (missing file, unreadable file, unrecognized data) is reported to
//! the caller, which switches the card to its "No Image" fallback.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Recognized image container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// RIFF/WEBP container
    Webp,
    /// PNG
    Png,
}

impl ImageFormat {
    /// Sniffs the format from the leading bytes of a file.
    #[must_use]
    pub fn sniff(header: &[u8]) -> Option<Self> {
        const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
        if header.len() >= 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else if header.starts_with(PNG_SIGNATURE) {
            Some(Self::Png)
        } else {
            None
        }
    }
}

/// Outcome of loading one image for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// The image loaded
    Loaded(ImageFormat),
    /// Loading failed; the fallback rendering applies
    Failed,
}

impl ImageStatus {
    /// Whether the fallback rendering applies.
    #[must_use]
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Resolves relative asset paths against an assets root and loads them.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    /// Creates a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Assets root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the image at `relative_path`.
    pub fn load(&self, relative_path: &str) -> Result<ImageFormat> {
        let path = self.root.join(relative_path);
        let mut file =
            File::open(&path).context(format!("Failed to open image: {}", path.display()))?;

        let mut header = [0u8; 12];
        let read = file
            .read(&mut header)
            .context(format!("Failed to read image: {}", path.display()))?;

        ImageFormat::sniff(&header[..read])
            .with_context(|| format!("Unrecognized image data: {}", path.display()))
    }

    /// Loads the image at `relative_path`, mapping failure to [`ImageStatus::Failed`].
    #[must_use]
    pub fn status(&self, relative_path: &str) -> ImageStatus {
        match self.load(relative_path) {
            Ok(format) => ImageStatus::Loaded(format),
            Err(e) => {
                tracing::debug!(path = relative_path, error = %e, "image fallback");
                ImageStatus::Failed
            }
        }
    }
}
