//! Store logo fetching and caching
//!
//! Logos are configured as URLs. Each URL is fetched once and cached on
//! disk under its SHA-256 hash, so reprints and power cycles never
//! re-download. A fetch or decode failure is reported to the caller,
//! which prints the receipt without a logo.

use std::path::{Path, PathBuf};

use meltemi_printer::{PrintError, PrintResult, RasterImage, logo_raster};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

pub struct LogoCache {
    dir: PathBuf,
    client: reqwest::Client,
}

impl LogoCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Cache file path for a URL
    pub fn path_for(&self, url: &str) -> PathBuf {
        let hash = hex::encode(Sha256::digest(url.as_bytes()));
        self.dir.join(hash)
    }

    /// Fetch the logo image, hitting the network only on a cache miss
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> PrintResult<Vec<u8>> {
        let path = self.path_for(url);
        if let Ok(bytes) = tokio::fs::read(&path).await {
            debug!(path = %path.display(), "logo cache hit");
            return Ok(bytes);
        }

        info!("downloading logo");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PrintError::Connection(format!("Logo fetch failed: {}", e)))?
            .error_for_status()
            .map_err(|e| PrintError::Connection(format!("Logo fetch failed: {}", e)))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PrintError::Connection(format!("Logo fetch failed: {}", e)))?
            .to_vec();

        self.store(&path, &bytes).await?;
        Ok(bytes)
    }

    /// Fetch, decode and rasterize a logo at the given paper width
    pub async fn raster(&self, url: &str, max_width_px: usize) -> PrintResult<RasterImage> {
        let bytes = self.fetch(url).await?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| PrintError::Render(format!("Logo decode failed: {}", e)))?;
        logo_raster(&decoded, max_width_px)
    }

    /// Write via a temp file so a crash mid-write never leaves a
    /// truncated cache entry behind.
    async fn store(&self, path: &Path, bytes: &[u8]) -> PrintResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let dir = self.dir.clone();
        let path = path.to_path_buf();
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || -> PrintResult<()> {
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            std::io::Write::write_all(&mut tmp, &bytes)?;
            tmp.persist(&path)
                .map_err(|e| PrintError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| PrintError::Render(format!("Cache write task failed: {}", e)))?
    }
}
