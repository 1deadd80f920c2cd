//! Profession illustrations, generated once and kept on disk for good.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::careers::prompts::career_image_prompt;
use crate::content::single_flight::KeyedLocks;
use crate::content::store::{write_atomic, StoreError};
use crate::llm_client::{ImageGenerator, LlmError};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Image store failed: {0}")]
    Store(#[from] StoreError),
}

pub struct ImageCache {
    dir: PathBuf,
    generator: Arc<dyn ImageGenerator>,
    in_flight: KeyedLocks,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>, generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            dir: dir.into(),
            generator,
            in_flight: KeyedLocks::new(),
        }
    }

    pub fn image_path(&self, profession_id: &str) -> PathBuf {
        self.dir.join(format!("{profession_id}.png"))
    }

    /// PNG bytes for the profession, generating them on first request. The bytes
    /// are the content of the file at `image_path(profession_id)`, which exists
    /// whenever this returns `Ok`; handlers serve them without a second read.
    pub async fn get_or_generate(
        &self,
        profession_id: &str,
        title: &str,
    ) -> Result<Bytes, ImageError> {
        let path = self.image_path(profession_id);
        if let Some(bytes) = read_existing(&path).await? {
            info!("Using cached image for {}", profession_id);
            return Ok(bytes);
        }

        let _flight = self.in_flight.acquire(profession_id).await;
        if let Some(bytes) = read_existing(&path).await? {
            return Ok(bytes);
        }

        info!("Generating image for {}...", profession_id);
        let bytes = self
            .generator
            .generate_image(&career_image_prompt(title))
            .await?;

        write_atomic(&path, &bytes)?;
        info!("Saved career image: {} ({} bytes)", path.display(), bytes.len());
        Ok(bytes)
    }
}

async fn read_existing(path: &Path) -> Result<Option<Bytes>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(Bytes::from(bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StaticImageGenerator;
    use std::time::Duration;
    use tempfile::tempdir;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

    #[tokio::test]
    async fn test_generated_once_then_served_from_disk() {
        let dir = tempdir().unwrap();
        let generator = Arc::new(StaticImageGenerator::new(PNG));
        let cache = ImageCache::new(dir.path().join("career_images"), generator.clone());

        let first = cache.get_or_generate("chef", "Chef").await.unwrap();
        let second = cache.get_or_generate("chef", "Chef").await.unwrap();

        assert_eq!(first.as_ref(), PNG);
        assert_eq!(second, first);
        assert_eq!(generator.calls(), 1);
        assert!(generator.prompts()[0].contains("illustration of a Chef at work"));
        assert_eq!(std::fs::read(cache.image_path("chef")).unwrap(), PNG);
    }

    #[tokio::test]
    async fn test_existing_file_skips_generation() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("nurse.png"), b"on disk").unwrap();
        let generator = Arc::new(StaticImageGenerator::new(PNG));
        let cache = ImageCache::new(dir.path(), generator.clone());

        let bytes = cache.get_or_generate("nurse", "Nurse").await.unwrap();
        assert_eq!(bytes.as_ref(), b"on disk");
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_requests_generate_once() {
        let dir = tempdir().unwrap();
        let generator =
            Arc::new(StaticImageGenerator::new(PNG).with_delay(Duration::from_millis(50)));
        let cache = ImageCache::new(dir.path(), generator.clone());

        let (a, b, c) = tokio::join!(
            cache.get_or_generate("pilot", "Pilot"),
            cache.get_or_generate("pilot", "Pilot"),
            cache.get_or_generate("pilot", "Pilot"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(generator.calls(), 1);
    }
}
