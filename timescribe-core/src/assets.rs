//! Example audio asset fetch
//!
//! Best-effort download of a public sample clip so a front end can demo
//! transcription without the user supplying audio. A network failure here
//! only disables the example feature, never core transcription.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Public sample clip (LibriSpeech excerpt)
pub const EXAMPLE_AUDIO_URL: &str =
    "https://dldata-public.s3.us-east-2.amazonaws.com/2086-149220-0033.wav";

/// Filename the sample is cached under
pub const EXAMPLE_AUDIO_FILENAME: &str = "example-audio.wav";

/// Path the example clip would be cached at inside `assets_dir`
pub fn example_audio_path(assets_dir: &Path) -> PathBuf {
    assets_dir.join(EXAMPLE_AUDIO_FILENAME)
}

/// Download the example clip into `assets_dir` unless it is already cached
pub async fn ensure_example_audio(assets_dir: &Path) -> Result<PathBuf> {
    let dest = example_audio_path(assets_dir);
    if dest.exists() {
        info!("Example audio already cached at {:?}", dest);
        return Ok(dest);
    }

    fs::create_dir_all(assets_dir).await?;

    info!("Downloading example audio to {:?}", dest);
    let response = reqwest::get(EXAMPLE_AUDIO_URL)
        .await
        .map_err(|e| Error::Download(format!("Failed to fetch example audio: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "Example audio fetch failed with status: {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Download(format!("Failed to read example audio body: {}", e)))?;

    let mut file = fs::File::create(&dest).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;

    info!("Example audio cached at {:?}", dest);
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_audio_path() {
        let path = example_audio_path(Path::new("/tmp/assets"));
        assert_eq!(path, PathBuf::from("/tmp/assets/example-audio.wav"));
    }

    #[tokio::test]
    async fn test_cached_example_is_not_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let cached = example_audio_path(dir.path());
        fs::write(&cached, b"riff").await.unwrap();

        // Returns the cached path without touching the network
        let path = ensure_example_audio(dir.path()).await.unwrap();
        assert_eq!(path, cached);
        assert_eq!(fs::read(&path).await.unwrap(), b"riff");
    }
}
