use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::{GeneratedImage, HappuError};

/// Write the image bytes to `output_dir/filename`, creating the directory
pub async fn save_image(
    image: &GeneratedImage,
    output_dir: &Path,
    filename: &str,
) -> Result<PathBuf, HappuError> {
    let bytes = image.bytes()?;

    fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(filename);
    fs::write(&path, &bytes).await?;

    tracing::info!("Saved image to: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GenerationRequest, PREVIEW_EXPORT_FILENAME};
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

    #[tokio::test]
    async fn writes_decoded_bytes_under_the_given_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let image = GeneratedImage::from_payload(
            &GenerationRequest::new("fox"),
            &BASE64.encode(b"png-bytes"),
        );

        let grid = save_image(&image, &out, &image.export_filename()).await.unwrap();
        let preview = save_image(&image, &out, PREVIEW_EXPORT_FILENAME).await.unwrap();

        assert_eq!(grid, out.join(format!("happu-export-{}.png", image.id)));
        assert_eq!(preview, out.join("happu-asset-export.png"));
        assert_eq!(std::fs::read(grid).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn undecodable_payloads_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let image = GeneratedImage::from_payload(&GenerationRequest::new("fox"), "not base64!");

        let err = save_image(&image, dir.path(), "x.png").await.unwrap_err();

        assert!(matches!(err, HappuError::ImageError(_)));
        assert!(!dir.path().join("x.png").exists());
    }
}
