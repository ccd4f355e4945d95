//! Upload-dir persistence for the shared signature template image.

use std::path::PathBuf;

use chrono::Utc;
use uuid::Uuid;

use crate::config;
use crate::store::models::SignatureAsset;

const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("{0}")]
    Invalid(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

fn path_for(file_name: &str) -> PathBuf {
    PathBuf::from(&config::config().uploads.dir).join(file_name)
}

/// Validate and persist an uploaded signature image, returning the asset
/// reference to record in the store.
pub async fn save(bytes: &[u8], content_type: &str) -> Result<SignatureAsset, SignatureError> {
    if bytes.is_empty() {
        return Err(SignatureError::Invalid("Uploaded file is empty".into()));
    }
    let max = config::config().uploads.max_bytes;
    if bytes.len() > max {
        return Err(SignatureError::Invalid(format!(
            "File exceeds the {} byte upload limit",
            max
        )));
    }
    let ext = extension_for(content_type).ok_or_else(|| {
        SignatureError::Invalid(format!(
            "Unsupported content type '{}'; expected an image",
            content_type
        ))
    })?;

    let dir = PathBuf::from(&config::config().uploads.dir);
    tokio::fs::create_dir_all(&dir).await?;

    let file_name = format!("signature-{}.{}", Uuid::new_v4(), ext);
    tokio::fs::write(dir.join(&file_name), bytes).await?;

    Ok(SignatureAsset {
        file_name,
        content_type: content_type.to_string(),
        uploaded_at: Utc::now(),
    })
}

/// Read the stored signature bytes for certificate rendering.
pub async fn read(asset: &SignatureAsset) -> std::io::Result<Vec<u8>> {
    tokio::fs::read(path_for(&asset.file_name)).await
}

/// Best-effort removal of a replaced signature file.
pub async fn remove(asset: &SignatureAsset) {
    if let Err(e) = tokio::fs::remove_file(path_for(&asset.file_name)).await {
        tracing::warn!(file = %asset.file_name, "failed to remove replaced signature: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_empty_payload() {
        let err = save(&[], "image/png").await.unwrap_err();
        assert!(matches!(err, SignatureError::Invalid(_)));
    }

    #[tokio::test]
    async fn rejects_non_image_type() {
        let err = save(b"binary", "application/pdf").await.unwrap_err();
        assert!(matches!(err, SignatureError::Invalid(_)));
    }

    #[test]
    fn known_extensions() {
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("text/html"), None);
    }
}
