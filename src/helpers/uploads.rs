use actix_multipart::{Field, MultipartError};
use futures::TryStreamExt;
use rand::Rng;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("file exceeds the {0} byte upload limit")]
    TooLarge(usize),
    #[error("failed to read multipart field: {0}")]
    Stream(#[from] MultipartError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub file_name: String,
    pub original_name: String,
    pub url: String,
    pub size: usize,
}

/// Disk name for an upload. Only the extension of the client-supplied
/// name survives, which also keeps traversal characters out of the path.
pub fn unique_filename(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    let millis = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}{}", millis, nonce, extension)
}

/// Stream a multipart file field to the upload directory, enforcing the
/// size cap as chunks arrive. Oversized files are removed again.
pub async fn persist_field(
    field: &mut Field,
    directory: &Path,
    max_bytes: usize,
) -> Result<StoredUpload, UploadError> {
    let original_name = field
        .content_disposition()
        .get_filename()
        .unwrap_or("upload")
        .to_string();

    let file_name = unique_filename(&original_name);
    let destination = directory.join(&file_name);

    fs::create_dir_all(directory).await?;
    let mut file = fs::File::create(&destination).await?;
    let mut size = 0usize;

    while let Some(chunk) = field.try_next().await? {
        size += chunk.len();
        if size > max_bytes {
            drop(file);
            let _ = fs::remove_file(&destination).await;
            return Err(UploadError::TooLarge(max_bytes));
        }
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(StoredUpload {
        url: format!("/uploads/{}", file_name),
        file_name,
        original_name,
        size,
    })
}
