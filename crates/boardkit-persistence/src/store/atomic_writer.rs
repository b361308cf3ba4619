use boardkit_core::BoardResult;
use std::path::Path;
use tokio::fs;

/// Writes files through a sibling temp file and a rename, so readers never
/// observe a half-written file.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> BoardResult<()> {
        // Temp file must live on the same filesystem for the rename
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.into_temp_path();

        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;
        // Already renamed away; nothing left to clean up
        let _ = temp_path.keep();

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// `None` when the file does not exist
    pub async fn read_optional(path: &Path) -> BoardResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("page.json");

        AtomicWriter::write_atomic(&file_path, b"First").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").await.unwrap();

        let read = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(read.as_deref(), Some(&b"Second"[..]));
        // Only the target remains in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("data.json");
        AtomicWriter::write_atomic(&file_path, b"{}").await.unwrap();
        assert!(file_path.exists());
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempdir().unwrap();
        let read = AtomicWriter::read_optional(&dir.path().join("nope.json"))
            .await
            .unwrap();
        assert!(read.is_none());
    }
}
