use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR_NAME: &str = "reports";

/// The default output directory, `./reports`, relative to wherever the
/// process runs.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR_NAME)
}

pub async fn ensure_output_dir_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("output path exists but is not a directory: {}", path.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_a_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports");
        ensure_output_dir_exists(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn accepts_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        ensure_output_dir_exists(dir.path()).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_a_file_in_the_way() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports");
        std::fs::write(&target, b"not a directory").unwrap();
        assert!(ensure_output_dir_exists(&target).await.is_err());
    }
}
