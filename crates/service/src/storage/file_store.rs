use std::{io::ErrorKind, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;
use uuid::Uuid;

use super::StrengthStore;
use crate::errors::StrengthError;

/// File-backed store holding the record in a single file.
///
/// Writes go to a sibling temp file that is synced and then renamed over the
/// target, so readers see either the old or the new record, never a torn one.
#[derive(Clone, Debug)]
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    /// Initialize the store for `path`, creating parent directories. The file
    /// itself is not created until the first store.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StrengthError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        Ok(Arc::new(Self { file_path }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "strength".to_string());
        self.file_path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
    }
}

#[async_trait]
impl StrengthStore for FileStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StrengthError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            // no write yet
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, bytes: &[u8]) -> Result<(), StrengthError> {
        let temp_path = self.temp_path();
        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, &self.file_path).await
        }
        .await;

        // never leave a stray temp file next to the record
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        debug!(path = %self.file_path.display(), bytes = bytes.len(), "strength record replaced");
        Ok(())
    }
}
