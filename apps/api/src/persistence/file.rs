use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::debug;

use super::{KeyValueStorage, StorageError};

/// One JSON file per key under `<root>/<profile>/`.
///
/// Writes go to a temp file in the same directory and are renamed into place,
/// so a crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl AsRef<Path>, profile: &str) -> Self {
        Self {
            dir: root.as_ref().join(sanitize(profile)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(key)))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.dir.clone();
        let path = self.path_for(key);
        let value = value.to_owned();

        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(value.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&path).map_err(|e| e.error)?;
            debug!("Wrote {} bytes to {}", value.len(), path.display());
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps keys and profile names safe to use as a single path component.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "default".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let root = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(root.path(), "alice");
        assert!(storage.get("resume-storage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_get_overwrite_remove() {
        let root = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(root.path(), "alice");

        storage.set("resume-storage", "{\"a\":1}").await.unwrap();
        storage.set("resume-storage", "{\"a\":2}").await.unwrap();
        assert_eq!(
            storage.get("resume-storage").await.unwrap().as_deref(),
            Some("{\"a\":2}")
        );

        storage.remove("resume-storage").await.unwrap();
        storage.remove("resume-storage").await.unwrap();
        assert!(storage.get("resume-storage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profiles_are_isolated() {
        let root = tempfile::tempdir().unwrap();
        let alice = FileStorage::new(root.path(), "alice");
        let bob = FileStorage::new(root.path(), "bob");

        alice.set("resume-storage", "alice").await.unwrap();
        assert!(bob.get("resume-storage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_temp_files_left_after_write() {
        let root = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(root.path(), "alice");
        storage.set("resume-storage", "x").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(storage.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["resume-storage.json".to_string()]);
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        assert_eq!(sanitize("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize(""), "default");
    }
}
