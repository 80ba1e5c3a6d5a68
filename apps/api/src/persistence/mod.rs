//! Durable mirror of the resume document.
//!
//! The store writes the whole document to one fixed key after every mutation
//! and reads it back once at startup. Backends implement [`KeyValueStorage`];
//! the envelope format lives in [`schema`].

pub mod file;
pub mod memory;
pub mod redis_store;
pub mod schema;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::ResumeDocument;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use redis_store::RedisStorage;

/// The single durable slot holding the serialized resume.
pub const STORAGE_KEY: &str = "resume-storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Storage task failed: {0}")]
    Task(String),
}

/// A profile-scoped string key-value store that survives process restarts.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads the persisted document, falling back to defaults on absence or any
/// read/parse failure. Never fails.
pub async fn load(storage: &dyn KeyValueStorage) -> ResumeDocument {
    let raw = match storage.get(STORAGE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("No persisted resume found, starting from defaults");
            return ResumeDocument::default();
        }
        Err(e) => {
            warn!("Failed to read persisted resume, starting from defaults: {e}");
            return ResumeDocument::default();
        }
    };

    match schema::decode(&raw) {
        Ok(document) => {
            info!(
                "Restored resume: {} experience, {} education, {} skills, {} projects, step {}",
                document.experience.len(),
                document.education.len(),
                document.skills.len(),
                document.projects.len(),
                document.current_step
            );
            document
        }
        Err(e) => {
            warn!("Persisted resume is unreadable, starting from defaults: {e}");
            ResumeDocument::default()
        }
    }
}

/// Mirrors the document to durable storage. Failures are logged and dropped;
/// there is no retry.
pub async fn save(storage: &dyn KeyValueStorage, document: &ResumeDocument) {
    let encoded = match schema::encode(document) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Failed to serialize resume for persistence: {e}");
            return;
        }
    };
    if let Err(e) = storage.set(STORAGE_KEY, &encoded).await {
        warn!("Failed to persist resume: {e}");
    }
}

/// Empties the durable slot. A failure is logged and dropped like in [`save`].
pub async fn clear(storage: &dyn KeyValueStorage) {
    if let Err(e) = storage.remove(STORAGE_KEY).await {
        warn!("Failed to clear persisted resume: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Skill, SkillLevel, TemplateChoice};

    #[tokio::test]
    async fn test_load_absent_returns_defaults() {
        let storage = MemoryStorage::new();
        assert_eq!(load(&storage).await, ResumeDocument::default());
    }

    #[tokio::test]
    async fn test_load_garbage_returns_defaults() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "{not json").await.unwrap();
        assert_eq!(load(&storage).await, ResumeDocument::default());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let storage = MemoryStorage::new();
        let document = ResumeDocument {
            skills: vec![Skill {
                id: "s1".to_string(),
                name: "Rust".to_string(),
                level: SkillLevel::new(5),
            }],
            selected_template: TemplateChoice::Minimal,
            current_step: 3,
            ..ResumeDocument::default()
        };
        save(&storage, &document).await;
        assert_eq!(load(&storage).await, document);
    }

    #[tokio::test]
    async fn test_clear_empties_the_slot() {
        let storage = MemoryStorage::new();
        save(&storage, &ResumeDocument::default()).await;
        assert!(storage.get(STORAGE_KEY).await.unwrap().is_some());

        clear(&storage).await;
        assert_eq!(storage.get(STORAGE_KEY).await.unwrap(), None);
        clear(&storage).await;
    }
}
