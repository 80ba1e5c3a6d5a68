use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use super::{KeyValueStorage, StorageError};

/// Redis-backed storage. Keys are namespaced by profile: `<profile>:<key>`.
#[derive(Clone)]
pub struct RedisStorage {
    conn: MultiplexedConnection,
    profile: String,
}

impl RedisStorage {
    pub async fn connect(url: &str, profile: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis storage connected (profile: {profile})");
        Ok(Self {
            conn,
            profile: profile.to_owned(),
        })
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}:{}", self.profile, key)
    }
}

#[async_trait]
impl KeyValueStorage for RedisStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.scoped(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.scoped(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.scoped(key)).await?;
        Ok(())
    }
}
