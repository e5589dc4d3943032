use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::collections::BTreeSet;

use crate::core::procedure::SWIPE_MATCH_LIBRARY;
use crate::error::{Result, SwipeError};
use crate::services::store::SwipeStore;

/// Redis-backed swipe store
///
/// The swipe-and-match procedure runs as a Redis function (`FCALL`), which
/// Redis executes without interleaving any other command.
/// `ConnectionManager` is cheap to clone and multiplexes one connection, so
/// each call clones it instead of locking.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at `redis_url`
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| SwipeError::Config(format!("invalid Redis URL {}: {}", redis_url, e)))?;
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            SwipeError::Connection(format!("failed to connect to Redis at {}: {}", redis_url, e))
        })?;

        tracing::debug!("Connected to Redis at {}", redis_url);
        Ok(Self { conn })
    }
}

#[async_trait]
impl SwipeStore for RedisStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn add_to_set(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: i64 = redis::cmd("SADD")
            .arg(key)
            .arg(member)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn members_of(&self, key: &str) -> Result<BTreeSet<String>> {
        let mut conn = self.conn.clone();
        let members: Vec<String> = redis::cmd("SMEMBERS")
            .arg(key)
            .query_async(&mut conn)
            .await?;
        Ok(members.into_iter().collect())
    }

    async fn run_atomic_procedure(
        &self,
        name: &str,
        keys: &[String],
        args: &[String],
    ) -> Result<i64> {
        let mut cmd = redis::cmd("FCALL");
        cmd.arg(name).arg(keys.len());
        for key in keys {
            cmd.arg(key);
        }
        for arg in args {
            cmd.arg(arg);
        }

        let mut conn = self.conn.clone();
        let value: i64 = cmd.query_async(&mut conn).await?;
        Ok(value)
    }

    async fn register_procedures(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let library: String = redis::cmd("FUNCTION")
            .arg("LOAD")
            .arg("REPLACE")
            .arg(SWIPE_MATCH_LIBRARY)
            .query_async(&mut conn)
            .await?;

        tracing::info!("Redis function library '{}' loaded", library);
        Ok(())
    }

    async fn reset(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHALL").query_async(&mut conn).await?;
        tracing::debug!("Flushed Redis database");
        Ok(())
    }
}
