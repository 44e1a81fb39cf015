use async_trait::async_trait;
use paseo_core::{MetaValue, OrderMetaRepository, RepositoryError};
use redis::AsyncCommands;
use tracing::{debug, warn};
use uuid::Uuid;

/// Order metadata kept in one redis hash per order (`order:<id>:meta`), one JSON-encoded field
/// per metadata key.
#[derive(Clone)]
pub struct RedisMetaRepository {
    client: redis::Client,
}

pub fn meta_hash_key(order_id: Uuid) -> String {
    format!("order:{}:meta", order_id)
}

impl RedisMetaRepository {
    pub fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OrderMetaRepository for RedisMetaRepository {
    async fn set_meta(
        &self,
        order_id: Uuid,
        key: &str,
        value: MetaValue,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let encoded = value.encode()?;
        conn.hset::<_, _, _, ()>(meta_hash_key(order_id), key, encoded).await?;
        debug!(%order_id, key, "meta written");
        Ok(())
    }

    async fn get_meta(
        &self,
        order_id: Uuid,
        key: &str,
    ) -> Result<Option<MetaValue>, RepositoryError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.hget(meta_hash_key(order_id), key).await?;

        Ok(raw.and_then(|raw| match MetaValue::decode(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%order_id, key, error = %e, "unreadable meta value, treating as absent");
                None
            }
        }))
    }

    async fn delete_meta(&self, order_id: Uuid, key: &str) -> Result<(), RepositoryError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.hdel::<_, _, ()>(meta_hash_key(order_id), key).await?;
        Ok(())
    }
}
