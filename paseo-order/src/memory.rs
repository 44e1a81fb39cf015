use async_trait::async_trait;
use paseo_core::{MetaValue, OrderMetaRepository, RepositoryError};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Order metadata held in process memory. Backs tests and single-node development runs.
#[derive(Default)]
pub struct InMemoryMetaRepository {
    orders: RwLock<HashMap<Uuid, BTreeMap<String, MetaValue>>>,
}

impl InMemoryMetaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All metadata stored for one order, sorted by key
    pub async fn snapshot(&self, order_id: Uuid) -> BTreeMap<String, MetaValue> {
        self.orders
            .read()
            .await
            .get(&order_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drops every key of an order, as the host does when the order itself is deleted
    pub async fn remove_order(&self, order_id: Uuid) -> bool {
        self.orders.write().await.remove(&order_id).is_some()
    }
}

#[async_trait]
impl OrderMetaRepository for InMemoryMetaRepository {
    async fn set_meta(
        &self,
        order_id: Uuid,
        key: &str,
        value: MetaValue,
    ) -> Result<(), RepositoryError> {
        self.orders
            .write()
            .await
            .entry(order_id)
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get_meta(
        &self,
        order_id: Uuid,
        key: &str,
    ) -> Result<Option<MetaValue>, RepositoryError> {
        Ok(self
            .orders
            .read()
            .await
            .get(&order_id)
            .and_then(|meta| meta.get(key))
            .cloned())
    }

    async fn delete_meta(&self, order_id: Uuid, key: &str) -> Result<(), RepositoryError> {
        if let Some(meta) = self.orders.write().await.get_mut(&order_id) {
            meta.remove(key);
        }
        Ok(())
    }
}
