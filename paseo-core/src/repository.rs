use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{CoreError, CoreResult};

pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;

/// A single order metadata value: either a plain scalar or a record of named string sub-fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MetaValue {
    Scalar(String),
    Record(BTreeMap<String, String>),
}

impl MetaValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        MetaValue::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            MetaValue::Scalar(value) => Some(value),
            MetaValue::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            MetaValue::Record(fields) => Some(fields),
            MetaValue::Scalar(_) => None,
        }
    }

    /// Encode for byte-oriented backends
    pub fn encode(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(raw: &str) -> CoreResult<Self> {
        serde_json::from_str(raw).map_err(|e| CoreError::MalformedMeta(e.to_string()))
    }
}

/// Key/value metadata attached to an order, keyed by order id plus field key.
#[async_trait]
pub trait OrderMetaRepository: Send + Sync {
    /// Write a value, replacing whatever was stored under the same key
    async fn set_meta(
        &self,
        order_id: Uuid,
        key: &str,
        value: MetaValue,
    ) -> Result<(), RepositoryError>;

    async fn get_meta(
        &self,
        order_id: Uuid,
        key: &str,
    ) -> Result<Option<MetaValue>, RepositoryError>;

    /// Remove a key; removing an absent key is not an error
    async fn delete_meta(&self, order_id: Uuid, key: &str) -> Result<(), RepositoryError>;
}
