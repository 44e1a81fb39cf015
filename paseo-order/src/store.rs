use paseo_catalog::{CartSnapshot, CategoryMatcher};
use paseo_checkout::{
    CheckoutRules, CheckoutSubmission, FixedField, PassengerEntry, PassengerField, PassengerRecord,
};
use paseo_core::{MetaValue, OrderMetaRepository, RepositoryError};
use paseo_shared::{is_empty_value, sanitize_email, sanitize_text_field, Masked};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{ExcursionDetails, PersistReport};

const PASSENGER_KEY_PREFIX: &str = "pasajero_";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Metadata repository failed: {0}")]
    Repository(String),
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        StoreError::Repository(err.to_string())
    }
}

/// Metadata key of the stored record for passenger `index`
pub fn passenger_meta_key(index: u32) -> String {
    format!("{}{}", PASSENGER_KEY_PREFIX, index)
}

/// Persists checkout values as order metadata and reads them back.
///
/// Layout: one scalar per persisted fixed field (`tel`, `fecha_llegada`, `flight`, `pasajeros`,
/// `hotel`) and one record per passenger under `pasajero_<i>` for `i` in `1..=pasajeros`.
#[derive(Clone)]
pub struct OrderMetadataStore {
    repo: Arc<dyn OrderMetaRepository>,
    matcher: CategoryMatcher,
    max_passengers: u32,
}

impl OrderMetadataStore {
    pub fn new(repo: Arc<dyn OrderMetaRepository>, rules: &CheckoutRules) -> Self {
        Self {
            repo,
            matcher: rules.matcher(),
            max_passengers: rules.max_passengers,
        }
    }

    /// Writes the sanitized submission. Assumes the submission already passed validation.
    ///
    /// Empty values are skipped rather than stored. Every passenger slot `1..=N` gets a record so
    /// the stored indices always match the stored count; empty sub-fields are left out of it.
    pub async fn persist(
        &self,
        order_id: Uuid,
        cart: &CartSnapshot,
        submission: &CheckoutSubmission,
    ) -> Result<PersistReport, StoreError> {
        if !self.matcher.qualifies(cart) {
            debug!(%order_id, "cart has no excursions, nothing to persist");
            return Ok(PersistReport::default());
        }

        let previous_size = self.stored_manifest_size(order_id).await?;
        let mut report = PersistReport {
            qualified: true,
            ..PersistReport::default()
        };

        for field in FixedField::ALL.into_iter().filter(|f| f.is_persisted()) {
            let raw = submission.fixed(field);
            if is_empty_value(raw) {
                continue;
            }

            let value = match field {
                FixedField::PassengerCount => match submission.manifest_size() {
                    0 => continue,
                    size => size.to_string(),
                },
                _ => sanitize_text_field(raw.unwrap_or_default()),
            };
            if value.is_empty() {
                continue;
            }

            self.repo.set_meta(order_id, field.name(), MetaValue::Scalar(value)).await?;
            report.keys_written.push(field.name().to_string());
        }

        for passenger in submission.passengers() {
            let key = passenger_meta_key(passenger.index);
            let record = sanitize_passenger(passenger);
            debug!(
                %order_id,
                index = passenger.index,
                document = %Masked(record.get(PassengerField::Document.key()).map(String::as_str).unwrap_or_default()),
                sub_fields = record.len(),
                "storing passenger"
            );
            self.repo.set_meta(order_id, &key, MetaValue::Record(record)).await?;
            report.keys_written.push(key);
            report.passengers_written += 1;
        }

        // a smaller manifest replaces a larger one, so the stored indices stay exactly 1..=N
        let size = submission.manifest_size();
        if size > 0 {
            for index in size + 1..=previous_size {
                let key = passenger_meta_key(index);
                self.repo.delete_meta(order_id, &key).await?;
                report.keys_removed.push(key);
            }
        }

        info!(
            %order_id,
            keys = report.keys_written.len(),
            passengers = report.passengers_written,
            removed = report.keys_removed.len(),
            "excursion details stored"
        );
        Ok(report)
    }

    async fn stored_manifest_size(&self, order_id: Uuid) -> Result<u32, StoreError> {
        let stored = self
            .repo
            .get_meta(order_id, FixedField::PassengerCount.name())
            .await?;
        let size = stored
            .as_ref()
            .and_then(MetaValue::as_scalar)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        Ok(self.bounded(order_id, size))
    }

    /// Stored counts above the configured maximum only read that many passenger keys
    fn bounded(&self, order_id: Uuid, size: u32) -> u32 {
        if size > self.max_passengers {
            warn!(%order_id, stored = size, max = self.max_passengers, "stored passenger count over limit");
            return self.max_passengers;
        }
        size
    }

    /// Reads back exactly the keys `persist` writes. Missing or malformed values come back empty.
    pub async fn fetch(&self, order_id: Uuid) -> Result<ExcursionDetails, StoreError> {
        let mut details = ExcursionDetails::default();

        for field in FixedField::ALL.into_iter().filter(|f| f.is_persisted()) {
            match self.repo.get_meta(order_id, field.name()).await? {
                Some(MetaValue::Scalar(value)) => details.set_fixed(field, value),
                Some(MetaValue::Record(_)) => {
                    warn!(%order_id, key = field.name(), "expected a scalar, found a record");
                }
                None => {}
            }
        }

        details.passenger_count = self.bounded(order_id, details.passenger_count);
        for index in 1..=details.passenger_count {
            let key = passenger_meta_key(index);
            let passenger = match self.repo.get_meta(order_id, &key).await? {
                Some(MetaValue::Record(fields)) => record_from_fields(index, &fields),
                Some(MetaValue::Scalar(_)) => {
                    warn!(%order_id, key = %key, "expected a passenger record, found a scalar");
                    PassengerRecord::new(index)
                }
                None => PassengerRecord::new(index),
            };
            details.passengers.push(passenger);
        }

        Ok(details)
    }
}

fn sanitize_passenger(passenger: &PassengerEntry) -> BTreeMap<String, String> {
    PassengerField::ALL
        .into_iter()
        .filter_map(|field| {
            if passenger.is_missing(field) {
                return None;
            }
            let raw = passenger.get(field)?;
            let value = match field {
                PassengerField::Email => sanitize_email(raw),
                _ => sanitize_text_field(raw),
            };
            (!value.is_empty()).then(|| (field.key().to_string(), value))
        })
        .collect()
}

fn record_from_fields(index: u32, fields: &BTreeMap<String, String>) -> PassengerRecord {
    let mut record = PassengerRecord::new(index);
    for field in PassengerField::ALL {
        if let Some(value) = fields.get(field.key()) {
            record.set(field, value.clone());
        }
    }
    record
}
