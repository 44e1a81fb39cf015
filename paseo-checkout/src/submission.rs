use paseo_shared::is_empty_value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::form::{parse_passenger_input_name, FormValues};
use crate::passenger::PassengerEntry;
use crate::schema::{FixedField, PassengerManifestSchema};

/// A checkout form decoded into fixed values plus an ordered passenger list.
///
/// `passengers` always holds exactly `manifest_size()` entries with indices `1..=N`; inputs
/// for indices beyond N are dropped here.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSubmission {
    fixed: BTreeMap<FixedField, String>,
    passenger_count: Option<u32>,
    passengers: Vec<PassengerEntry>,
}

impl CheckoutSubmission {
    pub fn from_form(form: &FormValues, schema: &PassengerManifestSchema) -> Self {
        let fixed: BTreeMap<FixedField, String> = FixedField::ALL
            .into_iter()
            .filter_map(|field| form.fixed(field).map(|v| (field, v.to_string())))
            .collect();

        let passenger_count = schema.parse_count(form.fixed(FixedField::PassengerCount));
        let size = passenger_count.unwrap_or(0);

        let passengers: Vec<PassengerEntry> = schema
            .indices(size)
            .map(|index| {
                schema.fields().iter().fold(PassengerEntry::new(index), |entry, field| {
                    match form.passenger(*field, index) {
                        Some(value) => entry.with(*field, value),
                        None => entry,
                    }
                })
            })
            .collect();

        let ignored = form
            .names()
            .filter_map(|name| parse_passenger_input_name(name).ok())
            .filter(|(_, index)| *index > size)
            .count();
        if ignored > 0 {
            debug!(ignored, manifest_size = size, "dropping passenger inputs beyond declared count");
        }

        Self {
            fixed,
            passenger_count,
            passengers,
        }
    }

    pub fn fixed(&self, field: FixedField) -> Option<&str> {
        self.fixed.get(&field).map(String::as_str)
    }

    pub fn is_missing(&self, field: FixedField) -> bool {
        is_empty_value(self.fixed(field))
    }

    /// Parsed passenger count; `None` when absent or invalid
    pub fn passenger_count(&self) -> Option<u32> {
        self.passenger_count
    }

    pub fn manifest_size(&self) -> u32 {
        self.passengers.len() as u32
    }

    pub fn passengers(&self) -> &[PassengerEntry] {
        &self.passengers
    }

    pub fn terms_accepted(&self) -> bool {
        !self.is_missing(FixedField::TermsAccepted)
    }
}
