use paseo_checkout::{FixedField, PassengerRecord};
use serde::{Deserialize, Serialize};

/// Excursion data read back from an order's metadata.
///
/// Anything that was never stored (or was stored in an unreadable shape) is empty, and
/// `passenger_count` is zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExcursionDetails {
    pub phone: String,
    pub arrival_date: String,
    pub flight_number: String,
    pub passenger_count: u32,
    pub lodging: String,
    pub passengers: Vec<PassengerRecord>,
}

impl ExcursionDetails {
    /// Display value of a stored fixed field; the passenger count renders empty when unset
    pub fn fixed_value(&self, field: FixedField) -> String {
        match field {
            FixedField::Phone => self.phone.clone(),
            FixedField::ArrivalDate => self.arrival_date.clone(),
            FixedField::FlightNumber => self.flight_number.clone(),
            FixedField::PassengerCount if self.passenger_count > 0 => self.passenger_count.to_string(),
            FixedField::PassengerCount => String::new(),
            FixedField::Lodging => self.lodging.clone(),
            FixedField::TermsAccepted => String::new(),
        }
    }

    pub(crate) fn set_fixed(&mut self, field: FixedField, value: String) {
        match field {
            FixedField::Phone => self.phone = value,
            FixedField::ArrivalDate => self.arrival_date = value,
            FixedField::FlightNumber => self.flight_number = value,
            FixedField::PassengerCount => {
                self.passenger_count = value.trim().parse().unwrap_or(0);
            }
            FixedField::Lodging => self.lodging = value,
            FixedField::TermsAccepted => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What a `persist` call wrote
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PersistReport {
    /// False when the cart did not qualify and nothing was written
    pub qualified: bool,
    pub keys_written: Vec<String>,
    pub passengers_written: u32,
    /// Passenger records of an earlier, larger manifest that were deleted
    pub keys_removed: Vec<String>,
}
