use paseo_shared::is_empty_value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::PassengerField;

/// Raw values submitted for one passenger slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerEntry {
    pub index: u32,
    values: BTreeMap<PassengerField, String>,
}

impl PassengerEntry {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: PassengerField, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn get(&self, field: PassengerField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_missing(&self, field: PassengerField) -> bool {
        is_empty_value(self.get(field))
    }

    pub fn missing_fields(&self) -> impl Iterator<Item = PassengerField> + '_ {
        PassengerField::ALL.into_iter().filter(|f| self.is_missing(*f))
    }
}

/// One passenger of the manifest as stored on the order and shown to staff.
///
/// Sub-fields that were never stored are empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerRecord {
    pub index: u32,
    pub given_name: String,
    pub surname: String,
    pub nationality: String,
    pub birth_date: String,
    pub document: String,
    pub email: String,
}

impl PassengerRecord {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn get(&self, field: PassengerField) -> &str {
        match field {
            PassengerField::GivenName => &self.given_name,
            PassengerField::Surname => &self.surname,
            PassengerField::Nationality => &self.nationality,
            PassengerField::BirthDate => &self.birth_date,
            PassengerField::Document => &self.document,
            PassengerField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: PassengerField, value: String) {
        let slot = match field {
            PassengerField::GivenName => &mut self.given_name,
            PassengerField::Surname => &mut self.surname,
            PassengerField::Nationality => &mut self.nationality,
            PassengerField::BirthDate => &mut self.birth_date,
            PassengerField::Document => &mut self.document,
            PassengerField::Email => &mut self.email,
        };
        *slot = value;
    }

    /// "Nombre Apellidos" as shown in the admin view
    pub fn full_name(&self) -> String {
        match (self.given_name.is_empty(), self.surname.is_empty()) {
            (false, false) => format!("{} {}", self.given_name, self.surname),
            (false, true) => self.given_name.clone(),
            (true, false) => self.surname.clone(),
            (true, true) => String::new(),
        }
    }
}
