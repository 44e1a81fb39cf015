//! Wire format of the checkout form: a flat map of input name to string, with passenger inputs
//! named `<sub-key>_pasajero_<i>`. Nothing outside this module and the submission parser deals
//! with suffixed names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::{FixedField, PassengerField};

const PASSENGER_INFIX: &str = "_pasajero_";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Not a passenger input name: {0}")]
    NotPassengerInput(String),

    #[error("Unknown passenger field: {0}")]
    UnknownField(String),

    #[error("Invalid passenger index in {0}")]
    InvalidIndex(String),
}

/// Raw form values as posted by the browser (or remembered by the checkout session)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn fixed(&self, field: FixedField) -> Option<&str> {
        self.get(field.name())
    }

    pub fn passenger(&self, field: PassengerField, index: u32) -> Option<&str> {
        self.get(&passenger_input_name(field, index))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

pub fn passenger_input_name(field: PassengerField, index: impl fmt::Display) -> String {
    format!("{}{}{}", field.key(), PASSENGER_INFIX, index)
}

pub fn parse_passenger_input_name(name: &str) -> Result<(PassengerField, u32), SchemaError> {
    let (key, index) = name
        .rsplit_once(PASSENGER_INFIX)
        .ok_or_else(|| SchemaError::NotPassengerInput(name.to_string()))?;

    let field = PassengerField::from_key(key).ok_or_else(|| SchemaError::UnknownField(key.to_string()))?;

    let index: u32 = index
        .parse()
        .ok()
        .filter(|i| *i >= 1)
        .ok_or_else(|| SchemaError::InvalidIndex(name.to_string()))?;

    Ok((field, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_names() {
        assert_eq!(passenger_input_name(PassengerField::GivenName, 1), "nombre_pasajero_1");
        assert_eq!(
            passenger_input_name(PassengerField::BirthDate, 12),
            "fecha_nacimiento_pasajero_12"
        );
    }

    #[test]
    fn test_parse_input_names() {
        assert_eq!(
            parse_passenger_input_name("fecha_nacimiento_pasajero_3"),
            Ok((PassengerField::BirthDate, 3))
        );
        assert_eq!(
            parse_passenger_input_name("hotel"),
            Err(SchemaError::NotPassengerInput("hotel".to_string()))
        );
        assert_eq!(
            parse_passenger_input_name("edad_pasajero_1"),
            Err(SchemaError::UnknownField("edad".to_string()))
        );
        assert!(matches!(
            parse_passenger_input_name("email_pasajero_0"),
            Err(SchemaError::InvalidIndex(_))
        ));
        assert!(matches!(
            parse_passenger_input_name("email_pasajero_x"),
            Err(SchemaError::InvalidIndex(_))
        ));
    }

    #[test]
    fn test_form_values_lookup() {
        let values: FormValues = [("tel", "555-1234"), ("email_pasajero_2", "b@example.com")]
            .into_iter()
            .collect();
        assert_eq!(values.fixed(FixedField::Phone), Some("555-1234"));
        assert_eq!(values.passenger(PassengerField::Email, 2), Some("b@example.com"));
        assert_eq!(values.passenger(PassengerField::Email, 1), None);
    }

    #[test]
    fn test_deserializes_flat_map() {
        let values: FormValues = serde_json::from_str(r#"{"pasajeros":"2","terminos":"1"}"#).unwrap();
        assert_eq!(values.fixed(FixedField::PassengerCount), Some("2"));
        assert_eq!(values.fixed(FixedField::TermsAccepted), Some("1"));
    }
}
