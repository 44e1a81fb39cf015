use chrono::NaiveDate;
use paseo_catalog::{CartSnapshot, CategoryMatcher};
use paseo_core::NoticeSink;
use serde::Serialize;
use tracing::debug;
use validator::ValidateEmail;

use crate::passenger::PassengerEntry;
use crate::rules::CheckoutRules;
use crate::schema::{FixedField, PassengerField};
use crate::submission::CheckoutSubmission;

/// Which input a validation error refers to
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ValidationTarget {
    Fixed { field: FixedField },
    Passenger { index: u32, field: PassengerField },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    Missing,
    Invalid,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub target: ValidationTarget,
    pub kind: ValidationKind,
    pub message: String,
}

impl ValidationError {
    fn fixed(field: FixedField, kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            target: ValidationTarget::Fixed { field },
            kind,
            message: message.into(),
        }
    }

    fn passenger(index: u32, field: PassengerField, kind: ValidationKind, message: String) -> Self {
        Self {
            target: ValidationTarget::Passenger { index, field },
            kind,
            message,
        }
    }

    pub fn passenger_index(&self) -> Option<u32> {
        match self.target {
            ValidationTarget::Passenger { index, .. } => Some(index),
            ValidationTarget::Fixed { .. } => None,
        }
    }
}

/// Server-side gate run before an order is created.
///
/// Collects every problem rather than stopping at the first, so the shopper sees them all.
#[derive(Debug, Clone)]
pub struct CheckoutValidator {
    matcher: CategoryMatcher,
    strict_formats: bool,
}

impl CheckoutValidator {
    pub fn new(rules: &CheckoutRules) -> Self {
        Self {
            matcher: rules.matcher(),
            strict_formats: rules.strict_formats,
        }
    }

    /// Empty result means the checkout may proceed. A cart without excursions always passes.
    pub fn validate(&self, cart: &CartSnapshot, submission: &CheckoutSubmission) -> Vec<ValidationError> {
        if !self.matcher.qualifies(cart) {
            return Vec::new();
        }

        let mut errors = Vec::new();
        self.check_fixed(submission, &mut errors);

        if !submission.terms_accepted() {
            errors.push(ValidationError::fixed(
                FixedField::TermsAccepted,
                ValidationKind::Missing,
                FixedField::TermsAccepted.missing_message(),
            ));
        }

        for passenger in submission.passengers() {
            self.check_passenger(passenger, &mut errors);
        }

        debug!(
            errors = errors.len(),
            manifest_size = submission.manifest_size(),
            strict = self.strict_formats,
            "excursion checkout validated"
        );
        errors
    }

    /// Runs [`validate`](Self::validate) and queues each failure as an error notice.
    /// Returns the number of notices added; the caller must abort order creation when non-zero.
    pub fn validate_into<S: NoticeSink + ?Sized>(
        &self,
        cart: &CartSnapshot,
        submission: &CheckoutSubmission,
        notices: &mut S,
    ) -> usize {
        let errors = self.validate(cart, submission);
        let count = errors.len();
        for error in errors {
            notices.add_error(error.message);
        }
        count
    }

    fn check_fixed(&self, submission: &CheckoutSubmission, errors: &mut Vec<ValidationError>) {
        for field in FixedField::ALL {
            match field {
                FixedField::TermsAccepted => continue,
                FixedField::PassengerCount => {
                    let kind = if submission.is_missing(field) {
                        Some(ValidationKind::Missing)
                    } else if submission.passenger_count().is_none() {
                        Some(ValidationKind::Invalid)
                    } else {
                        None
                    };
                    if let Some(kind) = kind {
                        errors.push(ValidationError::fixed(field, kind, field.missing_message()));
                    }
                }
                _ if submission.is_missing(field) => {
                    errors.push(ValidationError::fixed(field, ValidationKind::Missing, field.missing_message()));
                }
                FixedField::ArrivalDate if self.strict_formats => {
                    if !is_iso_date(submission.fixed(field).unwrap_or_default()) {
                        errors.push(ValidationError::fixed(
                            field,
                            ValidationKind::Invalid,
                            "La fecha de llegada no es válida.",
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    fn check_passenger(&self, passenger: &PassengerEntry, errors: &mut Vec<ValidationError>) {
        let index = passenger.index;
        for field in PassengerField::ALL {
            if passenger.is_missing(field) {
                errors.push(ValidationError::passenger(
                    index,
                    field,
                    ValidationKind::Missing,
                    field.missing_message(index),
                ));
                continue;
            }

            if !self.strict_formats {
                continue;
            }

            let value = passenger.get(field).unwrap_or_default();
            let message = match field {
                PassengerField::Email if !value.trim().to_string().validate_email() => {
                    format!("El email del pasajero {} no es válido.", index)
                }
                PassengerField::BirthDate if !is_iso_date(value) => {
                    format!("La fecha de nacimiento del pasajero {} no es válida.", index)
                }
                _ => continue,
            };
            errors.push(ValidationError::passenger(index, field, ValidationKind::Invalid, message));
        }
    }
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}
