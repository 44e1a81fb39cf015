pub mod rules;
pub mod schema;
pub mod form;
pub mod passenger;
pub mod submission;
pub mod markup;
pub mod renderer;
pub mod client;
pub mod validation;

pub use rules::CheckoutRules;
pub use schema::{FieldKind, FixedField, PassengerField, PassengerManifestSchema, DEFAULT_MAX_PASSENGERS};
pub use form::{FormValues, SchemaError};
pub use passenger::{PassengerEntry, PassengerRecord};
pub use submission::CheckoutSubmission;
pub use renderer::{FieldDefinition, FieldSet, FormElement, FormRenderer};
pub use client::{client_script, PassengerBlock, PassengerFieldGroup};
pub use validation::{CheckoutValidator, ValidationError, ValidationKind, ValidationTarget};
