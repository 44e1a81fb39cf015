use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Input control type, serialized as the HTML `type` attribute
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Tel,
    Date,
    Text,
    Number,
    Checkbox,
    Email,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Tel => "tel",
            FieldKind::Date => "date",
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Email => "email",
        }
    }
}

/// The six order-level excursion fields, in render order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FixedField {
    Phone,
    ArrivalDate,
    FlightNumber,
    PassengerCount,
    Lodging,
    TermsAccepted,
}

impl FixedField {
    pub const ALL: [FixedField; 6] = [
        FixedField::Phone,
        FixedField::ArrivalDate,
        FixedField::FlightNumber,
        FixedField::PassengerCount,
        FixedField::Lodging,
        FixedField::TermsAccepted,
    ];

    /// Form input name, also the metadata key for persisted fields
    pub fn name(&self) -> &'static str {
        match self {
            FixedField::Phone => "tel",
            FixedField::ArrivalDate => "fecha_llegada",
            FixedField::FlightNumber => "flight",
            FixedField::PassengerCount => "pasajeros",
            FixedField::Lodging => "hotel",
            FixedField::TermsAccepted => "terminos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FixedField::Phone => "Número de teléfono",
            FixedField::ArrivalDate => "Fecha de llegada",
            FixedField::FlightNumber => "Número de vuelo",
            FixedField::PassengerCount => "Cantidad de pasajeros",
            FixedField::Lodging => "Hotel o alojamiento",
            FixedField::TermsAccepted => "Acepto los términos y condiciones",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FixedField::Phone => FieldKind::Tel,
            FixedField::ArrivalDate => FieldKind::Date,
            FixedField::FlightNumber | FixedField::Lodging => FieldKind::Text,
            FixedField::PassengerCount => FieldKind::Number,
            FixedField::TermsAccepted => FieldKind::Checkbox,
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            FixedField::Phone | FixedField::FlightNumber | FixedField::Lodging => Some(self.label()),
            _ => None,
        }
    }

    /// Terms acceptance gates checkout but is never stored on the order
    pub fn is_persisted(&self) -> bool {
        !matches!(self, FixedField::TermsAccepted)
    }

    pub fn missing_message(&self) -> &'static str {
        match self {
            FixedField::Phone => "Por favor, ingrese un número de teléfono.",
            FixedField::ArrivalDate => "Por favor, seleccione una fecha de llegada.",
            FixedField::FlightNumber => "Por favor, ingrese un número de vuelo.",
            FixedField::PassengerCount => "Por favor, ingrese una cantidad válida de pasajeros.",
            FixedField::Lodging => "Por favor, ingrese un hotel o alojamiento.",
            FixedField::TermsAccepted => "Debe aceptar los términos y condiciones para continuar.",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// The per-passenger sub-fields, in render order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PassengerField {
    GivenName,
    Surname,
    Nationality,
    BirthDate,
    Document,
    Email,
}

impl PassengerField {
    pub const ALL: [PassengerField; 6] = [
        PassengerField::GivenName,
        PassengerField::Surname,
        PassengerField::Nationality,
        PassengerField::BirthDate,
        PassengerField::Document,
        PassengerField::Email,
    ];

    /// Sub-key inside a stored passenger record; also the prefix of the form input name
    pub fn key(&self) -> &'static str {
        match self {
            PassengerField::GivenName => "nombre",
            PassengerField::Surname => "apellidos",
            PassengerField::Nationality => "nacionalidad",
            PassengerField::BirthDate => "fecha_nacimiento",
            PassengerField::Document => "documento",
            PassengerField::Email => "email",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassengerField::GivenName => "Nombre",
            PassengerField::Surname => "Apellidos",
            PassengerField::Nationality => "Nacionalidad",
            PassengerField::BirthDate => "Fecha de nacimiento",
            PassengerField::Document => "Documento/Pasaporte",
            PassengerField::Email => "Email",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            PassengerField::BirthDate => FieldKind::Date,
            PassengerField::Email => FieldKind::Email,
            _ => FieldKind::Text,
        }
    }

    pub fn missing_message(&self, index: u32) -> String {
        let what = match self {
            PassengerField::GivenName => "el nombre",
            PassengerField::Surname => "los apellidos",
            PassengerField::Nationality => "la nacionalidad",
            PassengerField::BirthDate => "la fecha de nacimiento",
            PassengerField::Document => "el documento/pasaporte",
            PassengerField::Email => "el email",
        };
        format!("Por favor, ingrese {} del pasajero {}.", what, index)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Binds the size of the passenger manifest to the declared passenger count.
///
/// Every component that needs N (client script, validator, store, admin view) goes through
/// [`PassengerManifestSchema::manifest_size`] so the count is interpreted identically everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassengerManifestSchema {
    max_passengers: u32,
}

/// Upper bound on the declared passenger count when none is configured
pub const DEFAULT_MAX_PASSENGERS: u32 = 50;

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PassengerManifestSchema::COUNT_PATTERN).expect("valid regex"));

impl Default for PassengerManifestSchema {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSENGERS)
    }
}

impl PassengerManifestSchema {
    /// Shape of a count literal, shared by the server and the client script
    pub const COUNT_PATTERN: &'static str = r"^\s*\+?\d+\s*$";

    pub fn new(max_passengers: u32) -> Self {
        Self { max_passengers }
    }

    pub fn max_passengers(&self) -> u32 {
        self.max_passengers
    }

    pub fn fields(&self) -> &'static [PassengerField] {
        &PassengerField::ALL
    }

    /// A valid count is a plain non-negative integer literal that is at least 1 and within the
    /// configured maximum.
    pub fn parse_count(&self, raw: Option<&str>) -> Option<u32> {
        let raw = raw?;
        if !COUNT_RE.is_match(raw) {
            return None;
        }
        let trimmed = raw.trim();
        let count: u32 = trimmed.strip_prefix('+').unwrap_or(trimmed).parse().ok()?;
        (1..=self.max_passengers).contains(&count).then_some(count)
    }

    /// N: how many passenger groups exist for this raw count. Zero when the count is invalid.
    pub fn manifest_size(&self, raw: Option<&str>) -> u32 {
        self.parse_count(raw).unwrap_or(0)
    }

    pub fn indices(&self, size: u32) -> RangeInclusive<u32> {
        1..=size
    }
}
