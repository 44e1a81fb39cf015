use paseo_catalog::{CartSnapshot, CategoryMatcher};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::client::client_script;
use crate::form::{passenger_input_name, FormValues};
use crate::markup::field_html;
use crate::rules::CheckoutRules;
use crate::schema::{FieldKind, FixedField, PassengerField, PassengerManifestSchema};

pub const SECTION_ID: &str = "campos_excursion";
pub const SECTION_HEADING: &str = "Información adicional para excursiones";
pub const PASSENGER_CONTAINER_ID: &str = "campos_pasajeros";

/// One input control for the host form renderer
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldDefinition {
    pub fn fixed(field: FixedField, value: Option<&str>) -> Self {
        let mut custom_attributes = BTreeMap::new();
        let mut min = None;
        if field == FixedField::PassengerCount {
            min = Some(1);
            custom_attributes.insert("data-pasajeros".to_string(), "true".to_string());
        }

        Self {
            name: field.name().to_string(),
            id: field.name().to_string(),
            kind: field.kind(),
            label: field.label().to_string(),
            required: true,
            placeholder: field.placeholder().map(str::to_string),
            min,
            classes: vec!["form-row-wide".to_string()],
            custom_attributes,
            value: value.map(str::to_string),
        }
    }

    pub fn passenger(field: PassengerField, index: u32) -> Self {
        let name = passenger_input_name(field, index);
        Self {
            id: name.clone(),
            name,
            kind: field.kind(),
            label: field.label().to_string(),
            required: true,
            placeholder: None,
            min: None,
            classes: vec!["form-row-wide".to_string()],
            custom_attributes: BTreeMap::new(),
            value: None,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.kind == FieldKind::Checkbox && !paseo_shared::is_empty_value(self.value.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum FormElement {
    Field(FieldDefinition),
    /// Empty block the client script fills with passenger groups
    PassengerContainer { id: String },
}

/// Everything the excursion section contributes to the checkout page.
///
/// Empty (no heading, no fields, no script) when the cart does not qualify.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FieldSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub elements: Vec<FormElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl FieldSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.script.is_none()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.elements.iter().filter_map(|e| match e {
            FormElement::Field(field) => Some(field),
            FormElement::PassengerContainer { .. } => None,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.name == name)
    }

    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut html = format!("<div id=\"{}\">", SECTION_ID);
        if let Some(heading) = &self.heading {
            html.push_str(&format!("<h3>{}</h3>", paseo_shared::escape_html(heading)));
        }
        for element in &self.elements {
            match element {
                FormElement::Field(field) => html.push_str(&field_html(field)),
                FormElement::PassengerContainer { id } => {
                    html.push_str(&format!("<div id=\"{}\"></div>", id));
                }
            }
        }
        html.push_str("</div>");
        if let Some(script) = &self.script {
            html.push_str(&format!("<script type=\"text/javascript\">{}</script>", script));
        }
        html
    }
}

/// Produces the excursion section of the checkout form
#[derive(Debug, Clone)]
pub struct FormRenderer {
    matcher: CategoryMatcher,
    schema: PassengerManifestSchema,
}

impl FormRenderer {
    pub fn new(rules: &CheckoutRules) -> Self {
        Self {
            matcher: rules.matcher(),
            schema: rules.schema(),
        }
    }

    /// `previous` holds values the shopper already entered, so a failed submission re-renders
    /// with its input intact.
    pub fn render(&self, cart: &CartSnapshot, previous: &FormValues) -> FieldSet {
        if !self.matcher.qualifies(cart) {
            return FieldSet::empty();
        }

        let mut elements = Vec::with_capacity(FixedField::ALL.len() + 1);
        for field in FixedField::ALL {
            if field == FixedField::TermsAccepted {
                elements.push(FormElement::PassengerContainer {
                    id: PASSENGER_CONTAINER_ID.to_string(),
                });
            }
            elements.push(FormElement::Field(FieldDefinition::fixed(field, previous.fixed(field))));
        }

        let prefilled = FixedField::ALL
            .iter()
            .filter(|f| previous.fixed(**f).is_some())
            .count();
        debug!(prefilled, "rendering excursion fields");

        FieldSet {
            heading: Some(SECTION_HEADING.to_string()),
            elements,
            script: Some(client_script(&self.schema)),
        }
    }
}
