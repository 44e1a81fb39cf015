use paseo_checkout::renderer::SECTION_HEADING;
use paseo_checkout::{FixedField, PassengerRecord};
use paseo_shared::escape_html;
use serde::Serialize;
use uuid::Uuid;

use crate::models::ExcursionDetails;
use crate::store::{OrderMetadataStore, StoreError};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdminLine {
    pub label: String,
    pub value: String,
}

impl AdminLine {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdminPassengerBlock {
    pub index: u32,
    pub title: String,
    pub lines: Vec<AdminLine>,
}

/// Staff-facing excursion block of an order
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdminOrderView {
    pub order_id: Uuid,
    pub title: String,
    pub fields: Vec<AdminLine>,
    pub passengers: Vec<AdminPassengerBlock>,
}

fn admin_label(field: FixedField) -> Option<&'static str> {
    match field {
        FixedField::Phone => Some("Teléfono"),
        FixedField::ArrivalDate => Some("Fecha de llegada"),
        FixedField::FlightNumber => Some("Número de vuelo"),
        FixedField::PassengerCount => Some("Cantidad de pasajeros"),
        FixedField::Lodging => Some("Hotel o alojamiento"),
        FixedField::TermsAccepted => None,
    }
}

fn passenger_block(passenger: &PassengerRecord) -> AdminPassengerBlock {
    AdminPassengerBlock {
        index: passenger.index,
        title: format!("Pasajero {}", passenger.index),
        lines: vec![
            AdminLine::new("Nombre", passenger.full_name()),
            AdminLine::new("Nacionalidad", passenger.nationality.as_str()),
            AdminLine::new("Fecha de nacimiento", passenger.birth_date.as_str()),
            AdminLine::new("Documento/Pasaporte", passenger.document.as_str()),
            AdminLine::new("Email", passenger.email.as_str()),
        ],
    }
}

impl AdminOrderView {
    pub fn from_details(order_id: Uuid, details: &ExcursionDetails) -> Self {
        let fields = FixedField::ALL
            .into_iter()
            .filter_map(|field| admin_label(field).map(|label| AdminLine::new(label, details.fixed_value(field))))
            .collect();

        Self {
            order_id,
            title: SECTION_HEADING.to_string(),
            fields,
            passengers: details.passengers.iter().map(passenger_block).collect(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<h3>{}</h3>", escape_html(&self.title));
        for line in &self.fields {
            html.push_str(&line_html(line));
        }
        for block in &self.passengers {
            html.push_str(&format!("<h4>{}</h4>", escape_html(&block.title)));
            for line in &block.lines {
                html.push_str(&line_html(line));
            }
        }
        html
    }
}

fn line_html(line: &AdminLine) -> String {
    format!(
        "<p><strong>{}:</strong> {}</p>",
        escape_html(&line.label),
        escape_html(&line.value)
    )
}

/// Read-only view over stored excursion data. Never gated on the cart: orders that never
/// qualified simply show empty values.
#[derive(Clone)]
pub struct AdminPresenter {
    store: OrderMetadataStore,
}

impl AdminPresenter {
    pub fn new(store: OrderMetadataStore) -> Self {
        Self { store }
    }

    pub async fn render(&self, order_id: Uuid) -> Result<AdminOrderView, StoreError> {
        let details = self.store.fetch(order_id).await?;
        Ok(AdminOrderView::from_details(order_id, &details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryMetaRepository;
    use paseo_checkout::CheckoutRules;
    use paseo_core::{MetaValue, OrderMetaRepository};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn presenter() -> (Arc<InMemoryMetaRepository>, AdminPresenter) {
        let repo = Arc::new(InMemoryMetaRepository::new());
        let store = OrderMetadataStore::new(repo.clone(), &CheckoutRules::default());
        (repo, AdminPresenter::new(store))
    }

    #[tokio::test]
    async fn test_unknown_order_renders_empty_layout() {
        let (_, presenter) = presenter();
        let view = presenter.render(Uuid::new_v4()).await.unwrap();

        let labels: Vec<&str> = view.fields.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Teléfono", "Fecha de llegada", "Número de vuelo", "Cantidad de pasajeros", "Hotel o alojamiento"]
        );
        assert!(view.fields.iter().all(|l| l.value.is_empty()));
        assert!(view.passengers.is_empty());
    }

    #[tokio::test]
    async fn test_partial_passenger_renders_blanks() {
        let (repo, presenter) = presenter();
        let order_id = Uuid::new_v4();
        repo.set_meta(order_id, "pasajeros", MetaValue::scalar("2")).await.unwrap();
        repo.set_meta(order_id, "tel", MetaValue::scalar("555-1234")).await.unwrap();
        let mut first = BTreeMap::new();
        first.insert("nombre".to_string(), "Ana".to_string());
        first.insert("apellidos".to_string(), "García".to_string());
        repo.set_meta(order_id, "pasajero_1", MetaValue::Record(first)).await.unwrap();
        repo.set_meta(order_id, "pasajero_2", MetaValue::scalar("broken")).await.unwrap();

        let view = presenter.render(order_id).await.unwrap();
        assert_eq!(view.fields[0].value, "555-1234");
        assert_eq!(view.fields[3].value, "2");
        assert_eq!(view.passengers.len(), 2);

        let first = &view.passengers[0];
        assert_eq!(first.title, "Pasajero 1");
        assert_eq!(first.lines[0], AdminLine::new("Nombre", "Ana García"));
        assert_eq!(first.lines[4], AdminLine::new("Email", ""));

        let second = &view.passengers[1];
        assert_eq!(second.title, "Pasajero 2");
        assert!(second.lines.iter().all(|l| l.value.is_empty()));
    }

    #[test]
    fn test_html_escapes_values() {
        let details = ExcursionDetails {
            lodging: "<b>Hotel & Spa</b>".to_string(),
            passenger_count: 1,
            passengers: vec![PassengerRecord {
                given_name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                ..PassengerRecord::new(1)
            }],
            ..ExcursionDetails::default()
        };
        let html = AdminOrderView::from_details(Uuid::nil(), &details).to_html();

        assert!(html.starts_with("<h3>Información adicional para excursiones</h3>"));
        assert!(html.contains("<p><strong>Hotel o alojamiento:</strong> &lt;b&gt;Hotel &amp; Spa&lt;/b&gt;</p>"));
        assert!(html.contains("<h4>Pasajero 1</h4><p><strong>Nombre:</strong> Ana</p>"));
        assert!(!html.contains("<b>"));
    }
}
