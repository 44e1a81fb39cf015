//! Passenger block synchronization.
//!
//! Whenever the passenger-count input changes (and once on page load) the passenger container
//! is emptied and rebuilt with exactly N groups. [`PassengerBlock`] is the server-side model of
//! that container; [`client_script`] emits the same rule for the browser.

use serde::Serialize;

use crate::markup::passenger_group_html;
use crate::renderer::{FieldDefinition, PASSENGER_CONTAINER_ID};
use crate::schema::{FixedField, PassengerManifestSchema};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PassengerFieldGroup {
    pub index: u32,
    pub title: String,
    pub inputs: Vec<FieldDefinition>,
}

impl PassengerFieldGroup {
    fn build(schema: &PassengerManifestSchema, index: u32) -> Self {
        Self {
            index,
            title: format!("Pasajero {}", index),
            inputs: schema
                .fields()
                .iter()
                .map(|field| FieldDefinition::passenger(*field, index))
                .collect(),
        }
    }
}

/// Contents of the passenger container
#[derive(Debug, Clone, Serialize)]
pub struct PassengerBlock {
    #[serde(skip)]
    schema: PassengerManifestSchema,
    groups: Vec<PassengerFieldGroup>,
}

impl PassengerBlock {
    pub fn new(schema: PassengerManifestSchema) -> Self {
        Self {
            schema,
            groups: Vec::new(),
        }
    }

    /// Discards every group and rebuilds from the current count value. Non-numeric, non-positive
    /// or over-limit values leave the container empty.
    pub fn on_count_change(&mut self, raw: Option<&str>) {
        let schema = self.schema;
        let size = schema.manifest_size(raw);
        self.groups.clear();
        self.groups
            .extend(schema.indices(size).map(|index| PassengerFieldGroup::build(&schema, index)));
    }

    pub fn groups(&self) -> &[PassengerFieldGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.groups
            .iter()
            .map(|group| passenger_group_html(&group.index.to_string(), self.schema.fields()))
            .collect()
    }
}

const SCRIPT_TEMPLATE: &str = r#"(function () {
  'use strict';
  var COUNT_PATTERN = /__COUNT_PATTERN__/;
  var MAX_PASSENGERS = __MAX_PASSENGERS__;
  function passengerCount(raw) {
    if (typeof raw !== 'string' || !COUNT_PATTERN.test(raw)) { return 0; }
    var n = parseInt(raw.trim().replace(/^\+/, ''), 10);
    if (!(n >= 1) || n > MAX_PASSENGERS) { return 0; }
    return n;
  }
  function groupMarkup(i) {
    return `__GROUP_MARKUP__`;
  }
  function rebuild(container, input) {
    var n = passengerCount(input ? input.value : null);
    var html = '';
    for (var i = 1; i <= n; i++) { html += groupMarkup(i); }
    container.innerHTML = html;
  }
  function init() {
    var container = document.getElementById('__CONTAINER_ID__');
    var input = document.querySelector('input[name="__COUNT_NAME__"]');
    if (!container) { return; }
    if (input) { input.addEventListener('change', function () { rebuild(container, input); }); }
    rebuild(container, input);
  }
  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', init);
  } else {
    init();
  }
})();"#;

/// Browser script keeping the passenger container in step with the count input
pub fn client_script(schema: &PassengerManifestSchema) -> String {
    let max = schema.max_passengers().to_string();

    SCRIPT_TEMPLATE
        .replace("__COUNT_PATTERN__", PassengerManifestSchema::COUNT_PATTERN)
        .replace("__MAX_PASSENGERS__", &max)
        .replace("__GROUP_MARKUP__", &passenger_group_html("${i}", schema.fields()))
        .replace("__CONTAINER_ID__", PASSENGER_CONTAINER_ID)
        .replace("__COUNT_NAME__", FixedField::PassengerCount.name())
}
