//! HTML for field definitions, matching the storefront's checkout form markup.

use paseo_shared::escape_html;

use crate::form::passenger_input_name;
use crate::renderer::FieldDefinition;
use crate::schema::{FieldKind, PassengerField};

pub fn field_html(field: &FieldDefinition) -> String {
    let mut classes = vec!["form-row".to_string()];
    classes.extend(field.classes.iter().cloned());
    if field.required {
        classes.push("validate-required".to_string());
    }

    let required_mark = if field.required {
        "&nbsp;<abbr class=\"required\" title=\"required\">*</abbr>"
    } else {
        ""
    };

    let control = if field.kind == FieldKind::Checkbox {
        format!(
            "<label class=\"checkbox\"><input type=\"checkbox\" class=\"input-checkbox\" name=\"{name}\" id=\"{id}\" value=\"1\"{checked}{required}> {label}{mark}</label>",
            name = escape_html(&field.name),
            id = escape_html(&field.id),
            checked = if field.is_checked() { " checked" } else { "" },
            required = if field.required { " required" } else { "" },
            label = escape_html(&field.label),
            mark = required_mark,
        )
    } else {
        format!(
            "<label for=\"{id}\">{label}{mark}</label><input {attrs}>",
            id = escape_html(&field.id),
            label = escape_html(&field.label),
            mark = required_mark,
            attrs = input_attributes(field),
        )
    };

    format!(
        "<p class=\"{}\" id=\"{}_field\">{}</p>",
        classes.join(" "),
        escape_html(&field.name),
        control
    )
}

fn input_attributes(field: &FieldDefinition) -> String {
    let mut attrs = vec![
        format!("type=\"{}\"", field.kind.as_str()),
        "class=\"input-text\"".to_string(),
        format!("name=\"{}\"", escape_html(&field.name)),
        format!("id=\"{}\"", escape_html(&field.id)),
    ];
    if let Some(placeholder) = &field.placeholder {
        attrs.push(format!("placeholder=\"{}\"", escape_html(placeholder)));
    }
    if let Some(value) = &field.value {
        attrs.push(format!("value=\"{}\"", escape_html(value)));
    }
    if let Some(min) = field.min {
        attrs.push(format!("min=\"{}\"", min));
    }
    for (name, value) in &field.custom_attributes {
        attrs.push(format!("{}=\"{}\"", escape_html(name), escape_html(value)));
    }
    if field.required {
        attrs.push("required".to_string());
    }
    attrs.join(" ")
}

/// Markup of one passenger group. `index` is spliced in verbatim so the client script can pass
/// a template placeholder instead of a number.
pub fn passenger_group_html(index: &str, fields: &[PassengerField]) -> String {
    let mut html = format!("<h4>Pasajero {}</h4>", index);
    for field in fields {
        let name = passenger_input_name(*field, index);
        html.push_str(&format!(
            "<p class=\"form-row form-row-wide\"><label for=\"{name}\">{label}</label><input type=\"{kind}\" class=\"input-text\" name=\"{name}\" id=\"{name}\" required></p>",
            name = name,
            label = escape_html(field.label()),
            kind = field.kind().as_str(),
        ));
    }
    html
}
