//! Attribute projection for presentation.
//!
//! Turns a schema plus a validated data document into the ordered list
//! of labelled values the presentation layer renders. Stateless: the
//! projection is rebuilt from schema + document on every call and
//! never mutates either.

use serde_json::Value;

use crate::colors;
use crate::schema::{AttributeSchema, PropertySchema};

/// One labelled attribute value, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DisplayAttribute {
    pub label: String,
    pub value: String,
}

/// Project a data document through its schema.
///
/// Properties are ordered by their `propertyOrder` hint (ascending);
/// properties without a hint sort after those with one, and ties keep
/// schema declaration order. Properties absent from the document are
/// skipped.
pub fn project(schema: &AttributeSchema, data: &Value) -> Vec<DisplayAttribute> {
    let Some(map) = data.as_object() else {
        return Vec::new();
    };

    let mut present: Vec<(&PropertySchema, &Value)> = schema
        .properties
        .iter()
        .filter_map(|property| map.get(&property.name).map(|value| (property, value)))
        .collect();

    // Stable sort, so declaration order survives as the tie-break.
    present.sort_by_key(|(property, _)| (property.order.is_none(), property.order));

    present
        .into_iter()
        .map(|(property, value)| DisplayAttribute {
            label: property.title.clone(),
            value: display_value(property, value),
        })
        .collect()
}

/// Format a single raw value for display.
///
/// Precedence: enumeration title lookup, then the shared color table
/// for properties named `color`, then the raw value as-is.
fn display_value(property: &PropertySchema, value: &Value) -> String {
    if let Some(choices) = &property.choices {
        if let Some(title) = choices.title_for(value) {
            return title.to_string();
        }
    }

    if property.name == "color" {
        if let Some(name) = value.as_str().and_then(colors::color_name) {
            return name.to_string();
        }
    }

    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::{validate, AttributeSchema};

    fn schema() -> AttributeSchema {
        AttributeSchema::parse(&json!({
            "type": "object",
            "properties": {
                "connector": {"title": "Connector", "type": "string", "propertyOrder": 20},
                "cable_type": {"title": "Cable Type", "type": "string", "propertyOrder": 10},
                "length": {"title": "Length", "type": "integer"},
                "color": {
                    "title": "Color",
                    "type": "string",
                    "enum": ["4caf50", "ff9800"],
                    "options": {"enum_titles": ["Green", "Orange"]},
                    "propertyOrder": 30,
                },
            },
        }))
        .unwrap()
    }

    #[test]
    fn orders_by_hint_then_declaration() {
        let data = json!({
            "connector": "8P8C",
            "cable_type": "CAT6",
            "length": 5,
            "color": "ff9800",
        });
        let attrs = project(&schema(), &data);
        let labels: Vec<&str> = attrs
            .iter()
            .map(|attr| attr.label.as_str())
            .collect();
        // Hinted properties first (10, 20, 30), unhinted after.
        assert_eq!(labels, ["Cable Type", "Connector", "Color", "Length"]);
    }

    #[test]
    fn enumeration_value_renders_its_title() {
        let data = json!({"color": "ff9800"});
        let attrs = project(&schema(), &data);
        assert_eq!(attrs, vec![DisplayAttribute {
            label: "Color".into(),
            value: "Orange".into(),
        }]);
    }

    #[test]
    fn color_property_without_enum_uses_color_table() {
        let schema = AttributeSchema::parse(&json!({
            "type": "object",
            "properties": {"color": {"title": "Color", "type": "string"}},
        }))
        .unwrap();
        let attrs = project(&schema, &json!({"color": "2196f3"}));
        assert_eq!(attrs[0].value, "Blue");
    }

    #[test]
    fn absent_properties_are_skipped() {
        let attrs = project(&schema(), &json!({"length": 5}));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].label, "Length");
        assert_eq!(attrs[0].value, "5");
    }

    #[test]
    fn empty_for_non_object_document() {
        assert!(project(&schema(), &Value::Null).is_empty());
    }

    #[test]
    fn projection_round_trips_with_validation() {
        let schema = schema();
        let data = json!({
            "connector": "8P8C",
            "cable_type": "CAT6",
            "length": 5,
            "color": "ff9800",
        });
        let before = data.clone();
        let _ = project(&schema, &data);
        assert_eq!(data, before);
        assert!(validate(&schema, &data).is_ok());
    }
}
