//! Closed-variant attribute schemas.
//!
//! A consumable type may carry a caller-authored schema document that
//! constrains the free-form attribute data its consumables hold. The
//! document arrives as runtime JSON (operators author types without a
//! redeploy) but is parsed into the closed set of constructs below
//! before anything else looks at it; a document using any construct
//! outside that set is rejected as a malformed schema rather than
//! silently accepted.
//!
//! Supported constructs: a top-level `object` with named properties;
//! per-property scalar types `string`, `integer`, and `number`; a
//! per-property `enum` with parallel human-readable titles under
//! `options.enum_titles`; a `propertyOrder` display hint; a `default`
//! value. Properties without a `default` are required.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Schema types
// ---------------------------------------------------------------------------

/// Scalar type of a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Number,
}

impl PropertyType {
    fn as_str(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Number => "number",
        }
    }

    /// Whether a JSON value conforms to this scalar type.
    fn matches(self, value: &Value) -> bool {
        match self {
            PropertyType::String => value.is_string(),
            PropertyType::Integer => value.is_i64() || value.is_u64(),
            PropertyType::Number => value.is_number(),
        }
    }
}

/// A property's enumeration: permitted raw values plus the parallel
/// list of display titles.
#[derive(Debug, Clone, Serialize)]
pub struct Enumeration {
    pub values: Vec<Value>,
    pub titles: Vec<String>,
}

impl Enumeration {
    /// Display title for a raw value, if the value is a member.
    pub fn title_for(&self, value: &Value) -> Option<&str> {
        let index = self.values.iter().position(|v| v == value)?;
        self.titles.get(index).map(String::as_str)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// One named property of an attribute schema.
#[derive(Debug, Clone, Serialize)]
pub struct PropertySchema {
    pub name: String,
    /// Display label; falls back to the property name when the schema
    /// does not supply a `title`.
    pub title: String,
    pub ty: PropertyType,
    pub choices: Option<Enumeration>,
    /// Ascending display-order hint (`propertyOrder`).
    pub order: Option<i64>,
    pub default: Option<Value>,
}

impl PropertySchema {
    /// A property is required exactly when it has no default.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed attribute schema: a top-level object with named
/// properties, in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeSchema {
    pub title: Option<String>,
    pub properties: Vec<PropertySchema>,
}

/// A single validation failure of a data document against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The failing property path (empty for document-level failures).
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::SchemaInvalid(message.into())
}

impl AttributeSchema {
    /// Parse a runtime JSON document into the closed variant set.
    ///
    /// Fails with [`CoreError::SchemaInvalid`] naming the offending
    /// path for any construct outside the supported set.
    pub fn parse(document: &Value) -> Result<Self, CoreError> {
        let root = document
            .as_object()
            .ok_or_else(|| invalid("schema document must be a JSON object"))?;

        for key in root.keys() {
            if !matches!(key.as_str(), "type" | "title" | "properties") {
                return Err(invalid(format!(
                    "'{key}' is not a supported schema keyword on ['{key}']"
                )));
            }
        }

        match root.get("type") {
            Some(Value::String(s)) if s == "object" => {}
            Some(other) => {
                return Err(invalid(format!(
                    "{} is not a supported schema type on ['type']",
                    render(other)
                )));
            }
            None => return Err(invalid("schema document must declare \"type\": \"object\"")),
        }

        let title = match root.get("title") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(invalid(format!(
                    "{} is not a valid title on ['title']",
                    render(other)
                )));
            }
        };

        let mut properties = Vec::new();
        if let Some(value) = root.get("properties") {
            let map = value
                .as_object()
                .ok_or_else(|| invalid("'properties' must be a JSON object on ['properties']"))?;
            for (name, prop) in map {
                properties.push(parse_property(name, prop)?);
            }
        }

        Ok(AttributeSchema { title, properties })
    }
}

fn parse_property(name: &str, value: &Value) -> Result<PropertySchema, CoreError> {
    let path = format!("['properties']['{name}']");
    let map = value
        .as_object()
        .ok_or_else(|| invalid(format!("property definition must be a JSON object on {path}")))?;

    for key in map.keys() {
        if !matches!(
            key.as_str(),
            "title" | "type" | "enum" | "options" | "propertyOrder" | "default"
        ) {
            return Err(invalid(format!(
                "'{key}' is not a supported property keyword on {path}"
            )));
        }
    }

    let ty = match map.get("type") {
        Some(Value::String(s)) => match s.as_str() {
            "string" => PropertyType::String,
            "integer" => PropertyType::Integer,
            "number" => PropertyType::Number,
            other => {
                return Err(invalid(format!(
                    "'{other}' is not a supported property type on {path}['type']"
                )));
            }
        },
        Some(other) => {
            return Err(invalid(format!(
                "{} is not a supported property type on {path}['type']",
                render(other)
            )));
        }
        None => {
            return Err(invalid(format!(
                "property must declare a type on {path}['type']"
            )));
        }
    };

    let title = match map.get("title") {
        None => name.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(invalid(format!(
                "{} is not a valid title on {path}['title']",
                render(other)
            )));
        }
    };

    let values = match map.get("enum") {
        None => None,
        Some(Value::Array(items)) => {
            for item in items {
                if !(item.is_string() || item.is_number()) {
                    return Err(invalid(format!(
                        "{} is not a valid enumeration member on {path}['enum']",
                        render(item)
                    )));
                }
            }
            Some(items.clone())
        }
        Some(other) => {
            return Err(invalid(format!(
                "{} is not a valid enumeration on {path}['enum']",
                render(other)
            )));
        }
    };

    let titles = parse_enum_titles(map.get("options"), &path)?;

    let choices = match (values, titles) {
        (Some(values), Some(titles)) => {
            if values.len() != titles.len() {
                return Err(invalid(format!(
                    "'enum_titles' must parallel 'enum' ({} values, {} titles) on {path}['options']",
                    values.len(),
                    titles.len()
                )));
            }
            Some(Enumeration { values, titles })
        }
        (Some(values), None) => {
            // Without explicit titles the raw values double as labels.
            let titles = values.iter().map(raw_label).collect();
            Some(Enumeration { values, titles })
        }
        (None, Some(_)) => {
            return Err(invalid(format!(
                "'enum_titles' without an 'enum' on {path}['options']"
            )));
        }
        (None, None) => None,
    };

    let order = match map.get("propertyOrder") {
        None => None,
        Some(value) => Some(value.as_i64().ok_or_else(|| {
            invalid(format!(
                "{} is not a valid property order on {path}['propertyOrder']",
                render(value)
            ))
        })?),
    };

    let default = match map.get("default") {
        None => None,
        Some(value) if value.is_string() || value.is_number() => Some(value.clone()),
        Some(other) => {
            return Err(invalid(format!(
                "{} is not a valid default on {path}['default']",
                render(other)
            )));
        }
    };

    Ok(PropertySchema {
        name: name.to_string(),
        title,
        ty,
        choices,
        order,
        default,
    })
}

fn parse_enum_titles(options: Option<&Value>, path: &str) -> Result<Option<Vec<String>>, CoreError> {
    let Some(options) = options else {
        return Ok(None);
    };
    let map = options
        .as_object()
        .ok_or_else(|| invalid(format!("'options' must be a JSON object on {path}['options']")))?;
    for key in map.keys() {
        if key != "enum_titles" {
            return Err(invalid(format!(
                "'{key}' is not a supported options keyword on {path}['options']"
            )));
        }
    }
    let Some(titles) = map.get("enum_titles") else {
        return Ok(None);
    };
    let items = titles.as_array().ok_or_else(|| {
        invalid(format!(
            "'enum_titles' must be an array on {path}['options']"
        ))
    })?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => out.push(s.clone()),
            other => {
                return Err(invalid(format!(
                    "{} is not a valid enumeration title on {path}['options']",
                    render(other)
                )));
            }
        }
    }
    Ok(Some(out))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a data document against a parsed schema.
///
/// Pure function: safe for any number of concurrent callers. Data keys
/// the schema does not name are permitted.
pub fn validate(schema: &AttributeSchema, data: &Value) -> Result<(), Vec<Violation>> {
    let Some(map) = data.as_object() else {
        return Err(vec![Violation {
            path: String::new(),
            message: "data document must be a JSON object".to_string(),
        }]);
    };

    let mut violations = Vec::new();
    for property in &schema.properties {
        let Some(value) = map.get(&property.name) else {
            if property.is_required() {
                violations.push(Violation {
                    path: property.name.clone(),
                    message: format!("'{}' is a required property", property.name),
                });
            }
            continue;
        };

        if !property.ty.matches(value) {
            violations.push(Violation {
                path: property.name.clone(),
                message: format!(
                    "{} is not of type '{}'",
                    render(value),
                    property.ty.as_str()
                ),
            });
            continue;
        }

        if let Some(choices) = &property.choices {
            if !choices.contains(value) {
                violations.push(Violation {
                    path: property.name.clone(),
                    message: format!("{} is not one of the permitted values", render(value)),
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Render a JSON value for an error message: strings single-quoted,
/// everything else in its JSON form.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// A raw enumeration value rendered as its own label.
fn raw_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn cable_schema() -> AttributeSchema {
        AttributeSchema::parse(&json!({
            "type": "object",
            "title": "Test Schema",
            "properties": {
                "length": {"title": "Length", "type": "integer", "propertyOrder": 10},
                "length_unit": {
                    "title": "Unit",
                    "type": "string",
                    "enum": ["m", "cm", "ft", "in"],
                    "options": {"enum_titles": ["Meters", "Centimeters", "Feet", "Inches"]},
                    "propertyOrder": 20,
                },
            },
        }))
        .unwrap()
    }

    // -- parse ---------------------------------------------------------------

    #[test]
    fn parses_a_representative_schema() {
        let schema = cable_schema();
        assert_eq!(schema.title.as_deref(), Some("Test Schema"));
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.properties[0].name, "length");
        assert_eq!(schema.properties[0].ty, PropertyType::Integer);
        assert!(schema.properties[1].choices.is_some());
    }

    #[test]
    fn rejects_unknown_top_level_type() {
        let err = AttributeSchema::parse(&json!({"type": "imaginary", "properties": {}}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema is not a valid schema document: \
             'imaginary' is not a supported schema type on ['type']"
        );
    }

    #[test]
    fn rejects_unknown_schema_keyword() {
        let result = AttributeSchema::parse(&json!({
            "type": "object",
            "allOf": [],
        }));
        assert_matches!(result, Err(CoreError::SchemaInvalid(msg)) if msg.contains("'allOf'"));
    }

    #[test]
    fn rejects_unknown_property_type() {
        let result = AttributeSchema::parse(&json!({
            "type": "object",
            "properties": {"x": {"type": "boolean"}},
        }));
        assert_matches!(
            result,
            Err(CoreError::SchemaInvalid(msg))
                if msg.contains("'boolean'") && msg.contains("['properties']['x']['type']")
        );
    }

    #[test]
    fn rejects_unparallel_enum_titles() {
        let result = AttributeSchema::parse(&json!({
            "type": "object",
            "properties": {
                "x": {
                    "type": "string",
                    "enum": ["a", "b"],
                    "options": {"enum_titles": ["A"]},
                },
            },
        }));
        assert_matches!(
            result,
            Err(CoreError::SchemaInvalid(msg)) if msg.contains("enum_titles")
        );
    }

    #[test]
    fn rejects_enum_titles_without_enum() {
        let result = AttributeSchema::parse(&json!({
            "type": "object",
            "properties": {
                "x": {"type": "string", "options": {"enum_titles": ["A"]}},
            },
        }));
        assert_matches!(result, Err(CoreError::SchemaInvalid(_)));
    }

    #[test]
    fn property_title_falls_back_to_name() {
        let schema = AttributeSchema::parse(&json!({
            "type": "object",
            "properties": {"reach": {"type": "string"}},
        }))
        .unwrap();
        assert_eq!(schema.properties[0].title, "reach");
    }

    #[test]
    fn property_with_default_is_optional() {
        let schema = AttributeSchema::parse(&json!({
            "type": "object",
            "properties": {"unit": {"type": "string", "default": "m"}},
        }))
        .unwrap();
        assert!(!schema.properties[0].is_required());
    }

    // -- validate ------------------------------------------------------------

    #[test]
    fn valid_document_passes() {
        let schema = cable_schema();
        assert!(validate(&schema, &json!({"length": 5, "length_unit": "m"})).is_ok());
    }

    #[test]
    fn missing_required_property_is_reported() {
        let schema = cable_schema();
        let violations = validate(&schema, &json!({"length": 5})).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "length_unit");
        assert_eq!(violations[0].message, "'length_unit' is a required property");
    }

    #[test]
    fn type_mismatch_is_reported() {
        let schema = cable_schema();
        let violations =
            validate(&schema, &json!({"length": "five", "length_unit": "m"})).unwrap_err();
        assert_eq!(violations[0].path, "length");
        assert_eq!(violations[0].message, "'five' is not of type 'integer'");
    }

    #[test]
    fn float_is_not_an_integer() {
        let schema = cable_schema();
        let violations =
            validate(&schema, &json!({"length": 5.5, "length_unit": "m"})).unwrap_err();
        assert_eq!(violations[0].path, "length");
    }

    #[test]
    fn value_outside_enumeration_is_reported() {
        let schema = cable_schema();
        let violations =
            validate(&schema, &json!({"length": 5, "length_unit": "furlong"})).unwrap_err();
        assert_eq!(violations[0].path, "length_unit");
        assert_eq!(
            violations[0].message,
            "'furlong' is not one of the permitted values"
        );
    }

    #[test]
    fn extra_keys_are_permitted() {
        let schema = cable_schema();
        let data = json!({"length": 5, "length_unit": "m", "note": "spare"});
        assert!(validate(&schema, &data).is_ok());
    }

    #[test]
    fn non_object_document_is_rejected() {
        let schema = cable_schema();
        let violations = validate(&schema, &json!([1, 2])).unwrap_err();
        assert_eq!(violations[0].path, "");
    }

    #[test]
    fn validation_does_not_mutate_the_document() {
        let schema = cable_schema();
        let data = json!({"length": 5, "length_unit": "m"});
        let before = data.clone();
        let _ = validate(&schema, &data);
        assert_eq!(data, before);
    }
}
