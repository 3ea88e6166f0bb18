use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::spec::ExternalDocs;
use crate::extensions::Extensions;
use crate::format::DataFormat;
use crate::reference::ReferenceOr;

/// A reference or inline schema.
pub type SchemaOrRef = ReferenceOr<Schema>;

/// A JSON Schema type keyword value. OpenAPI 3.0 has no `null` type;
/// nullability is the separate `nullable` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Discriminator for polymorphic schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discriminator {
    #[serde(rename = "propertyName")]
    pub property_name: String,
    /// Payload value to schema name or `$ref`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<IndexMap<String, String>>,
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}

/// XML representation metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Xml {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<bool>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// An OpenAPI 3.0 Schema object (extended JSON Schema Wright draft 00
/// subset).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,

    #[serde(
        rename = "default",
        default,
        deserialize_with = "crate::de::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    // Numeric constraints
    #[serde(rename = "multipleOf", skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_json::Number>,
    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_json::Number>,
    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    // String constraints
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    // Array constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    // Object shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(rename = "maxProperties", skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(rename = "minProperties", skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    // Composition
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaOrRef>>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaOrRef>>,

    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    // Read/Write only
    #[serde(rename = "readOnly", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(rename = "writeOnly", skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    #[serde(
        default,
        deserialize_with = "crate::de::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false)
    }

    pub fn is_write_only(&self) -> bool {
        self.write_only.unwrap_or(false)
    }

    /// Every direct subschema, paired with the pointer segments that lead
    /// to it from this schema.
    pub fn subschemas(&self) -> Vec<(Vec<String>, &SchemaOrRef)> {
        let mut children = Vec::new();
        if let Some(items) = &self.items {
            children.push((vec!["items".to_string()], items.as_ref()));
        }
        for (name, property) in self.properties.iter().flatten() {
            children.push((vec!["properties".to_string(), name.clone()], property));
        }
        if let Some(AdditionalProperties::Schema(additional)) = &self.additional_properties {
            children.push((vec!["additionalProperties".to_string()], additional.as_ref()));
        }
        for (keyword, members) in [
            ("allOf", &self.all_of),
            ("oneOf", &self.one_of),
            ("anyOf", &self.any_of),
        ] {
            for (i, member) in members.iter().flatten().enumerate() {
                children.push((vec![keyword.to_string(), i.to_string()], member));
            }
        }
        if let Some(not) = &self.not {
            children.push((vec!["not".to_string()], not.as_ref()));
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polymorphic_schema() {
        let schema: Schema = serde_yaml_ng::from_str(
            r##"
oneOf:
  - $ref: '#/components/schemas/Cat'
  - $ref: '#/components/schemas/Dog'
discriminator:
  propertyName: petType
  mapping:
    dog: '#/components/schemas/Dog'
"##,
        )
        .unwrap();
        assert_eq!(schema.one_of.as_ref().map(Vec::len), Some(2));
        let discriminator = schema.discriminator.as_ref().unwrap();
        assert_eq!(discriminator.property_name, "petType");
        assert_eq!(discriminator.mapping.as_ref().unwrap()["dog"], "#/components/schemas/Dog");
    }

    #[test]
    fn nullable_and_not() {
        let schema: Schema = serde_json::from_str(
            r#"{"type": "string", "nullable": true, "not": {"enum": ["admin"]}, "x-order": 2}"#,
        )
        .unwrap();
        assert!(schema.is_nullable());
        let not = schema.not.as_ref().and_then(|n| n.as_item()).unwrap();
        assert_eq!(not.enum_values, Some(vec![serde_json::json!("admin")]));
        assert_eq!(schema.extensions.get("x-order"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn rejects_null_type() {
        let result: Result<Schema, _> = serde_json::from_str(r#"{"type": "null"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn numbers_keep_their_form() {
        let schema: Schema =
            serde_json::from_str(r#"{"type": "number", "minimum": 0, "maximum": 1.5}"#).unwrap();
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["minimum"].to_string(), "0");
        assert_eq!(value["maximum"].to_string(), "1.5");
    }

    #[test]
    fn subschema_segments() {
        let schema: Schema = serde_json::from_str(
            r##"{
                "type": "object",
                "properties": {"tags": {"type": "array", "items": {"type": "string"}}},
                "additionalProperties": false,
                "allOf": [{"$ref": "#/components/schemas/Base"}]
            }"##,
        )
        .unwrap();
        let segments: Vec<Vec<String>> =
            schema.subschemas().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            segments,
            vec![
                vec!["properties".to_string(), "tags".to_string()],
                vec!["allOf".to_string(), "0".to_string()],
            ]
        );
    }

    #[test]
    fn explicit_nulls_stay_distinct_from_absence() {
        let source = serde_json::json!({
            "type": "object",
            "nullable": true,
            "default": null,
            "example": null,
            "required": [],
            "properties": {},
            "allOf": []
        });
        let schema: Schema = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(schema.default_value, Some(serde_json::Value::Null));
        assert_eq!(schema.properties.as_ref().map(IndexMap::len), Some(0));
        assert_eq!(serde_json::to_value(&schema).unwrap(), source);

        let bare: Schema = serde_json::from_str(r#"{"type": "object"}"#).unwrap();
        assert_eq!(bare.default_value, None);
        assert_eq!(bare.required, None);
        assert_eq!(serde_json::to_string(&bare).unwrap(), r#"{"type":"object"}"#);
    }
}
