use serde::{Deserialize, Serialize};

use crate::extensions::Extensions;
use crate::format::DataFormat;

/// Types allowed for Items and Header objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
}

/// Array serialization for Items and Header objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    #[default]
    Csv,
    Ssv,
    Tsv,
    Pipes,
}

impl CollectionFormat {
    pub fn separator(&self) -> char {
        match self {
            CollectionFormat::Csv => ',',
            CollectionFormat::Ssv => ' ',
            CollectionFormat::Tsv => '\t',
            CollectionFormat::Pipes => '|',
        }
    }
}

/// JSON Schema draft 4 validation keywords shared by Items, Header,
/// non-body Parameter and Schema objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Validations {
    #[serde(
        rename = "default",
        default,
        deserialize_with = "crate::de::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_json::Number>,
    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_json::Number>,
    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    #[serde(rename = "multipleOf", skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<serde_json::Number>,
}

/// A limited subset of JSON Schema describing array elements of non-body
/// parameters and headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub item_type: PrimitiveType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,

    #[serde(rename = "collectionFormat", skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,

    #[serde(flatten)]
    pub validations: Validations,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Items {
    pub fn collection_format_or_default(&self) -> CollectionFormat {
        self.collection_format.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_items() {
        let items: Items = serde_json::from_str(
            r#"{"type": "array", "collectionFormat": "pipes", "items": {"type": "integer", "minimum": 1}}"#,
        )
        .unwrap();
        assert_eq!(items.item_type, PrimitiveType::Array);
        assert_eq!(items.collection_format_or_default().separator(), '|');
        let inner = items.items.as_ref().unwrap();
        assert_eq!(inner.item_type, PrimitiveType::Integer);
        assert_eq!(inner.validations.minimum, Some(1.into()));
        assert_eq!(inner.collection_format_or_default(), CollectionFormat::Csv);
    }

    #[test]
    fn rejects_object_type() {
        let result: Result<Items, _> = serde_json::from_str(r#"{"type": "object"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_multi_collection_format() {
        let result: Result<Items, _> =
            serde_json::from_str(r#"{"type": "string", "collectionFormat": "multi"}"#);
        assert!(result.is_err());
    }
}
