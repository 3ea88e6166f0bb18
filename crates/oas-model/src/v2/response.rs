use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::items::{CollectionFormat, Items, PrimitiveType, Validations};
use super::schema::SchemaOrRef;
use crate::error::InvalidStatusKey;
use crate::extensions::Extensions;
use crate::format::DataFormat;
use crate::http::{StatusCode, StatusKeyVisitor};
use crate::reference::ReferenceOr;

/// A header sent with a response. The header name is the map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub header_type: PrimitiveType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    #[serde(rename = "collectionFormat", skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,

    #[serde(flatten)]
    pub validations: Validations,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A single response from an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    /// Absent when the response has no body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, Header>>,

    /// Example payloads keyed by MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<IndexMap<String, serde_json::Value>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A `$ref` to a response definition or an inline response.
pub type ResponseOrRef = ReferenceOr<Response>;

/// Responses map key: `default` or a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKey {
    Default,
    Code(StatusCode),
}

impl FromStr for ResponseKey {
    type Err = InvalidStatusKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "default" {
            return Ok(ResponseKey::Default);
        }
        s.parse().map(ResponseKey::Code)
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKey::Default => f.write_str("default"),
            ResponseKey::Code(code) => write!(f, "{code}"),
        }
    }
}

impl Serialize for ResponseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResponseKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StatusKeyVisitor::<Self>::new())
    }
}

/// Expected responses of an operation.
pub type Responses = IndexMap<ResponseKey, ResponseOrRef>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_keys() {
        assert_eq!("default".parse::<ResponseKey>().unwrap(), ResponseKey::Default);
        assert_eq!(
            "404".parse::<ResponseKey>().unwrap(),
            ResponseKey::Code(StatusCode::new(404).unwrap())
        );
        // Wildcard classes arrived with OpenAPI 3.
        assert!("4XX".parse::<ResponseKey>().is_err());
        assert!("ok".parse::<ResponseKey>().is_err());
    }

    #[test]
    fn responses_from_yaml_integer_keys() {
        let yaml = r#"
200:
  description: OK
  schema:
    type: array
    items:
      $ref: '#/definitions/Pet'
  headers:
    X-Rate-Limit:
      type: integer
      format: int32
default:
  $ref: '#/responses/Error'
"#;
        let responses: Responses = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(responses.len(), 2);
        let ok = responses
            .get(&ResponseKey::Code(StatusCode::new(200).unwrap()))
            .and_then(|r| r.as_item())
            .unwrap();
        let headers = ok.headers.as_ref().unwrap();
        assert_eq!(headers["X-Rate-Limit"].header_type, PrimitiveType::Integer);
        assert!(responses[&ResponseKey::Default].is_reference());
    }

    #[test]
    fn rejects_bad_status_key() {
        let result: Result<Responses, _> =
            serde_json::from_str(r#"{"2XX": {"description": "any success"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn keys_serialize_as_strings() {
        let responses: Responses =
            serde_json::from_str(r#"{"204": {"description": "deleted"}}"#).unwrap();
        let json = serde_json::to_string(&responses).unwrap();
        assert_eq!(json, r#"{"204":{"description":"deleted"}}"#);
    }
}
