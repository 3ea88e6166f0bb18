use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::media_type::MediaType;
use super::parameter::HeaderOrRef;
use super::server::Server;
use crate::error::InvalidStatusKey;
use crate::extensions::Extensions;
use crate::http::{StatusClass, StatusCode, StatusKeyVisitor};
use crate::reference::ReferenceOr;

/// A design-time link from a response to another operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Link {
    /// Relative or absolute reference to the target operation.
    #[serde(rename = "operationRef", skip_serializing_if = "Option::is_none")]
    pub operation_ref: Option<String>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Parameter name to a constant or runtime expression such as
    /// `$response.body#/id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, serde_json::Value>>,

    #[serde(
        rename = "requestBody",
        default,
        deserialize_with = "crate::de::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A reference or inline link.
pub type LinkOrRef = ReferenceOr<Link>;

/// A response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, HeaderOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<IndexMap<String, LinkOrRef>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A reference or inline response.
pub type ResponseOrRef = ReferenceOr<Response>;

/// Responses map key: `default`, a status code or a status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKey {
    Default,
    Code(StatusCode),
    /// `1XX` to `5XX`. An explicit code takes precedence over its class.
    Range(StatusClass),
}

impl ResponseKey {
    /// Whether a response under this key describes `code`.
    pub fn matches(&self, code: StatusCode) -> bool {
        match self {
            ResponseKey::Default => true,
            ResponseKey::Code(own) => *own == code,
            ResponseKey::Range(class) => class.contains(code),
        }
    }
}

impl FromStr for ResponseKey {
    type Err = InvalidStatusKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "default" {
            return Ok(ResponseKey::Default);
        }
        s.parse()
            .map(ResponseKey::Code)
            .or_else(|_| s.parse().map(ResponseKey::Range))
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKey::Default => f.write_str("default"),
            ResponseKey::Code(code) => write!(f, "{code}"),
            ResponseKey::Range(class) => write!(f, "{class}"),
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

/// The response documented for `code`: the exact code first, then its
/// class, then `default`.
pub fn response_for(responses: &Responses, code: StatusCode) -> Option<&ResponseOrRef> {
    responses
        .get(&ResponseKey::Code(code))
        .or_else(|| responses.get(&ResponseKey::Range(code.class())))
        .or_else(|| responses.get(&ResponseKey::Default))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(n: u16) -> StatusCode {
        StatusCode::new(n).unwrap()
    }

    #[test]
    fn response_keys() {
        assert_eq!("default".parse::<ResponseKey>().unwrap(), ResponseKey::Default);
        assert_eq!("201".parse::<ResponseKey>().unwrap(), ResponseKey::Code(code(201)));
        assert_eq!(
            "5XX".parse::<ResponseKey>().unwrap(),
            ResponseKey::Range(StatusClass::new(5).unwrap())
        );
        assert!("5xx".parse::<ResponseKey>().is_err());
        assert!("20X".parse::<ResponseKey>().is_err());
        assert!("x-ok".parse::<ResponseKey>().is_err());
    }

    #[test]
    fn lookup_precedence() {
        let responses: Responses = serde_yaml_ng::from_str(
            r#"
404: {description: not found}
4XX: {description: client error}
default: {description: unexpected}
"#,
        )
        .unwrap();
        let description = |n| {
            response_for(&responses, code(n))
                .and_then(|r| r.as_item())
                .map(|r| r.description.as_str())
        };
        assert_eq!(description(404), Some("not found"));
        assert_eq!(description(409), Some("client error"));
        assert_eq!(description(500), Some("unexpected"));
    }

    #[test]
    fn keys_round_trip_as_strings() {
        let responses: Responses = serde_json::from_str(
            r#"{"2XX": {"description": "ok"}, "default": {"description": "error"}}"#,
        )
        .unwrap();
        assert!(responses.keys().any(|k| k.matches(code(204))));
        assert_eq!(
            serde_json::to_string(&responses).unwrap(),
            r#"{"2XX":{"description":"ok"},"default":{"description":"error"}}"#
        );
    }

    #[test]
    fn response_links() {
        let response: Response = serde_yaml_ng::from_str(
            r#"
description: the created user
links:
  GetUserByUserId:
    operationId: getUser
    parameters:
      userId: $response.body#/id
"#,
        )
        .unwrap();
        let link = response.links.as_ref().unwrap()["GetUserByUserId"].as_item().unwrap();
        assert_eq!(link.operation_id.as_deref(), Some("getUser"));
        assert_eq!(link.parameters.as_ref().unwrap()["userId"], "$response.body#/id");
    }
}
