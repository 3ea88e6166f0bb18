use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extensions::Extensions;

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
}

/// HTTP basic authentication.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicScheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// An API key passed in a header or query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyScheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub name: String,

    #[serde(rename = "in")]
    pub location: ApiKeyLocation,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// The OAuth2 flow, tagged by `flow`. Each flow carries exactly the URLs it
/// needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flow")]
pub enum OAuth2Flow {
    #[serde(rename = "implicit")]
    Implicit {
        #[serde(rename = "authorizationUrl")]
        authorization_url: String,
    },
    #[serde(rename = "password")]
    Password {
        #[serde(rename = "tokenUrl")]
        token_url: String,
    },
    #[serde(rename = "application")]
    Application {
        #[serde(rename = "tokenUrl")]
        token_url: String,
    },
    #[serde(rename = "accessCode")]
    AccessCode {
        #[serde(rename = "authorizationUrl")]
        authorization_url: String,
        #[serde(rename = "tokenUrl")]
        token_url: String,
    },
}

impl OAuth2Flow {
    pub fn authorization_url(&self) -> Option<&str> {
        match self {
            OAuth2Flow::Implicit { authorization_url }
            | OAuth2Flow::AccessCode {
                authorization_url, ..
            } => Some(authorization_url),
            _ => None,
        }
    }

    pub fn token_url(&self) -> Option<&str> {
        match self {
            OAuth2Flow::Password { token_url }
            | OAuth2Flow::Application { token_url }
            | OAuth2Flow::AccessCode { token_url, .. } => Some(token_url),
            OAuth2Flow::Implicit { .. } => None,
        }
    }
}

/// OAuth2 with a single flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Scheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub flow: OAuth2Flow,

    /// Scope name to short description.
    pub scopes: IndexMap<String, String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A security scheme definition, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "basic")]
    Basic(BasicScheme),
    #[serde(rename = "apiKey")]
    ApiKey(ApiKeyScheme),
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Scheme),
}

impl SecurityScheme {
    pub fn description(&self) -> Option<&str> {
        match self {
            SecurityScheme::Basic(s) => s.description.as_deref(),
            SecurityScheme::ApiKey(s) => s.description.as_deref(),
            SecurityScheme::OAuth2(s) => s.description.as_deref(),
        }
    }
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_scheme() {
        let scheme: SecurityScheme =
            serde_json::from_str(r#"{"type": "apiKey", "name": "api_key", "in": "header"}"#)
                .unwrap();
        match scheme {
            SecurityScheme::ApiKey(key) => {
                assert_eq!(key.name, "api_key");
                assert_eq!(key.location, ApiKeyLocation::Header);
            }
            other => panic!("expected apiKey, got {other:?}"),
        }
    }

    #[test]
    fn oauth2_access_code_needs_both_urls() {
        let result: Result<SecurityScheme, _> = serde_json::from_str(
            r#"{"type": "oauth2", "flow": "accessCode", "authorizationUrl": "https://a.example/auth", "scopes": {}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn oauth2_implicit() {
        let scheme: SecurityScheme = serde_json::from_str(
            r#"{
                "type": "oauth2",
                "flow": "implicit",
                "authorizationUrl": "https://petstore.example/oauth/dialog",
                "scopes": {"write:pets": "modify pets", "read:pets": "read pets"},
                "x-client-id": "petstore"
            }"#,
        )
        .unwrap();
        let SecurityScheme::OAuth2(oauth) = &scheme else {
            panic!("expected oauth2");
        };
        assert_eq!(
            oauth.flow.authorization_url(),
            Some("https://petstore.example/oauth/dialog")
        );
        assert_eq!(oauth.flow.token_url(), None);
        assert_eq!(oauth.scopes.len(), 2);
        assert_eq!(oauth.extensions.0.len(), 1);

        let value = serde_json::to_value(&scheme).unwrap();
        assert_eq!(value["flow"], "implicit");
        assert_eq!(value["type"], "oauth2");
        assert_eq!(value["x-client-id"], "petstore");
    }

    #[test]
    fn rejects_openapi3_scheme_types() {
        let result: Result<SecurityScheme, _> =
            serde_json::from_str(r#"{"type": "http", "scheme": "bearer"}"#);
        assert!(result.is_err());
    }
}
