use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extensions::Extensions;
use crate::reference::ReferenceOr;

/// Location of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

/// An API key passed in a header, query parameter or cookie.
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

/// HTTP authentication as registered with IANA, e.g. `basic` or `bearer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpScheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub scheme: String,

    /// Hint for how a bearer token is formatted, e.g. `JWT`.
    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl HttpScheme {
    pub fn is_bearer(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("bearer")
    }
}

/// The implicit flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplicitFlow {
    #[serde(rename = "authorizationUrl")]
    pub authorization_url: String,

    #[serde(rename = "refreshUrl", skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    pub scopes: IndexMap<String, String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// The password and client credentials flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenFlow {
    #[serde(rename = "tokenUrl")]
    pub token_url: String,

    #[serde(rename = "refreshUrl", skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    pub scopes: IndexMap<String, String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// The authorization code flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationCodeFlow {
    #[serde(rename = "authorizationUrl")]
    pub authorization_url: String,

    #[serde(rename = "tokenUrl")]
    pub token_url: String,

    #[serde(rename = "refreshUrl", skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    pub scopes: IndexMap<String, String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// OAuth2 flows configuration. Each flow carries only the URLs it uses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OAuthFlows {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<ImplicitFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<TokenFlow>,
    #[serde(rename = "clientCredentials", skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<TokenFlow>,
    #[serde(rename = "authorizationCode", skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCodeFlow>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl OAuthFlows {
    /// Scope names across every configured flow, deduplicated.
    pub fn scopes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let maps = [
            self.implicit.as_ref().map(|f| &f.scopes),
            self.password.as_ref().map(|f| &f.scopes),
            self.client_credentials.as_ref().map(|f| &f.scopes),
            self.authorization_code.as_ref().map(|f| &f.scopes),
        ];
        for scope in maps.into_iter().flatten().flat_map(IndexMap::keys) {
            if !names.contains(&scope.as_str()) {
                names.push(scope);
            }
        }
        names
    }
}

/// OAuth2 with one or more flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Scheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub flows: OAuthFlows,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// OpenID Connect discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenIdConnectScheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "openIdConnectUrl")]
    pub open_id_connect_url: String,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A security scheme definition, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "apiKey")]
    ApiKey(ApiKeyScheme),
    #[serde(rename = "http")]
    Http(HttpScheme),
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Scheme),
    #[serde(rename = "openIdConnect")]
    OpenIdConnect(OpenIdConnectScheme),
}

impl SecurityScheme {
    pub fn description(&self) -> Option<&str> {
        match self {
            SecurityScheme::ApiKey(s) => s.description.as_deref(),
            SecurityScheme::Http(s) => s.description.as_deref(),
            SecurityScheme::OAuth2(s) => s.description.as_deref(),
            SecurityScheme::OpenIdConnect(s) => s.description.as_deref(),
        }
    }
}

/// A reference or inline security scheme.
pub type SecuritySchemeOrRef = ReferenceOr<SecurityScheme>;

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_bearer() {
        let scheme: SecurityScheme = serde_json::from_str(
            r#"{"type": "http", "scheme": "Bearer", "bearerFormat": "JWT"}"#,
        )
        .unwrap();
        let SecurityScheme::Http(http) = scheme else {
            panic!("expected http scheme");
        };
        assert!(http.is_bearer());
        assert_eq!(http.bearer_format.as_deref(), Some("JWT"));
    }

    #[test]
    fn oauth2_flows() {
        let scheme: SecurityScheme = serde_yaml_ng::from_str(
            r#"
type: oauth2
flows:
  implicit:
    authorizationUrl: https://example.com/api/oauth/dialog
    scopes:
      write:pets: modify pets in your account
      read:pets: read your pets
  authorizationCode:
    authorizationUrl: https://example.com/api/oauth/dialog
    tokenUrl: https://example.com/api/oauth/token
    scopes:
      read:pets: read your pets
"#,
        )
        .unwrap();
        let SecurityScheme::OAuth2(oauth) = &scheme else {
            panic!("expected oauth2 scheme");
        };
        assert_eq!(oauth.flows.scopes(), vec!["write:pets", "read:pets"]);
        assert!(oauth.flows.password.is_none());
    }

    #[test]
    fn client_credentials_needs_token_url() {
        let result: Result<OAuthFlows, _> = serde_json::from_str(
            r#"{"clientCredentials": {"authorizationUrl": "https://a.example", "scopes": {}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn api_key_in_cookie() {
        let scheme: SecurityScheme =
            serde_json::from_str(r#"{"type": "apiKey", "name": "session", "in": "cookie"}"#)
                .unwrap();
        assert!(matches!(
            scheme,
            SecurityScheme::ApiKey(ApiKeyScheme {
                location: ApiKeyLocation::Cookie,
                ..
            })
        ));
    }

    #[test]
    fn rejects_swagger_basic_type() {
        let result: Result<SecurityScheme, _> = serde_json::from_str(r#"{"type": "basic"}"#);
        assert!(result.is_err());
    }
}
