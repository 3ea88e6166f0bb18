//! OpenAPI 3.0.x document shapes.

mod check;
pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;
pub mod spec;

pub use components::Components;
pub use media_type::{Encoding, Example, ExampleOrRef, MediaType};
pub use operation::{Callback, CallbackOrRef, Operation, PathItem};
pub use parameter::{Header, HeaderOrRef, Parameter, ParameterLocation, ParameterOrRef, Style};
pub use request_body::{RequestBody, RequestBodyOrRef};
pub use response::{Link, LinkOrRef, Response, ResponseKey, ResponseOrRef, Responses, response_for};
pub use schema::{AdditionalProperties, Discriminator, Schema, SchemaOrRef, SchemaType, Xml};
pub use security::{
    ApiKeyLocation, ApiKeyScheme, AuthorizationCodeFlow, HttpScheme, ImplicitFlow, OAuth2Scheme,
    OAuthFlows, OpenIdConnectScheme, SecurityRequirement, SecurityScheme, SecuritySchemeOrRef,
    TokenFlow,
};
pub use server::{Server, ServerVariable};
pub use spec::{Contact, ExternalDocs, Info, License, OpenApi, Tag};
