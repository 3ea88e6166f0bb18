//! Swagger 2.0 document shapes.

mod check;
pub mod items;
pub mod operation;
pub mod parameter;
pub mod response;
pub mod schema;
pub mod security;
pub mod spec;

pub use items::{CollectionFormat, Items, PrimitiveType, Validations};
pub use operation::{Operation, PathItem};
pub use parameter::{
    BodyParameter, Parameter, ParameterCollectionFormat, ParameterKind, ParameterLocation,
    ParameterOrRef, ParameterType, SimpleParameter,
};
pub use response::{Header, Response, ResponseKey, ResponseOrRef, Responses};
pub use schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType, Xml};
pub use security::{
    ApiKeyLocation, ApiKeyScheme, BasicScheme, OAuth2Flow, OAuth2Scheme, SecurityRequirement,
    SecurityScheme,
};
pub use spec::{Contact, ExternalDocs, Info, License, Scheme, Swagger, Tag};
