use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::MediaType;
use crate::extensions::Extensions;
use crate::reference::ReferenceOr;

/// A request body definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Media type or media type range to its description.
    pub content: IndexMap<String, MediaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl RequestBody {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// A reference or inline request body.
pub type RequestBodyOrRef = ReferenceOr<RequestBody>;
