use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::InvalidStatusKey;

/// HTTP methods that may appear as Path Item keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codes accepted under `StatusCodePolicy::Registered`: the common registry
/// codes plus the widely deployed 444, 499 and 599.
const REGISTERED_CODES: &[u16] = &[
    100, 101, 102, 200, 201, 202, 203, 204, 205, 206, 207, 208, 226, 300, 301, 302, 303, 304,
    305, 307, 308, 400, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411, 412, 413, 414,
    415, 416, 417, 421, 422, 423, 424, 426, 428, 429, 431, 444, 451, 499, 500, 501, 502, 503,
    504, 505, 506, 507, 508, 510, 511, 599,
];

/// A three-digit HTTP status code in `100..=599`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    pub fn new(code: u16) -> Option<Self> {
        (100..=599).contains(&code).then_some(StatusCode(code))
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn class(&self) -> StatusClass {
        StatusClass((self.0 / 100) as u8)
    }

    pub fn is_registered(&self) -> bool {
        REGISTERED_CODES.binary_search(&self.0).is_ok()
    }
}

impl FromStr for StatusCode {
    type Err = InvalidStatusKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStatusKey(s.to_string()));
        }
        s.parse::<u16>()
            .ok()
            .and_then(StatusCode::new)
            .ok_or_else(|| InvalidStatusKey(s.to_string()))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wildcard response class such as `4XX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusClass(u8);

impl StatusClass {
    pub fn new(class: u8) -> Option<Self> {
        (1..=5).contains(&class).then_some(StatusClass(class))
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, code: StatusCode) -> bool {
        code.class() == *self
    }
}

impl FromStr for StatusClass {
    type Err = InvalidStatusKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        // Upper-case X only.
        if bytes.len() == 3 && bytes[1] == b'X' && bytes[2] == b'X' {
            if let Some(class) = StatusClass::new(bytes[0].wrapping_sub(b'0')) {
                return Ok(class);
            }
        }
        Err(InvalidStatusKey(s.to_string()))
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}XX", self.0)
    }
}

/// Visitor for Responses map keys.
///
/// JSON always hands over strings, but YAML documents commonly write
/// unquoted `200:` keys which arrive as integers.
pub(crate) struct StatusKeyVisitor<T>(PhantomData<T>);

impl<T> StatusKeyVisitor<T> {
    pub(crate) fn new() -> Self {
        StatusKeyVisitor(PhantomData)
    }
}

impl<'de, T> Visitor<'de> for StatusKeyVisitor<T>
where
    T: FromStr<Err = InvalidStatusKey>,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"default\" or an HTTP status code")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        self.visit_str(&v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        self.visit_str(&v.to_string())
    }
}
