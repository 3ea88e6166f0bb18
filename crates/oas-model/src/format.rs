use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The `format` modifier of a primitive type.
///
/// Both spec versions list the same well-known formats but leave the field
/// open, so anything else lands in [`DataFormat::Other`] verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataFormat {
    Int32,
    Int64,
    Float,
    Double,
    String,
    Boolean,
    Byte,
    Binary,
    Date,
    DateTime,
    Password,
    Other(String),
}

impl DataFormat {
    pub fn as_str(&self) -> &str {
        match self {
            DataFormat::Int32 => "int32",
            DataFormat::Int64 => "int64",
            DataFormat::Float => "float",
            DataFormat::Double => "double",
            DataFormat::String => "string",
            DataFormat::Boolean => "boolean",
            DataFormat::Byte => "byte",
            DataFormat::Binary => "binary",
            DataFormat::Date => "date",
            DataFormat::DateTime => "date-time",
            DataFormat::Password => "password",
            DataFormat::Other(other) => other,
        }
    }

    pub fn is_well_known(&self) -> bool {
        !matches!(self, DataFormat::Other(_))
    }
}

impl FromStr for DataFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "int32" => DataFormat::Int32,
            "int64" => DataFormat::Int64,
            "float" => DataFormat::Float,
            "double" => DataFormat::Double,
            "string" => DataFormat::String,
            "boolean" => DataFormat::Boolean,
            "byte" => DataFormat::Byte,
            "binary" => DataFormat::Binary,
            "date" => DataFormat::Date,
            "date-time" => DataFormat::DateTime,
            "password" => DataFormat::Password,
            other => DataFormat::Other(other.to_string()),
        })
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let Ok(format) = s.parse::<DataFormat>();
        Ok(format)
    }
}
