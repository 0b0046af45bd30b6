//! Version constraints for remote packages.

use crate::error::SchemaError;
use crate::schema::{self, TYPE_FIELD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

const ENTITY: &str = "PackageRequirement";

/// Which versions of a remote package are acceptable.
///
/// Version strings are opaque; nothing here validates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageRequirement {
    Exact(String),
    UpToNextMajor(String),
    UpToNextMinor(String),
    Branch(String),
    Revision(String),
    /// `from` inclusive, `to` exclusive
    Range { from: String, to: String },
}

impl PackageRequirement {
    pub fn exact(version: impl Into<String>) -> Self {
        Self::Exact(version.into())
    }

    pub fn up_to_next_major(version: impl Into<String>) -> Self {
        Self::UpToNextMajor(version.into())
    }

    pub fn up_to_next_minor(version: impl Into<String>) -> Self {
        Self::UpToNextMinor(version.into())
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Self::Branch(name.into())
    }

    pub fn revision(id: impl Into<String>) -> Self {
        Self::Revision(id.into())
    }

    pub fn range(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Range {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Exact(_) => "exact",
            Self::UpToNextMajor(_) => "upToNextMajor",
            Self::UpToNextMinor(_) => "upToNextMinor",
            Self::Branch(_) => "branch",
            Self::Revision(_) => "revision",
            Self::Range { .. } => "range",
        }
    }

    /// Render as a `Package.swift` requirement expression.
    ///
    /// Field text is inserted verbatim, without escaping.
    pub fn manifest_value(&self) -> String {
        match self {
            Self::Exact(version) => format!(".exact(\"{}\")", version),
            Self::UpToNextMajor(version) => format!(".upToNextMajor(from: \"{}\")", version),
            Self::UpToNextMinor(version) => format!(".upToNextMinor(from: \"{}\")", version),
            Self::Branch(branch) => format!(".branch(\"{}\")", branch),
            Self::Revision(revision) => format!(".revision(\"{}\")", revision),
            Self::Range { from, to } => format!("\"{}\"..<\"{}\"", from, to),
        }
    }

    pub fn to_value(&self) -> Value {
        let kind = self.type_name();
        match self {
            Self::Exact(version) | Self::UpToNextMajor(version) | Self::UpToNextMinor(version) => {
                json!({ TYPE_FIELD: kind, "version": version })
            },
            Self::Branch(name) => json!({ TYPE_FIELD: kind, "name": name }),
            Self::Revision(id) => json!({ TYPE_FIELD: kind, "id": id }),
            Self::Range { from, to } => json!({ TYPE_FIELD: kind, "from": from, "to": to }),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let record = schema::record(value, ENTITY)?;
        let field = |variant: &'static str, name: &'static str| {
            schema::required_str(record, ENTITY, variant, name)
        };

        match schema::discriminator(record, ENTITY)? {
            "exact" => Ok(Self::Exact(field("exact", "version")?)),
            "upToNextMajor" => Ok(Self::UpToNextMajor(field("upToNextMajor", "version")?)),
            "upToNextMinor" => Ok(Self::UpToNextMinor(field("upToNextMinor", "version")?)),
            "branch" => Ok(Self::Branch(field("branch", "name")?)),
            "revision" => Ok(Self::Revision(field("revision", "id")?)),
            "range" => Ok(Self::Range {
                from: field("range", "from")?,
                to: field("range", "to")?,
            }),
            other => Err(SchemaError::unrecognized(ENTITY, Some(other))),
        }
    }
}

impl fmt::Display for PackageRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.manifest_value())
    }
}

impl Serialize for PackageRequirement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackageRequirement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
