//! Package references.

use super::PackageRequirement;
use crate::error::SchemaError;
use crate::schema::{self, TYPE_FIELD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

const ENTITY: &str = "PackageSpec";

/// An external package installed through Swift Package Manager
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageSpec {
    /// Package checked out on the local filesystem
    Local { path: String },

    /// Package fetched from a repository URL
    Remote {
        url: String,
        requirement: PackageRequirement,
    },
}

impl PackageSpec {
    pub fn local(path: impl Into<String>) -> Self {
        Self::Local { path: path.into() }
    }

    pub fn remote(url: impl Into<String>, requirement: PackageRequirement) -> Self {
        Self::Remote {
            url: url.into(),
            requirement,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }

    /// The local path or remote URL
    pub fn location(&self) -> &str {
        match self {
            Self::Local { path } => path,
            Self::Remote { url, .. } => url,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::Remote { .. } => "remote",
        }
    }

    /// Render as a `.package(...)` entry of `Package.swift`
    pub fn manifest_value(&self) -> String {
        match self {
            Self::Local { path } => format!(".package(path: \"{}\")", path),
            Self::Remote { url, requirement } => {
                format!(".package(url: \"{}\", {})", url, requirement.manifest_value())
            },
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Local { path } => json!({ TYPE_FIELD: "local", "path": path }),
            Self::Remote { url, requirement } => json!({
                TYPE_FIELD: "remote",
                "url": url,
                "requirement": requirement.to_value(),
            }),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let record = schema::record(value, ENTITY)?;

        match schema::discriminator(record, ENTITY)? {
            "local" => Ok(Self::Local {
                path: schema::required_str(record, ENTITY, "local", "path")?,
            }),
            "remote" => {
                let url = schema::required_str(record, ENTITY, "remote", "url")?;
                let requirement = schema::required(record, ENTITY, "remote", "requirement")?;
                Ok(Self::Remote {
                    url,
                    requirement: PackageRequirement::from_value(requirement)?,
                })
            },
            other => Err(SchemaError::unrecognized(ENTITY, Some(other))),
        }
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.manifest_value())
    }
}

impl Serialize for PackageSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackageSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_manifest_value() {
        assert_eq!(PackageSpec::local("../Lib").manifest_value(), r#".package(path: "../Lib")"#);
    }

    #[test]
    fn test_remote_manifest_value() {
        let package = PackageSpec::remote(
            "https://x/y.git",
            PackageRequirement::up_to_next_major("1.0.0"),
        );
        assert_eq!(
            package.manifest_value(),
            r#".package(url: "https://x/y.git", .upToNextMajor(from: "1.0.0"))"#
        );

        let package =
            PackageSpec::remote("https://x/y.git", PackageRequirement::range("1.0.0", "1.5.0"));
        assert_eq!(
            package.to_string(),
            r#".package(url: "https://x/y.git", "1.0.0"..<"1.5.0")"#
        );
    }

    #[test]
    fn test_decode_remote() {
        let package: PackageSpec = serde_json::from_str(
            r#"{"type":"remote","url":"https://x/y.git",
                "requirement":{"type":"exact","version":"2.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(
            package,
            PackageSpec::remote("https://x/y.git", PackageRequirement::exact("2.0.0"))
        );
        assert_eq!(package.location(), "https://x/y.git");
        assert!(!package.is_local());
    }

    #[test]
    fn test_decode_remote_without_requirement() {
        let err = PackageSpec::from_value(&json!({ "type": "remote", "url": "https://x/y.git" }))
            .unwrap_err();
        assert_eq!(err, SchemaError::missing("PackageSpec", "remote", "requirement"));
    }

    #[test]
    fn test_decode_remote_with_invalid_requirement() {
        let value = json!({
            "type": "remote",
            "url": "https://x/y.git",
            "requirement": { "type": "latest" },
        });
        let err = PackageSpec::from_value(&value).unwrap_err();
        assert_eq!(err, SchemaError::unrecognized("PackageRequirement", Some("latest")));
    }

    #[test]
    fn test_decode_unknown_package_type() {
        let err = PackageSpec::from_value(&json!({ "type": "registry", "id": "x.y" })).unwrap_err();
        assert_eq!(err, SchemaError::unrecognized("PackageSpec", Some("registry")));
    }

    #[test]
    fn test_round_trip() {
        for package in [
            PackageSpec::local("../Lib"),
            PackageSpec::remote("https://x/y.git", PackageRequirement::branch("develop")),
        ] {
            let text = serde_json::to_string(&package).unwrap();
            assert_eq!(serde_json::from_str::<PackageSpec>(&text).unwrap(), package);
        }
    }
}
