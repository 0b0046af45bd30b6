//! Product kinds and deployment targets used by dependency overrides.

use crate::error::SchemaError;
use crate::schema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of build product generated for a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductType {
    App,
    StaticLibrary,
    DynamicLibrary,
    Framework,
    StaticFramework,
    UnitTests,
    UiTests,
    Bundle,
    CommandLineTool,
    AppExtension,
}

impl ProductType {
    /// Check if the product is linked into other products
    pub fn is_linkable(&self) -> bool {
        matches!(
            self,
            ProductType::StaticLibrary
                | ProductType::DynamicLibrary
                | ProductType::Framework
                | ProductType::StaticFramework
        )
    }

    /// Check if the product is linked statically
    pub fn is_static(&self) -> bool {
        matches!(self, ProductType::StaticLibrary | ProductType::StaticFramework)
    }
}

/// Device family an iOS deployment target runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentDevice {
    Iphone,
    Ipad,
    Mac,
}

/// Minimum platform version a dependency has to support.
///
/// Used when a package does not declare its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeploymentTarget {
    Ios {
        version: String,
        devices: BTreeSet<DeploymentDevice>,
    },
    MacOs { version: String },
    WatchOs { version: String },
    TvOs { version: String },
}

const ENTITY: &str = "DeploymentTarget";
const PLATFORM_FIELD: &str = "platform";

impl DeploymentTarget {
    /// iOS target for iPhone and iPad
    pub fn ios(version: impl Into<String>) -> Self {
        Self::Ios {
            version: version.into(),
            devices: default_devices(),
        }
    }

    pub fn macos(version: impl Into<String>) -> Self {
        Self::MacOs {
            version: version.into(),
        }
    }

    pub fn watchos(version: impl Into<String>) -> Self {
        Self::WatchOs {
            version: version.into(),
        }
    }

    pub fn tvos(version: impl Into<String>) -> Self {
        Self::TvOs {
            version: version.into(),
        }
    }

    pub fn platform(&self) -> &'static str {
        match self {
            Self::Ios { .. } => "iOS",
            Self::MacOs { .. } => "macOS",
            Self::WatchOs { .. } => "watchOS",
            Self::TvOs { .. } => "tvOS",
        }
    }

    pub fn version(&self) -> &str {
        match self {
            Self::Ios { version, .. }
            | Self::MacOs { version }
            | Self::WatchOs { version }
            | Self::TvOs { version } => version,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Ios { version, devices } => json!({
                PLATFORM_FIELD: self.platform(),
                "version": version,
                "devices": devices,
            }),
            _ => json!({ PLATFORM_FIELD: self.platform(), "version": self.version() }),
        }
    }

    /// Decode a target. The `platform` field acts as the discriminator;
    /// iOS `devices` defaults to iPhone and iPad when absent.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let record = schema::record(value, ENTITY)?;
        let platform = match record.get(PLATFORM_FIELD) {
            Some(Value::String(platform)) => platform.as_str(),
            Some(other) => {
                let found = other.to_string();
                return Err(SchemaError::unrecognized(ENTITY, Some(found.as_str())));
            },
            None => return Err(SchemaError::unrecognized(ENTITY, None)),
        };

        match platform {
            "iOS" => {
                let version = schema::required_str(record, ENTITY, "iOS", "version")?;
                let devices = match record.get("devices") {
                    None | Some(Value::Null) => default_devices(),
                    Some(devices) => serde_json::from_value(devices.clone()).map_err(|_| {
                        SchemaError::UnexpectedShape {
                            entity: ENTITY,
                            expected: "'devices' as a list of iphone, ipad or mac",
                        }
                    })?,
                };
                Ok(Self::Ios { version, devices })
            },
            "macOS" => Ok(Self::MacOs {
                version: schema::required_str(record, ENTITY, "macOS", "version")?,
            }),
            "watchOS" => Ok(Self::WatchOs {
                version: schema::required_str(record, ENTITY, "watchOS", "version")?,
            }),
            "tvOS" => Ok(Self::TvOs {
                version: schema::required_str(record, ENTITY, "tvOS", "version")?,
            }),
            other => Err(SchemaError::unrecognized(ENTITY, Some(other))),
        }
    }
}

fn default_devices() -> BTreeSet<DeploymentDevice> {
    BTreeSet::from([DeploymentDevice::Iphone, DeploymentDevice::Ipad])
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform(), self.version())
    }
}

impl Serialize for DeploymentTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DeploymentTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
