//! Dependency sets installed through Swift Package Manager.

use super::{DeploymentTarget, PackageSpec, ProductType};
use crate::error::SchemaError;
use crate::schema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};

const ENTITY: &str = "DependencySet";

/// Packages to install plus the overrides applied to their targets.
///
/// Package order is kept as given and duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
    /// Packages in manifest order
    pub packages: Vec<PackageSpec>,

    /// Product type forced for a target, keyed by target name
    #[serde(rename = "productTypes")]
    pub product_type_overrides: BTreeMap<String, ProductType>,

    /// Fallback targets for packages that declare none
    #[serde(rename = "deploymentTargets")]
    pub deployment_target_overrides: BTreeSet<DeploymentTarget>,
}

impl DependencySet {
    pub fn new(packages: Vec<PackageSpec>) -> Self {
        Self {
            packages,
            ..Self::default()
        }
    }

    /// Force a product type for a target
    pub fn with_product_type(mut self, target: impl Into<String>, product: ProductType) -> Self {
        self.product_type_overrides.insert(target.into(), product);
        self
    }

    /// Add a fallback deployment target
    pub fn with_deployment_target(mut self, target: DeploymentTarget) -> Self {
        self.deployment_target_overrides.insert(target);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Product type override for a target, if any
    pub fn product_type(&self, target: &str) -> Option<ProductType> {
        self.product_type_overrides.get(target).copied()
    }

    /// Decode from the structured form.
    ///
    /// All three collections are optional and default to empty. Each package
    /// and deployment target goes through its own discriminator-first decode.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let record = schema::record(value, ENTITY)?;

        let packages = match record.get("packages") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(PackageSpec::from_value)
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(shape("'packages' as a list")),
        };

        let product_type_overrides = match record.get("productTypes") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(overrides) => serde_json::from_value(overrides.clone())
                .map_err(|_| shape("'productTypes' as a map of target names to product types"))?,
        };

        let deployment_target_overrides = match record.get("deploymentTargets") {
            None | Some(Value::Null) => BTreeSet::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(DeploymentTarget::from_value)
                .collect::<Result<_, _>>()?,
            Some(_) => return Err(shape("'deploymentTargets' as a list")),
        };

        Ok(Self {
            packages,
            product_type_overrides,
            deployment_target_overrides,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "packages": self.packages.iter().map(PackageSpec::to_value).collect::<Vec<_>>(),
            "productTypes": self.product_type_overrides,
            "deploymentTargets": self
                .deployment_target_overrides
                .iter()
                .map(DeploymentTarget::to_value)
                .collect::<Vec<_>>(),
        })
    }

    pub fn local_packages(&self) -> impl Iterator<Item = &PackageSpec> {
        self.packages.iter().filter(|p| p.is_local())
    }

    pub fn remote_packages(&self) -> impl Iterator<Item = &PackageSpec> {
        self.packages.iter().filter(|p| !p.is_local())
    }
}

fn shape(expected: &'static str) -> SchemaError {
    SchemaError::UnexpectedShape {
        entity: ENTITY,
        expected,
    }
}

impl<'de> Deserialize<'de> for DependencySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PackageRequirement;

    fn sample() -> DependencySet {
        DependencySet::new(vec![
            PackageSpec::remote(
                "https://github.com/Alamofire/Alamofire.git",
                PackageRequirement::up_to_next_major("5.0.0"),
            ),
            PackageSpec::local("../Lib"),
        ])
        .with_product_type("Alamofire", ProductType::StaticFramework)
        .with_deployment_target(DeploymentTarget::ios("13.0"))
    }

    #[test]
    fn test_builders() {
        let set = sample();
        assert_eq!(set.packages.len(), 2);
        assert_eq!(set.product_type("Alamofire"), Some(ProductType::StaticFramework));
        assert_eq!(set.product_type("Missing"), None);
        assert_eq!(set.local_packages().count(), 1);
        assert_eq!(set.remote_packages().count(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_duplicate_packages_are_kept() {
        let set =
            DependencySet::new(vec![PackageSpec::local("../Lib"), PackageSpec::local("../Lib")]);
        assert_eq!(set.packages.len(), 2);
    }

    #[test]
    fn test_deployment_targets_compare_as_set() {
        let a = DependencySet::default()
            .with_deployment_target(DeploymentTarget::ios("13.0"))
            .with_deployment_target(DeploymentTarget::macos("11.0"));
        let b = DependencySet::default()
            .with_deployment_target(DeploymentTarget::macos("11.0"))
            .with_deployment_target(DeploymentTarget::ios("13.0"))
            .with_deployment_target(DeploymentTarget::ios("13.0"));
        assert_eq!(a, b);
        assert_eq!(b.deployment_target_overrides.len(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let set = sample();
        let text = serde_json::to_string(&set).unwrap();
        assert!(text.contains("\"productTypes\":{\"Alamofire\":\"staticFramework\"}"));
        let parsed: DependencySet = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, set);
        assert_eq!(DependencySet::from_value(&set.to_value()).unwrap(), set);
    }

    #[test]
    fn test_optional_collections_default_to_empty() {
        let parsed: DependencySet =
            serde_json::from_str(r#"{"packages":[{"type":"local","path":"../Lib"}]}"#).unwrap();
        assert_eq!(parsed, DependencySet::new(vec![PackageSpec::local("../Lib")]));
    }

    #[test]
    fn test_typed_decode_errors() {
        let err = DependencySet::from_value(&serde_json::json!({
            "packages": [{
                "type": "remote",
                "url": "https://x/y.git",
                "requirement": { "type": "tag" }
            }]
        }))
        .unwrap_err();
        assert_eq!(err, SchemaError::unrecognized("PackageRequirement", Some("tag")));

        let err =
            DependencySet::from_value(&serde_json::json!({ "packages": "../Lib" })).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedShape { entity: "DependencySet", .. }));

        let value = serde_json::json!({ "productTypes": { "A": "plugin" } });
        let err = DependencySet::from_value(&value).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_invalid_package_fails_the_set() {
        let err = serde_json::from_str::<DependencySet>(r#"{"packages":[{"type":"local"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing required field 'path'"));
    }
}
