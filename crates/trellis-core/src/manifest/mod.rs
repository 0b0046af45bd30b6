//! `Package.swift` synthesis.
//!
//! Turns a [`DependencySet`] into the source of a package manifest that the
//! Swift Package Manager can resolve. Only the package list is rendered;
//! product type and deployment target overrides are applied by the project
//! generator itself and never appear in the manifest.

use crate::types::DependencySet;

/// Name given to the synthesized package
pub const PACKAGE_NAME: &str = "PackageName";

/// Separator placed between rendered package entries
pub const ENTRY_SEPARATOR: &str = "\n\t";

/// Render the `Package.swift` source for a dependency set.
///
/// Every entry is followed by a comma, including the last one. The output
/// has no trailing newline.
pub fn synthesize(dependencies: &DependencySet) -> String {
    let entries = dependencies
        .packages
        .iter()
        .map(|package| format!("{},", package.manifest_value()))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR);

    format!(
        "import PackageDescription\n\
         \n\
         let package = Package(\n    \
             name: \"{name}\",\n    \
             dependencies: [\n        \
                 {entries}\n    \
             ]\n\
         )",
        name = PACKAGE_NAME,
        entries = entries,
    )
}

impl DependencySet {
    /// Returns the `Package.swift` representation
    pub fn manifest_value(&self) -> String {
        synthesize(self)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::types::{PackageRequirement, PackageSpec};
    use proptest::prelude::*;

    fn arb_package() -> impl Strategy<Value = PackageSpec> {
        prop_oneof![
            "[a-zA-Z0-9./_-]{1,16}".prop_map(|path: String| PackageSpec::local(path)),
            ("[a-z]{1,8}", "[0-9]\\.[0-9]\\.[0-9]").prop_map(|(name, version)| {
                PackageSpec::remote(
                    format!("https://example.com/{}.git", name),
                    PackageRequirement::up_to_next_minor(version),
                )
            }),
        ]
    }

    proptest! {
        #[test]
        fn synthesis_is_deterministic(packages in prop::collection::vec(arb_package(), 0..8)) {
            let first = DependencySet::new(packages.clone());
            let second = DependencySet::new(packages.clone());
            let manifest = synthesize(&first);
            prop_assert_eq!(&manifest, &synthesize(&second));

            for package in &packages {
                let entry = format!("{},", package.manifest_value());
                prop_assert!(manifest.contains(&entry));
            }
        }
    }
}
