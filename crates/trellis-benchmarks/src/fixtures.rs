//! Generated inputs of a given size

use serde_json::{json, Value};
use trellis_core::types::{
    DependencySet, DeploymentTarget, FileSelector, PackageRequirement, PackageSpec, ProductType,
};

/// Package sizes every benchmark group runs with
pub const PACKAGE_COUNTS: [usize; 4] = [10, 50, 100, 500];

/// Requirement of every kind, picked round-robin
fn requirement(index: usize) -> PackageRequirement {
    let version = format!("{}.{}.0", index % 7 + 1, index % 10);
    match index % 6 {
        0 => PackageRequirement::exact(version),
        1 => PackageRequirement::up_to_next_major(version),
        2 => PackageRequirement::up_to_next_minor(version),
        3 => PackageRequirement::branch("main"),
        4 => PackageRequirement::revision(format!("{:040x}", index)),
        _ => PackageRequirement::range(version, format!("{}.0.0", index % 7 + 2)),
    }
}

/// Dependency set with `count` packages, one in five local
pub fn dependency_set(count: usize) -> DependencySet {
    let packages = (0..count)
        .map(|index| {
            if index % 5 == 0 {
                PackageSpec::local(format!("../Packages/Local{}", index))
            } else {
                PackageSpec::remote(
                    format!("https://github.com/example/Package{}.git", index),
                    requirement(index),
                )
            }
        })
        .collect();

    DependencySet::new(packages)
        .with_product_type("Package1", ProductType::StaticFramework)
        .with_deployment_target(DeploymentTarget::ios("13.0"))
}

/// Structured form of [`dependency_set`]
pub fn dependency_document(count: usize) -> Value {
    dependency_set(count).to_value()
}

/// Structured file selector list mixing globs and folder references
pub fn file_list_document(count: usize) -> Value {
    let items = (0..count)
        .map(|index| {
            let selector = if index % 3 == 0 {
                FileSelector::folder_reference(format!("Resources/Folder{}", index))
            } else {
                FileSelector::glob(format!("Sources/Module{}/**/*.swift", index))
                    .with_tags(["code"])
            };
            selector.to_value()
        })
        .collect::<Vec<_>>();
    json!(items)
}
