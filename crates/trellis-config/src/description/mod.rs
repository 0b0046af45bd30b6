//! Dependencies.toml / Dependencies.json parsing and serialization

use camino::Utf8Path;
use serde_json::Value;
use tracing::debug;
use trellis_core::error::TrellisError;
use trellis_core::types::{DependencySet, PackageSpec};

use crate::ConfigResult;

/// On-disk format of a description document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Toml,
    Json,
}

impl DescriptionFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Utf8Path) -> ConfigResult<Self> {
        match path.extension() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(TrellisError::ConfigValidation {
                field: "path".to_string(),
                reason: format!(
                    "Unsupported description format '{}' for {}; expected .toml or .json",
                    other.unwrap_or(""),
                    path
                ),
            }),
        }
    }
}

/// Parse a dependency description and validate it
pub fn parse_dependencies(
    content: &str,
    format: DescriptionFormat,
    origin: &str,
) -> ConfigResult<DependencySet> {
    let value = parse_document(content, format, origin)?;
    let dependencies = DependencySet::from_value(&value)?;
    validate_dependencies(&dependencies)?;

    debug!(
        origin,
        packages = dependencies.packages.len(),
        product_types = dependencies.product_type_overrides.len(),
        deployment_targets = dependencies.deployment_target_overrides.len(),
        "parsed dependency description"
    );
    Ok(dependencies)
}

/// Serialize a dependency set in the given format
pub fn serialize_dependencies(
    dependencies: &DependencySet,
    format: DescriptionFormat,
) -> ConfigResult<String> {
    match format {
        DescriptionFormat::Json => serde_json::to_string_pretty(&dependencies.to_value())
            .map_err(|e| TrellisError::JsonParse {
                message: format!("JSON serialization error: {}", e),
            }),
        DescriptionFormat::Toml => toml::to_string_pretty(&dependencies.to_value()).map_err(|e| {
            TrellisError::ConfigValidation {
                field: "dependencies".to_string(),
                reason: format!("TOML serialization error: {}", e),
            }
        }),
    }
}

/// Validate a decoded description.
///
/// Decoding already guarantees every variant carries its fields; this
/// rejects values that are present but empty.
pub fn validate_dependencies(dependencies: &DependencySet) -> ConfigResult<()> {
    for (index, package) in dependencies.packages.iter().enumerate() {
        let field = match package {
            PackageSpec::Local { .. } => "path",
            PackageSpec::Remote { .. } => "url",
        };
        if package.location().trim().is_empty() {
            return Err(TrellisError::ConfigValidation {
                field: format!("packages[{}].{}", index, field),
                reason: format!("{} package must have a non-empty {}", package.type_name(), field),
            });
        }
    }

    if dependencies
        .product_type_overrides
        .keys()
        .any(|target| target.trim().is_empty())
    {
        return Err(TrellisError::ConfigValidation {
            field: "productTypes".to_string(),
            reason: "Product type overrides must name a target".to_string(),
        });
    }

    Ok(())
}

/// Load and parse a description from a file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<DependencySet> {
    let format = DescriptionFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TrellisError::io(format!("Failed to read {}", path), e))?;

    parse_dependencies(&content, format, path.as_str())
}

/// Parse a TOML or JSON document into a structured value
pub(crate) fn parse_document(
    content: &str,
    format: DescriptionFormat,
    origin: &str,
) -> ConfigResult<Value> {
    match format {
        DescriptionFormat::Json => {
            serde_json::from_str(content).map_err(|e| TrellisError::JsonParse {
                message: format!("In {}: {}", origin, e),
            })
        },
        DescriptionFormat::Toml => {
            // First try with toml_edit for better error reporting
            if let Err(e) = content.parse::<toml_edit::DocumentMut>() {
                return Err(toml_error(origin, content, e.message(), e.span()));
            }

            toml::from_str(content)
                .map_err(|e| toml_error(origin, content, e.message(), e.span()))
        },
    }
}

fn toml_error(
    origin: &str,
    content: &str,
    message: &str,
    span: Option<std::ops::Range<usize>>,
) -> TrellisError {
    let (line, column) = span
        .map(|span| line_column(content, span.start))
        .unwrap_or((0, 0));

    TrellisError::TomlParse {
        file: origin.to_string(),
        message: message.trim().to_string(),
        line,
        column,
    }
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) + 1;
    (line, column)
}
