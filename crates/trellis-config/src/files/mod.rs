//! File selector lists
//!
//! A list is stored either as a bare JSON array or under a `files` key:
//!
//! ```toml
//! [[files]]
//! type = "glob"
//! pattern = "Sources/**"
//! ```

use camino::Utf8Path;
use serde_json::Value;
use trellis_core::error::{SchemaError, TrellisError};
use trellis_core::types::{FileList, FileSelector};

use crate::description::{parse_document, DescriptionFormat};
use crate::ConfigResult;

const FILES_KEY: &str = "files";

/// Parse and decode a list of file selectors
pub fn parse_file_list(
    content: &str,
    format: DescriptionFormat,
    origin: &str,
) -> ConfigResult<FileList> {
    let document = parse_document(content, format, origin)?;
    let items = match &document {
        Value::Array(items) => items,
        Value::Object(record) => match record.get(FILES_KEY) {
            Some(Value::Array(items)) => items,
            _ => return Err(list_shape().into()),
        },
        _ => return Err(list_shape().into()),
    };

    items
        .iter()
        .map(|item| FileSelector::from_value(item).map_err(TrellisError::from))
        .collect()
}

/// Canonical JSON encoding of a list of file selectors
pub fn encode_file_list(files: &FileList) -> ConfigResult<String> {
    serde_json::to_string_pretty(files).map_err(|e| TrellisError::JsonParse {
        message: format!("JSON serialization error: {}", e),
    })
}

/// Load a list of file selectors from a file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<FileList> {
    let format = DescriptionFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TrellisError::io(format!("Failed to read {}", path), e))?;

    parse_file_list(&content, format, path.as_str())
}

fn list_shape() -> SchemaError {
    SchemaError::UnexpectedShape {
        entity: "FileList",
        expected: "a list of file selectors or a 'files' list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_json_array() {
        let json = r#"[
            { "type": "glob", "pattern": "Sources/**", "tags": ["code"] },
            { "type": "folderReference", "path": "Resources" }
        ]"#;
        let files = parse_file_list(json, DescriptionFormat::Json, "files.json").unwrap();
        assert_eq!(
            files.into_inner(),
            vec![
                FileSelector::glob("Sources/**").with_tags(["code"]),
                FileSelector::folder_reference("Resources"),
            ]
        );
    }

    #[test]
    fn test_parse_toml_files_key() {
        let toml = r#"
[[files]]
type = "glob"
pattern = "App/**"

[[files]]
type = "folderReference"
path = "Assets"
tags = 3
"#;
        let files = parse_file_list(toml, DescriptionFormat::Toml, "files.toml").unwrap();
        assert_eq!(files[0], FileSelector::glob("App/**"));
        assert_eq!(files[1], FileSelector::folder_reference("Assets"));
    }

    #[test]
    fn test_unknown_selector_fails_the_list() {
        let json = r#"[{ "type": "glob", "pattern": "A/**" }, { "type": "unknown", "path": "x" }]"#;
        let err = parse_file_list(json, DescriptionFormat::Json, "files.json").unwrap_err();
        assert!(matches!(
            err,
            TrellisError::Schema(SchemaError::UnrecognizedDiscriminator { .. })
        ));
    }

    #[test]
    fn test_rejects_non_list_document() {
        let err = parse_file_list(r#"{ "sources": [] }"#, DescriptionFormat::Json, "files.json")
            .unwrap_err();
        assert!(matches!(err, TrellisError::Schema(SchemaError::UnexpectedShape { .. })));
    }

    #[test]
    fn test_encode_is_canonical() {
        let files: FileList = "Sources/**".into();
        let encoded = encode_file_list(&files).unwrap();
        let reparsed = parse_file_list(&encoded, DescriptionFormat::Json, "encoded").unwrap();
        assert_eq!(reparsed, files);
        assert!(encoded.contains("\"tags\": []"));
    }

    fn selector_strategy() -> impl Strategy<Value = FileSelector> {
        let tags = prop::collection::vec("[a-z]{1,8}", 0..3);
        prop_oneof![
            ("[A-Za-z/*]{1,20}", tags.clone())
                .prop_map(|(pattern, tags)| FileSelector::glob(pattern).with_tags(tags)),
            ("[A-Za-z/]{1,20}", tags)
                .prop_map(|(path, tags)| FileSelector::folder_reference(path).with_tags(tags)),
        ]
    }

    proptest! {
        #[test]
        fn test_encoded_lists_parse_back(
            selectors in prop::collection::vec(selector_strategy(), 0..8)
        ) {
            let files: FileList = selectors.into();
            let encoded = encode_file_list(&files).unwrap();
            let reparsed = parse_file_list(&encoded, DescriptionFormat::Json, "encoded").unwrap();
            prop_assert_eq!(reparsed, files);
        }
    }
}
