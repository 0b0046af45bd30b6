//! File selection rules.
//!
//! A [`FileSelector`] picks the files a target includes, either through a glob
//! pattern or as an opaque folder reference. Bare text converts into a glob,
//! so `FileSelector::from("Sources/**")` is the same value as
//! `FileSelector::glob("Sources/**")`.

use super::PathValue;
use crate::error::SchemaError;
use crate::schema::{self, TYPE_FIELD};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::ops::Deref;
use tracing::debug;

const ENTITY: &str = "FileSelector";
const GLOB: &str = "glob";
const FOLDER_REFERENCE: &str = "folderReference";
const TAGS: &str = "tags";

/// A rule selecting files to include
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileSelector {
    /// A glob pattern of files to include
    Glob { pattern: PathValue, tags: Vec<String> },

    /// A directory included as a single opaque unit
    FolderReference { path: PathValue, tags: Vec<String> },
}

impl FileSelector {
    /// Create an untagged glob selector
    pub fn glob(pattern: impl Into<PathValue>) -> Self {
        Self::Glob {
            pattern: pattern.into(),
            tags: Vec::new(),
        }
    }

    /// Create an untagged folder reference
    pub fn folder_reference(path: impl Into<PathValue>) -> Self {
        Self::FolderReference {
            path: path.into(),
            tags: Vec::new(),
        }
    }

    /// Replace the tags of this selector
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into).collect();
        match self {
            Self::Glob { pattern, .. } => Self::Glob { pattern, tags },
            Self::FolderReference { path, .. } => Self::FolderReference { path, tags },
        }
    }

    /// The glob pattern or folder path
    pub fn path(&self) -> &PathValue {
        match self {
            Self::Glob { pattern, .. } => pattern,
            Self::FolderReference { path, .. } => path,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Self::Glob { tags, .. } | Self::FolderReference { tags, .. } => tags,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    pub fn is_glob(&self) -> bool {
        matches!(self, Self::Glob { .. })
    }

    /// Discriminator written to the `type` field
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Glob { .. } => GLOB,
            Self::FolderReference { .. } => FOLDER_REFERENCE,
        }
    }

    /// Encode into the structured form. `tags` is always present.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Glob { pattern, tags } => json!({
                TYPE_FIELD: GLOB,
                "pattern": pattern.as_str(),
                TAGS: tags,
            }),
            Self::FolderReference { path, tags } => json!({
                TYPE_FIELD: FOLDER_REFERENCE,
                "path": path.as_str(),
                TAGS: tags,
            }),
        }
    }

    /// Decode from the structured form.
    ///
    /// The discriminator and the variant's path field are required. `tags`
    /// falls back to an empty list when it is absent or malformed.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let record = schema::record(value, ENTITY)?;
        let kind = schema::discriminator(record, ENTITY)?;

        let tags = schema::string_list(record, TAGS).unwrap_or_else(|| {
            if record.contains_key(TAGS) {
                debug!(selector_type = kind, "ignoring malformed tags on file selector");
            }
            Vec::new()
        });

        match kind {
            GLOB => {
                let pattern = schema::required_str(record, ENTITY, GLOB, "pattern")?;
                Ok(Self::Glob {
                    pattern: PathValue::from(pattern),
                    tags,
                })
            },
            FOLDER_REFERENCE => {
                let path = schema::required_str(record, ENTITY, FOLDER_REFERENCE, "path")?;
                Ok(Self::FolderReference {
                    path: PathValue::from(path),
                    tags,
                })
            },
            other => Err(SchemaError::unrecognized(ENTITY, Some(other))),
        }
    }
}

impl Serialize for FileSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct(ENTITY, 3)?;
        state.serialize_field(TYPE_FIELD, self.type_name())?;
        match self {
            Self::Glob { pattern, .. } => state.serialize_field("pattern", pattern)?,
            Self::FolderReference { path, .. } => state.serialize_field("path", path)?,
        }
        state.serialize_field(TAGS, self.tags())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for FileSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        FileSelector::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for FileSelector {
    fn from(pattern: &str) -> Self {
        Self::glob(pattern)
    }
}

impl From<String> for FileSelector {
    fn from(pattern: String) -> Self {
        Self::glob(pattern)
    }
}

/// An ordered list of file selectors.
///
/// Bare text converts into a list holding a single glob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileList(Vec<FileSelector>);

impl FileList {
    pub fn new(selectors: Vec<FileSelector>) -> Self {
        Self(selectors)
    }

    pub fn into_inner(self) -> Vec<FileSelector> {
        self.0
    }

    /// Selectors carrying the given tag
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a FileSelector> + 'a {
        self.0.iter().filter(move |selector| selector.has_tag(tag))
    }
}

impl Deref for FileList {
    type Target = [FileSelector];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for FileList {
    fn from(pattern: &str) -> Self {
        Self(vec![FileSelector::glob(pattern)])
    }
}

impl From<String> for FileList {
    fn from(pattern: String) -> Self {
        Self(vec![FileSelector::glob(pattern)])
    }
}

impl From<Vec<FileSelector>> for FileList {
    fn from(selectors: Vec<FileSelector>) -> Self {
        Self(selectors)
    }
}

impl FromIterator<FileSelector> for FileList {
    fn from_iter<I: IntoIterator<Item = FileSelector>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FileList {
    type Item = FileSelector;
    type IntoIter = std::vec::IntoIter<FileSelector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a FileSelector;
    type IntoIter = std::slice::Iter<'a, FileSelector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_file_selector()(
            folder in any::<bool>(),
            path in "[A-Za-z0-9_./*-]{0,24}",
            tags in prop::collection::vec("[a-z0-9-]{0,8}", 0..4),
        ) -> FileSelector {
            let selector = if folder {
                FileSelector::folder_reference(path)
            } else {
                FileSelector::glob(path)
            };
            selector.with_tags(tags)
        }
    }

    proptest! {
        #[test]
        fn file_selector_round_trip(selector in arb_file_selector()) {
            let decoded = FileSelector::from_value(&selector.to_value()).unwrap();
            prop_assert_eq!(&decoded, &selector);

            let text = serde_json::to_string(&selector).unwrap();
            let parsed: FileSelector = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(parsed, selector);
        }
    }
}
