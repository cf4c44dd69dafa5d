//! Node field metadata derived from a grammar's `node-types.json`.
//!
//! The metadata ships inside each grammar crate, so it is always versioned
//! together with the grammar it describes.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde::de::IgnoredAny;
use shapeseek_core::SupportedLanguage;

use crate::error::SyntaxError;

#[derive(Debug, Deserialize)]
struct NodeTypeEntry {
    #[serde(rename = "type")]
    kind: String,
    named: bool,
    #[serde(default)]
    fields: BTreeMap<String, FieldInfo>,
    #[serde(default)]
    children: Option<FieldInfo>,
    #[serde(default)]
    subtypes: Option<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct FieldInfo {
    multiple: bool,
}

/// Field layout of one node kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindSchema {
    single: Vec<String>,
    multiple: Vec<String>,
    children: bool,
}

impl KindSchema {
    /// Returns the single-valued field names.
    pub fn single_fields(&self) -> impl Iterator<Item = &str> {
        self.single.iter().map(String::as_str)
    }

    /// Returns the sequence-valued field names.
    pub fn sequence_fields(&self) -> impl Iterator<Item = &str> {
        self.multiple.iter().map(String::as_str)
    }

    /// Returns `true` when the kind has unnamed children.
    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.children
    }

    /// Returns the stored key for a single-valued field.
    #[must_use]
    pub fn single_key(&self, name: &str) -> Option<&str> {
        self.single_fields().find(|field| *field == name)
    }

    /// Returns the stored key for a sequence-valued field.
    #[must_use]
    pub fn sequence_key(&self, name: &str) -> Option<&str> {
        self.sequence_fields().find(|field| *field == name)
    }
}

/// Field layout for every named, concrete kind of one grammar.
#[derive(Debug, Clone, Default)]
pub struct NodeSchema {
    kinds: HashMap<String, KindSchema>,
}

impl NodeSchema {
    /// Parses the grammar's `node-types.json`.
    ///
    /// Supertypes and anonymous kinds are skipped since they never appear as
    /// concrete named nodes.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::AdapterInit`] when the JSON is malformed.
    pub fn from_json(language: SupportedLanguage, json: &str) -> Result<Self, SyntaxError> {
        let entries: Vec<NodeTypeEntry> = serde_json::from_str(json)
            .map_err(|e| SyntaxError::adapter_init(language, format!("node types: {e}")))?;
        let kinds = entries
            .into_iter()
            .filter(|entry| entry.named && entry.subtypes.is_none())
            .map(|entry| {
                let (multiple, single): (Vec<_>, Vec<_>) =
                    entry.fields.into_iter().partition(|(_, info)| info.multiple);
                let schema = KindSchema {
                    single: single.into_iter().map(|(name, _)| name).collect(),
                    multiple: multiple.into_iter().map(|(name, _)| name).collect(),
                    children: entry.children.is_some(),
                };
                (entry.kind, schema)
            })
            .collect();
        Ok(Self { kinds })
    }

    /// Returns the layout of `kind`.
    #[must_use]
    pub fn kind(&self, kind: &str) -> Option<&KindSchema> {
        self.kinds.get(kind)
    }

    /// Returns the number of described kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` when no kind is described.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
