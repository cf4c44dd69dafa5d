//! JavaScript, TypeScript and JSX via the TSX grammar.
//!
//! `$` is a legal identifier character in this family, so queries parse
//! without any wildcard encoding.

use once_cell::sync::OnceCell;
use shapeseek_core::SupportedLanguage;

use super::{LanguageAdapter, collapse_whitespace, strip_quotes};
use crate::error::SyntaxError;
use crate::node::NodeSchema;

static SCHEMA: OnceCell<NodeSchema> = OnceCell::new();

/// Adapter for `.js`, `.jsx`, `.ts` and `.tsx` sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptAdapter;

impl LanguageAdapter for TypeScriptAdapter {
    fn language(&self) -> SupportedLanguage {
        SupportedLanguage::TypeScript
    }

    fn grammar(&self) -> tree_sitter::Language {
        // TSX is a superset that also accepts plain JavaScript and TypeScript.
        tree_sitter_typescript::LANGUAGE_TSX.into()
    }

    fn node_types(&self) -> &'static str {
        tree_sitter_typescript::TSX_NODE_TYPES
    }

    fn schema(&self) -> Result<&'static NodeSchema, SyntaxError> {
        SCHEMA.get_or_try_init(|| NodeSchema::from_json(self.language(), self.node_types()))
    }

    fn identifier_kinds(&self) -> &'static [&'static str] {
        &[
            "identifier",
            "property_identifier",
            "shorthand_property_identifier",
            "shorthand_property_identifier_pattern",
            "type_identifier",
            "private_property_identifier",
            "statement_identifier",
        ]
    }

    fn string_literal_kinds(&self) -> &'static [&'static str] {
        &["string", "string_fragment"]
    }

    fn numeric_literal_kinds(&self) -> &'static [&'static str] {
        &["number"]
    }

    fn text_kinds(&self) -> &'static [&'static str] {
        &["jsx_text"]
    }

    fn program_kind(&self) -> &'static str {
        "program"
    }

    fn block_kind(&self) -> &'static str {
        "statement_block"
    }

    fn sanitize_text(&self, kind: &str, text: &str) -> String {
        match kind {
            "string" => strip_quotes(text, &['"', '\'']).to_owned(),
            "jsx_text" => collapse_whitespace(text),
            _ => text.to_owned(),
        }
    }
}
