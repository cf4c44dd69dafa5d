//! Python via `tree-sitter-python`.

use once_cell::sync::OnceCell;
use shapeseek_core::SupportedLanguage;

use super::LanguageAdapter;
use crate::error::SyntaxError;
use crate::node::NodeSchema;
use crate::wildcard::WildcardCodec;

static SCHEMA: OnceCell<NodeSchema> = OnceCell::new();

const CODEC: WildcardCodec = WildcardCodec::new("a_x_3_x_a", "a_x_2_x_a", "a_x_1_x_a");

/// Adapter for `.py` and `.pyi` sources.
///
/// Strings are split by the grammar into delimiters, content and
/// interpolations. Delimiters are reduced to their prefix letters so
/// `'a'` and `"a"` compare equal while `f"a"` does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonAdapter;

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> SupportedLanguage {
        SupportedLanguage::Python
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn node_types(&self) -> &'static str {
        tree_sitter_python::NODE_TYPES
    }

    fn schema(&self) -> Result<&'static NodeSchema, SyntaxError> {
        SCHEMA.get_or_try_init(|| NodeSchema::from_json(self.language(), self.node_types()))
    }

    fn identifier_kinds(&self) -> &'static [&'static str] {
        &["identifier"]
    }

    fn string_literal_kinds(&self) -> &'static [&'static str] {
        &["string_content"]
    }

    fn numeric_literal_kinds(&self) -> &'static [&'static str] {
        &["integer", "float"]
    }

    fn program_kind(&self) -> &'static str {
        "module"
    }

    fn block_kind(&self) -> &'static str {
        "block"
    }

    fn sanitize_text(&self, kind: &str, text: &str) -> String {
        match kind {
            "string_start" => text.trim_end_matches(['"', '\'']).to_ascii_lowercase(),
            "string_end" => String::new(),
            _ => text.to_owned(),
        }
    }

    fn wildcard_codec(&self) -> Option<WildcardCodec> {
        Some(CODEC)
    }
}
