//! C# via `tree-sitter-c-sharp`.

use once_cell::sync::OnceCell;
use shapeseek_core::SupportedLanguage;

use super::{LanguageAdapter, strip_quotes};
use crate::error::SyntaxError;
use crate::node::NodeSchema;
use crate::wildcard::WildcardCodec;

static SCHEMA: OnceCell<NodeSchema> = OnceCell::new();

// `$"` and `$@"` open interpolated strings and must survive encoding.
const CODEC: WildcardCodec =
    WildcardCodec::new("a_x_3_x_a", "a_x_2_x_a", "a_x_1_x_a").keep_before(&['"', '@']);

/// Adapter for `.cs` sources.
///
/// Top-level statements are wrapped in `global_statement` by the grammar.
/// The wrapper is removed while building the tree so top-level code and
/// method bodies share one shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpAdapter;

impl LanguageAdapter for CSharpAdapter {
    fn language(&self) -> SupportedLanguage {
        SupportedLanguage::CSharp
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_c_sharp::LANGUAGE.into()
    }

    fn node_types(&self) -> &'static str {
        tree_sitter_c_sharp::NODE_TYPES
    }

    fn schema(&self) -> Result<&'static NodeSchema, SyntaxError> {
        SCHEMA.get_or_try_init(|| NodeSchema::from_json(self.language(), self.node_types()))
    }

    fn identifier_kinds(&self) -> &'static [&'static str] {
        &["identifier"]
    }

    fn string_literal_kinds(&self) -> &'static [&'static str] {
        &[
            "string_literal",
            "verbatim_string_literal",
            "raw_string_literal",
            "character_literal",
            "string_content",
        ]
    }

    fn numeric_literal_kinds(&self) -> &'static [&'static str] {
        &["integer_literal", "real_literal"]
    }

    fn program_kind(&self) -> &'static str {
        "compilation_unit"
    }

    fn block_kind(&self) -> &'static str {
        "block"
    }

    fn transparent_kinds(&self) -> &'static [&'static str] {
        &["global_statement"]
    }

    fn sanitize_text(&self, kind: &str, text: &str) -> String {
        match kind {
            "string_literal" | "character_literal" => {
                strip_quotes(text, &['"', '\'']).to_owned()
            }
            "verbatim_string_literal" => {
                strip_quotes(text.trim_start_matches('@'), &['"']).to_owned()
            }
            "raw_string_literal" => text.trim_matches('"').to_owned(),
            _ => text.to_owned(),
        }
    }

    fn wildcard_codec(&self) -> Option<WildcardCodec> {
        Some(CODEC)
    }
}
