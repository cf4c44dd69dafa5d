//! HTML-like templates via `tree-sitter-html`.

use once_cell::sync::OnceCell;
use shapeseek_core::SupportedLanguage;

use super::{LanguageAdapter, collapse_whitespace};
use crate::error::SyntaxError;
use crate::node::{Node, NodeSchema};
use crate::wildcard::WildcardCodec;

static SCHEMA: OnceCell<NodeSchema> = OnceCell::new();

// Tag and attribute names only accept alphanumerics and hyphens.
const CODEC: WildcardCodec = WildcardCodec::new("qx-3-xq", "qx-2-xq", "qx-1-xq");

/// Adapter for `.html` templates.
///
/// Elements act as blocks: their children (including the start and end
/// tags) form the sequence multi-node queries are matched against. A bare
/// `$$` reports whole elements only, never their tags or text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAdapter;

impl LanguageAdapter for HtmlAdapter {
    fn language(&self) -> SupportedLanguage {
        SupportedLanguage::Html
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_html::LANGUAGE.into()
    }

    fn node_types(&self) -> &'static str {
        tree_sitter_html::NODE_TYPES
    }

    fn schema(&self) -> Result<&'static NodeSchema, SyntaxError> {
        SCHEMA.get_or_try_init(|| NodeSchema::from_json(self.language(), self.node_types()))
    }

    fn identifier_kinds(&self) -> &'static [&'static str] {
        &["tag_name", "attribute_name"]
    }

    fn string_literal_kinds(&self) -> &'static [&'static str] {
        &["attribute_value"]
    }

    fn numeric_literal_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    fn text_kinds(&self) -> &'static [&'static str] {
        &["text"]
    }

    fn program_kind(&self) -> &'static str {
        "document"
    }

    fn block_kind(&self) -> &'static str {
        "element"
    }

    fn statement_wrapper_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    fn sanitize_text(&self, kind: &str, text: &str) -> String {
        match kind {
            "text" => collapse_whitespace(text),
            _ => text.to_owned(),
        }
    }

    fn wildcard_codec(&self) -> Option<WildcardCodec> {
        Some(CODEC)
    }

    fn is_fragment(&self, node: &Node) -> bool {
        matches!(
            node.kind(),
            "start_tag" | "end_tag" | "self_closing_tag" | "erroneous_end_tag" | "text"
        )
    }
}
