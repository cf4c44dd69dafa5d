//! Per-language parser adapters.
//!
//! The search pipeline never inspects a grammar directly. Everything it needs
//! to know about a language (which kinds are identifiers or literals, where a
//! program keeps its statements, how wildcards are smuggled past the parser)
//! comes through [`LanguageAdapter`].

mod csharp;
mod html;
mod python;
mod typescript;

use shapeseek_core::{Span, SupportedLanguage};

use crate::error::SyntaxError;
use crate::node::{CHILDREN_FIELD, FieldValue, Node, NodeSchema};
use crate::wildcard::WildcardCodec;

pub use csharp::CSharpAdapter;
pub use html::HtmlAdapter;
pub use python::PythonAdapter;
pub use typescript::TypeScriptAdapter;

/// Capability set every supported language implements.
///
/// Adapters are stateless unit structs. Their only shared state is the
/// lazily parsed [`NodeSchema`], initialised once per process.
pub trait LanguageAdapter: Send + Sync {
    /// Returns the language this adapter handles.
    fn language(&self) -> SupportedLanguage;

    /// Returns the Tree-sitter grammar.
    fn grammar(&self) -> tree_sitter::Language;

    /// Returns the grammar's bundled `node-types.json`.
    fn node_types(&self) -> &'static str;

    /// Returns the cached node schema, parsing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::AdapterInit`] when the metadata cannot be
    /// parsed. Failures are not cached.
    fn schema(&self) -> Result<&'static NodeSchema, SyntaxError>;

    /// Kinds whose text is an identifier name.
    fn identifier_kinds(&self) -> &'static [&'static str];

    /// Kinds compared as string-like literals.
    fn string_literal_kinds(&self) -> &'static [&'static str];

    /// Kinds compared as numeric literals.
    fn numeric_literal_kinds(&self) -> &'static [&'static str];

    /// Free-text kinds (markup text) that may carry wildcards and may be
    /// pure whitespace.
    fn text_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Kind of the root node.
    fn program_kind(&self) -> &'static str;

    /// Kind used for synthetic statement blocks.
    fn block_kind(&self) -> &'static str;

    /// Additional kinds holding statement sequences.
    fn block_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Field holding the statements of program and block nodes.
    fn body_field(&self) -> &'static str {
        CHILDREN_FIELD
    }

    /// Wrapper kinds stripped from single-statement queries.
    fn statement_wrapper_kinds(&self) -> &'static [&'static str] {
        &["expression_statement"]
    }

    /// Kinds replaced by their only named child during tree building.
    fn transparent_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Kinds dropped during tree building.
    fn skipped_kinds(&self) -> &'static [&'static str] {
        &["comment"]
    }

    /// File extensions handled by this adapter.
    fn extensions(&self) -> &'static [&'static str] {
        self.language().extensions()
    }

    /// Normalises leaf text before it is stored on a node.
    fn sanitize_text(&self, _kind: &str, text: &str) -> String {
        text.to_owned()
    }

    /// Placeholder codec for grammars where `$` is illegal.
    fn wildcard_codec(&self) -> Option<WildcardCodec> {
        None
    }

    /// Encodes raw wildcard markers in query text.
    fn preprocess_query(&self, code: &str) -> String {
        self.wildcard_codec()
            .map_or_else(|| code.to_owned(), |codec| codec.encode(code))
    }

    /// Restores wildcard markers in parsed query text.
    fn decode_wildcards(&self, text: &str) -> String {
        self.wildcard_codec()
            .map_or_else(|| text.to_owned(), |codec| codec.decode(text))
    }

    /// Returns `true` when nodes of `kind` keep their text even with named
    /// children.
    fn keeps_text(&self, kind: &str) -> bool {
        self.identifier_kinds().contains(&kind)
            || self.string_literal_kinds().contains(&kind)
            || self.numeric_literal_kinds().contains(&kind)
            || self.text_kinds().contains(&kind)
    }

    /// Kinds comparable with `kind` besides itself.
    fn alternative_kinds(&self, kind: &str) -> &'static [&'static str] {
        if self.identifier_kinds().contains(&kind) {
            self.identifier_kinds()
        } else {
            &[]
        }
    }

    /// Returns `true` when the two kinds may be compared.
    fn are_alternatives(&self, a: &str, b: &str) -> bool {
        a == b || self.alternative_kinds(a).contains(&b)
    }

    /// Returns `true` for identifier-like nodes.
    fn is_identifier(&self, node: &Node) -> bool {
        self.identifier_kinds().contains(&node.kind())
    }

    /// Returns the name of an identifier node.
    fn identifier_name<'n>(&self, node: &'n Node) -> Option<&'n str> {
        if self.is_identifier(node) {
            node.text()
        } else {
            None
        }
    }

    /// Renames an identifier node. Other nodes are left untouched.
    fn set_identifier_name(&self, node: &mut Node, name: String) {
        if self.is_identifier(node) {
            node.set_text(name);
        }
    }

    /// Returns `true` for string-like literals.
    fn is_string_literal(&self, node: &Node) -> bool {
        self.string_literal_kinds().contains(&node.kind())
    }

    /// Returns `true` for numeric literals.
    fn is_numeric_literal(&self, node: &Node) -> bool {
        self.numeric_literal_kinds().contains(&node.kind())
    }

    /// Returns `true` for free-text nodes.
    fn is_text(&self, node: &Node) -> bool {
        self.text_kinds().contains(&node.kind())
    }

    /// Returns the sanitised value of a literal or text node.
    fn literal_value<'n>(&self, node: &'n Node) -> Option<&'n str> {
        if self.is_string_literal(node) || self.is_numeric_literal(node) || self.is_text(node) {
            node.text()
        } else {
            None
        }
    }

    /// Returns `true` for the root node.
    fn is_program(&self, node: &Node) -> bool {
        node.kind() == self.program_kind()
    }

    /// Returns `true` for statement blocks.
    fn is_block(&self, node: &Node) -> bool {
        node.kind() == self.block_kind() || self.block_kinds().contains(&node.kind())
    }

    /// Returns the statements of a program or block node.
    fn program_body<'n>(&self, node: &'n Node) -> &'n [Node] {
        node.sequence(self.body_field())
    }

    /// Wraps statements into a synthetic block.
    fn create_block(&self, children: Vec<Node>, span: Span) -> Node {
        Node::new(self.block_kind(), span)
            .with_field(self.body_field(), FieldValue::Sequence(children))
    }

    /// Strips statement wrappers from a single-statement query.
    fn unwrap_statement<'n>(&self, node: &'n Node) -> &'n Node {
        if !self.statement_wrapper_kinds().contains(&node.kind()) {
            return node;
        }
        match node.child_nodes().as_slice() {
            [inner] => *inner,
            _ => node,
        }
    }

    /// Returns `false` for nodes excluded from sequence comparison.
    fn should_compare(&self, node: &Node) -> bool {
        !(self.is_text(node) && node.text().is_none_or(|text| text.trim().is_empty()))
    }

    /// Returns `true` for pieces of an enclosing construct, such as markup
    /// tags, that a bare node wildcard never reports on their own.
    fn is_fragment(&self, _node: &Node) -> bool {
        false
    }
}

/// Returns the adapter for `language`.
#[must_use]
pub fn adapter_for(language: SupportedLanguage) -> &'static dyn LanguageAdapter {
    match language {
        SupportedLanguage::TypeScript => &TypeScriptAdapter,
        SupportedLanguage::Python => &PythonAdapter,
        SupportedLanguage::CSharp => &CSharpAdapter,
        SupportedLanguage::Html => &HtmlAdapter,
    }
}

/// Collapses whitespace runs to single spaces and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes one pair of matching quote characters around `text`.
pub(crate) fn strip_quotes<'t>(text: &'t str, quotes: &[char]) -> &'t str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && quotes.contains(&open) => chars.as_str(),
        _ => text,
    }
}
