//! Tree-sitter parsing wrapper producing uniform node trees.
//!
//! This module wraps the raw Tree-sitter parser for one language. Unlike
//! Tree-sitter itself it does not tolerate errors: any `ERROR` or `MISSING`
//! node turns the whole parse into a [`SyntaxError::Parse`].

use shapeseek_core::SupportedLanguage;

use crate::adapter::{LanguageAdapter, adapter_for};
use crate::error::SyntaxError;
use crate::node::{Node, TreeBuilder};
use crate::position::point_to_one_based;

/// A raw Tree-sitter parse.
///
/// Holds the Tree-sitter tree alongside the text it was parsed from.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Returns the Tree-sitter tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the parsed text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the host language of the parse.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Returns the first syntax error in document order, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<SyntaxErrorInfo> {
        first_error_node(self.tree.root_node()).map(SyntaxErrorInfo::from_node)
    }
}

/// Location and description of the first syntax error in a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// One-based start line.
    pub line: u32,
    /// One-based start column.
    pub column: u32,
    /// Message used for the resulting error record.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        let (end_line, end_column) = point_to_one_based(node.end_position());
        let message = if node.is_missing() {
            format!("Parse error at {line}:{column}: missing {}", node.kind())
        } else {
            format!("Parse error at {line}:{column}-{end_line}:{end_column}")
        };

        Self {
            line,
            column,
            message,
        }
    }

    fn into_error(self, language: SupportedLanguage) -> SyntaxError {
        SyntaxError::parse(language, self.line, self.column, self.message)
    }
}

/// Tree-sitter parser bound to one language adapter.
///
/// Tree-sitter parsers are not `Sync`, so each search creates its own and
/// reuses it for every file and query.
pub struct Parser {
    inner: tree_sitter::Parser,
    adapter: &'static dyn LanguageAdapter,
}

impl Parser {
    /// Creates a parser bound to the adapter for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::AdapterInit`] when the grammar is rejected,
    /// typically because of an ABI version mismatch.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let adapter = adapter_for(language);
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&adapter.grammar())
            .map_err(|e| SyntaxError::adapter_init(language, e.to_string()))?;

        Ok(Self { inner, adapter })
    }

    /// Returns the language this parser is configured for.
    #[must_use]
    pub fn language(&self) -> SupportedLanguage {
        self.adapter.language()
    }

    /// Returns the adapter driving this parser.
    #[must_use]
    pub fn adapter(&self) -> &'static dyn LanguageAdapter {
        self.adapter
    }

    /// Parses source code into a raw Tree-sitter tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree. This
    /// is rare and typically indicates a parser configuration issue.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let language = self.language();
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse(language, 1, 1, "parsing failed"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language,
        })
    }

    /// Parses source code into a uniform [`Node`] tree.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::Parse`] at the first `ERROR` or `MISSING` node,
    /// or [`SyntaxError::AdapterInit`] when the node schema is unavailable.
    pub fn parse_node(&mut self, source: &str) -> Result<Node, SyntaxError> {
        let schema = self.adapter.schema()?;
        let parsed = self.parse(source)?;
        if let Some(info) = parsed.first_error() {
            return Err(info.into_error(parsed.language()));
        }
        let builder = TreeBuilder::new(self.adapter, schema, parsed.source());
        Ok(builder.build(parsed.tree().root_node()))
    }
}

/// Returns the first `ERROR` or `MISSING` node in pre-order.
fn first_error_node(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}
