//! Single-level node comparison.

use shapeseek_core::Mode;

use super::context::MatchContext;
use crate::node::{FieldValue, KEYWORDS_FIELD, Node};
use crate::wildcard::{NUMERIC_WILDCARD, fragments_match, node_wildcard};

/// Outcome of comparing one file node with one query node.
///
/// When `matched` is `true`, `query_keys` lists the query fields that still
/// need recursive comparison and `file_keys` the corresponding file fields.
/// The lists have equal length unless the file node lacks a field the query
/// carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelMatch {
    /// Whether the nodes are locally compatible.
    pub matched: bool,
    /// File fields to traverse.
    pub file_keys: Vec<&'static str>,
    /// Query fields to traverse.
    pub query_keys: Vec<&'static str>,
}

impl LevelMatch {
    const fn settled(matched: bool) -> Self {
        Self {
            matched,
            file_keys: Vec::new(),
            query_keys: Vec::new(),
        }
    }
}

/// Compares `file` with `query` without recursing.
///
/// Wildcards, identifiers and literals are settled at this level. For other
/// nodes the kinds must be equal or alternatives of each other, primitive
/// fields (operators and keywords) must agree in every mode, and the fields
/// to traverse are returned.
pub fn compare_nodes(file: &Node, query: &Node, ctx: &mut MatchContext<'_>) -> LevelMatch {
    ctx.record_comparison();
    let adapter = ctx.adapter();

    if node_wildcard(adapter, query).is_some() {
        return LevelMatch::settled(true);
    }

    if adapter.is_identifier(query) {
        let matched = adapter.is_identifier(file)
            && adapter.are_alternatives(query.kind(), file.kind())
            && text_matches(ctx, query.text(), file.text());
        return LevelMatch::settled(matched);
    }

    if adapter.is_string_literal(query) || adapter.is_text(query) {
        let same_family = (adapter.is_string_literal(query) && adapter.is_string_literal(file))
            || (adapter.is_text(query) && adapter.is_text(file));
        let matched = same_family
            && text_matches(ctx, adapter.literal_value(query), adapter.literal_value(file));
        return LevelMatch::settled(matched);
    }

    if adapter.is_numeric_literal(query) {
        let matched = adapter.is_numeric_literal(file)
            && match (adapter.literal_value(query), adapter.literal_value(file)) {
                (Some(NUMERIC_WILDCARD), Some(_)) => true,
                (Some(q), Some(f)) => ctx.fold(q) == ctx.fold(f),
                _ => false,
            };
        return LevelMatch::settled(matched);
    }

    if !adapter.are_alternatives(query.kind(), file.kind()) {
        return LevelMatch::settled(false);
    }

    if let (Some(query_text), Some(file_text)) = (query.text(), file.text()) {
        if query_text != file_text {
            return LevelMatch::settled(false);
        }
    }

    if !query.fields().contains_key(KEYWORDS_FIELD) && file.field(KEYWORDS_FIELD).is_some() {
        return LevelMatch::settled(false);
    }

    let include = ctx.mode() != Mode::Exact;
    let mut level = LevelMatch::settled(true);
    for (key, value) in query.fields() {
        match value {
            FieldValue::Primitive(expected) => {
                let same = matches!(
                    file.field(key),
                    Some(FieldValue::Primitive(actual)) if actual == expected
                );
                if !same {
                    return LevelMatch::settled(false);
                }
            }
            _ if include && value.is_empty() => {}
            _ => {
                level.query_keys.push(*key);
                if let Some((file_key, _)) = file.fields().get_key_value(key) {
                    level.file_keys.push(*file_key);
                }
            }
        }
    }
    level
}

fn text_matches(ctx: &MatchContext<'_>, query: Option<&str>, file: Option<&str>) -> bool {
    match (query, file) {
        (Some(pattern), Some(text)) => fragments_match(&ctx.fold(pattern), &ctx.fold(text)),
        (None, None) => true,
        _ => false,
    }
}
