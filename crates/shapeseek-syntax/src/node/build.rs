//! Conversion of Tree-sitter trees into [`Node`] trees.

use super::{
    CHILDREN_FIELD, FieldValue, KEYWORDS_FIELD, KindSchema, Node, NodeSchema, PREFIX_MARKER,
};
use crate::adapter::LanguageAdapter;
use crate::position::node_span;

/// Builds uniform nodes from a parsed Tree-sitter tree.
///
/// Extras (comments) and the adapter's skipped kinds are dropped. Fielded
/// anonymous tokens (operators) become primitives. Unfielded keyword tokens
/// are gathered under [`KEYWORDS_FIELD`] and other unfielded punctuation is
/// dropped.
pub(crate) struct TreeBuilder<'a> {
    adapter: &'a dyn LanguageAdapter,
    schema: &'static NodeSchema,
    source: &'a str,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) const fn new(
        adapter: &'a dyn LanguageAdapter,
        schema: &'static NodeSchema,
        source: &'a str,
    ) -> Self {
        Self {
            adapter,
            schema,
            source,
        }
    }

    fn raw_text(&self, ts_node: tree_sitter::Node<'_>) -> &'a str {
        self.source.get(ts_node.byte_range()).unwrap_or_default()
    }

    pub(crate) fn build(&self, ts_node: tree_sitter::Node<'_>) -> Node {
        let kind = ts_node.kind();
        if self.adapter.transparent_kinds().contains(&kind) && ts_node.named_child_count() == 1 {
            if let Some(inner) = ts_node.named_child(0) {
                return self.build(inner);
            }
        }

        let mut node = Node::new(kind, node_span(ts_node));
        let shape = self.schema.kind(kind);
        if let Some(shape) = shape {
            init_fields(&mut node, shape);
        }

        let mut tokens = TokenSummary::default();
        let mut cursor = ts_node.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                tokens.record(child, cursor.field_name());
                if let Some(shape) = shape {
                    self.attach(&mut node, shape, cursor.field_name(), child);
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        if ts_node.child_count() == 0 || self.adapter.keeps_text(kind) {
            node.set_text(self.adapter.sanitize_text(kind, self.raw_text(ts_node)));
        } else if !tokens.has_named {
            node.set_text(tokens.anonymous.join(" "));
        }
        if !tokens.keywords.is_empty() {
            node.set_field(
                KEYWORDS_FIELD,
                FieldValue::Primitive(tokens.keywords.join(" ")),
            );
        }
        node
    }

    fn attach(
        &self,
        node: &mut Node,
        shape: &'static KindSchema,
        field: Option<&'static str>,
        child: tree_sitter::Node<'_>,
    ) {
        if child.is_extra() || self.adapter.skipped_kinds().contains(&child.kind()) {
            return;
        }

        if let Some(name) = field {
            if let Some(key) = shape.single_key(name) {
                let value = if child.is_named() {
                    FieldValue::Child(Some(Box::new(self.build(child))))
                } else {
                    FieldValue::Primitive(self.raw_text(child).to_owned())
                };
                node.set_field(key, value);
                return;
            }
            if let Some(key) = shape.sequence_key(name) {
                let item = if child.is_named() {
                    self.build(child)
                } else {
                    Node::token(child.kind(), self.raw_text(child), node_span(child))
                };
                node.push_to(key, item);
                return;
            }
        }

        if child.is_named() && shape.has_children() {
            node.push_to(CHILDREN_FIELD, self.build(child));
        }
    }
}

fn init_fields(node: &mut Node, shape: &'static KindSchema) {
    for name in shape.single_fields() {
        node.set_field(name, FieldValue::Child(None));
    }
    for name in shape.sequence_fields() {
        node.set_field(name, FieldValue::Sequence(Vec::new()));
    }
    if shape.has_children() {
        node.set_field(CHILDREN_FIELD, FieldValue::Sequence(Vec::new()));
    }
}

/// Anonymous tokens seen among one node's direct children.
#[derive(Default)]
struct TokenSummary {
    anonymous: Vec<&'static str>,
    keywords: Vec<&'static str>,
    has_named: bool,
}

impl TokenSummary {
    fn record(&mut self, child: tree_sitter::Node<'_>, field: Option<&'static str>) {
        if child.is_extra() {
            return;
        }
        if child.is_named() {
            self.has_named = true;
            return;
        }
        let kind = child.kind();
        self.anonymous.push(kind);
        match field {
            None if is_keyword(kind) => self.keywords.push(kind),
            Some(_) if !self.has_named && child.next_named_sibling().is_some() => {
                self.keywords.push(PREFIX_MARKER);
            }
            _ => {}
        }
    }
}

/// Word-like tokens and the generator star. Punctuation is layout.
fn is_keyword(kind: &str) -> bool {
    kind == "*"
        || (!kind.is_empty() && kind.chars().all(|ch| ch.is_ascii_alphabetic() || ch == '_'))
}
