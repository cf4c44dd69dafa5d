//! Uniform, language-agnostic syntax tree.
//!
//! Tree-sitter trees are converted into [`Node`] values whose fields follow
//! the grammar's declared schema: every field a kind can carry is present,
//! either as a single optional child, an ordered sequence, or an anonymous
//! token kept as a primitive string. Positions live in [`Node::span`] and
//! never take part in comparison.

mod build;
mod schema;

use std::collections::BTreeMap;

use shapeseek_core::Span;

pub(crate) use build::TreeBuilder;
pub use schema::{KindSchema, NodeSchema};

/// Field key holding a node's unnamed children.
pub const CHILDREN_FIELD: &str = "children";

/// Field key holding a node's unfielded keyword tokens (`async`, `static`,
/// `get`, `*`) as one space-separated primitive. Present only when non-empty.
/// A leading operator, as in `++x`, is recorded as [`PREFIX_MARKER`].
pub const KEYWORDS_FIELD: &str = "keywords";

/// Keyword entry marking an operator written before its operand.
pub const PREFIX_MARKER: &str = "prefix";

/// Value stored under one field of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// An anonymous token such as an operator or keyword.
    Primitive(String),
    /// A single-valued field, absent when `None`.
    Child(Option<Box<Node>>),
    /// A multi-valued field or the unnamed children.
    Sequence(Vec<Node>),
}

impl FieldValue {
    /// Returns `true` for an absent child or an empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Primitive(_) => false,
            Self::Child(child) => child.is_none(),
            Self::Sequence(items) => items.is_empty(),
        }
    }

    /// Returns the child nodes held by this value.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        match self {
            Self::Primitive(_) | Self::Child(None) => &[],
            Self::Child(Some(child)) => std::slice::from_ref(child.as_ref()),
            Self::Sequence(items) => items,
        }
    }
}

/// One vertex of a normalised syntax tree.
///
/// `kind` is only meaningful relative to the adapter that produced the
/// node. Leaves and value-carrying kinds (identifiers, literals, free text)
/// keep their sanitised source text. Nodes made only of anonymous tokens,
/// such as `()` or `{ }`, keep those tokens joined by single spaces so their
/// comparison ignores layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: &'static str,
    named: bool,
    fields: BTreeMap<&'static str, FieldValue>,
    text: Option<String>,
    span: Span,
}

impl Node {
    /// Creates a named node with no fields.
    #[must_use]
    pub const fn new(kind: &'static str, span: Span) -> Self {
        Self {
            kind,
            named: true,
            fields: BTreeMap::new(),
            text: None,
            span,
        }
    }

    /// Creates an anonymous token node.
    #[must_use]
    pub fn token(kind: &'static str, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            named: false,
            fields: BTreeMap::new(),
            text: Some(text.into()),
            span,
        }
    }

    /// Sets the node's text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with_field(mut self, name: &'static str, value: FieldValue) -> Self {
        self.fields.insert(name, value);
        self
    }

    /// Returns the node kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns `false` for anonymous tokens.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        self.named
    }

    /// Returns all fields in key order.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<&'static str, FieldValue> {
        &self.fields
    }

    /// Returns one field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns the sequence stored under `name`, or an empty slice.
    #[must_use]
    pub fn sequence(&self, name: &str) -> &[Node] {
        match self.fields.get(name) {
            Some(FieldValue::Sequence(items)) => items,
            _ => &[],
        }
    }

    /// Returns the sanitised text of leaves and value-carrying kinds.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the source region of the node.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the direct child nodes in field order.
    #[must_use]
    pub fn child_nodes(&self) -> Vec<&Self> {
        self.fields
            .values()
            .flat_map(FieldValue::nodes)
            .collect()
    }

    /// Visits the node and all its descendants in pre-order.
    pub fn walk<'a, F: FnMut(&'a Self)>(&'a self, visit: &mut F) {
        visit(self);
        for value in self.fields.values() {
            for child in value.nodes() {
                child.walk(visit);
            }
        }
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    pub(crate) fn set_field(&mut self, name: &'static str, value: FieldValue) {
        self.fields.insert(name, value);
    }

    pub(crate) fn push_to(&mut self, name: &'static str, child: Self) {
        if let Some(FieldValue::Sequence(items)) = self.fields.get_mut(name) {
            items.push(child);
        }
    }

    /// Applies `edit` to the node and all its descendants.
    pub(crate) fn walk_mut(&mut self, edit: &mut impl FnMut(&mut Self)) {
        edit(self);
        for value in self.fields.values_mut() {
            match value {
                FieldValue::Primitive(_) | FieldValue::Child(None) => {}
                FieldValue::Child(Some(child)) => child.walk_mut(edit),
                FieldValue::Sequence(items) => {
                    for child in items {
                        child.walk_mut(edit);
                    }
                }
            }
        }
    }
}
