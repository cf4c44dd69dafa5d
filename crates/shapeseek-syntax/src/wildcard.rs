//! Wildcard classification, matching and placeholder encoding.
//!
//! Queries use three wildcard markers:
//!
//! - `$` matches one identifier, or any run of characters when used as a
//!   fragment inside an identifier name or string literal (`on$`, `$Wrapper`)
//! - `$$` matches exactly one node of any kind
//! - `$$$` matches zero or more sibling nodes in a sequence
//!
//! Grammars that reject `$` in identifiers get a [`WildcardCodec`] that
//! swaps markers for legal placeholder tokens before parsing and restores
//! them afterwards.

use crate::adapter::LanguageAdapter;
use crate::node::{FieldValue, Node};

/// Marker for an identifier or fragment wildcard.
pub const IDENTIFIER_WILDCARD: &str = "$";
/// Marker for a node wildcard.
pub const NODE_WILDCARD: &str = "$$";
/// Marker for a rest wildcard.
pub const REST_WILDCARD: &str = "$$$";
/// Numeric literal that matches any numeric literal.
pub const NUMERIC_WILDCARD: &str = "0x0";

/// Whole-node wildcard kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeWildcard {
    /// `$$`: exactly one node.
    Single,
    /// `$$$`: zero or more sibling nodes.
    Rest,
}

/// Classifies a full token text as a whole-node wildcard.
#[must_use]
pub fn classify_token(text: &str) -> Option<NodeWildcard> {
    match text {
        NODE_WILDCARD => Some(NodeWildcard::Single),
        REST_WILDCARD => Some(NodeWildcard::Rest),
        _ => None,
    }
}

/// Returns the wildcard carried directly by `node`.
///
/// Only identifier-like and free-text leaves carry whole-node wildcards.
#[must_use]
pub fn node_wildcard(adapter: &dyn LanguageAdapter, node: &Node) -> Option<NodeWildcard> {
    if !(adapter.is_identifier(node) || adapter.is_text(node)) {
        return None;
    }
    node.text().and_then(classify_token)
}

/// Returns the wildcard carried by `node` or by the only content of a chain
/// of single-child wrappers around it.
///
/// Sequence elements such as `$$$;` or a C# `argument` wrapping `$$$` are
/// seen through this way.
#[must_use]
pub fn element_wildcard(adapter: &dyn LanguageAdapter, node: &Node) -> Option<NodeWildcard> {
    node_wildcard(adapter, innermost(node))
}

/// Follows single-child wrappers down to the first node with other content.
#[must_use]
pub fn innermost(node: &Node) -> &Node {
    let mut current = node;
    while let Some(child) = sole_child(current) {
        current = child;
    }
    current
}

/// Returns the only child node of a wrapper that carries nothing else.
fn sole_child(node: &Node) -> Option<&Node> {
    let mut found = None;
    for value in node.fields().values() {
        match value {
            FieldValue::Primitive(_) => return None,
            FieldValue::Child(None) => {}
            FieldValue::Child(Some(child)) => {
                if found.replace(child.as_ref()).is_some() {
                    return None;
                }
            }
            FieldValue::Sequence(items) => match items.as_slice() {
                [] => {}
                [only] if only.is_named() => {
                    if found.replace(only).is_some() {
                        return None;
                    }
                }
                _ => return None,
            },
        }
    }
    found
}

/// Returns `true` when `text` contains an identifier or fragment wildcard.
#[must_use]
pub fn has_wildcard(text: &str) -> bool {
    text.contains(IDENTIFIER_WILDCARD)
}

/// Counts the non-wildcard characters of `text`.
#[must_use]
pub fn fixed_len(text: &str) -> usize {
    text.chars().filter(|c| *c != '$').count()
}

/// Matches `text` against a pattern whose `$` runs stand for any (possibly
/// empty) run of characters.
///
/// Fixed fragments are anchored: the first must prefix the text, the last
/// must suffix it, and the ones in between must appear in order without
/// overlapping. A pattern without `$` requires equality.
///
/// ```
/// use shapeseek_syntax::wildcard::fragments_match;
///
/// assert!(fragments_match("on$", "onPress"));
/// assert!(fragments_match("$Wrapper", "FooWrapper"));
/// assert!(!fragments_match("$Wrapper", "WrapperFoo"));
/// assert!(fragments_match("a$c$e", "abcde"));
/// ```
#[must_use]
pub fn fragments_match(pattern: &str, text: &str) -> bool {
    if !has_wildcard(pattern) {
        return pattern == text;
    }
    let fragments: Vec<&str> = pattern.split('$').collect();
    let (Some(first), Some(last)) = (fragments.first(), fragments.last()) else {
        return true;
    };
    if first.len() + last.len() > text.len() {
        return false;
    }
    let Some(rest) = text
        .strip_prefix(first)
        .and_then(|tail| tail.strip_suffix(last))
    else {
        return false;
    };
    let middle = fragments
        .get(1..fragments.len().saturating_sub(1))
        .unwrap_or_default();
    let mut remaining = rest;
    for fragment in middle.iter().filter(|f| !f.is_empty()) {
        let Some(idx) = remaining.find(fragment) else {
            return false;
        };
        remaining = remaining.get(idx + fragment.len()..).unwrap_or_default();
    }
    true
}

/// Placeholder tokens for grammars where `$` is not legal syntax.
///
/// Encoding replaces the longest markers first so `$$$` never turns into
/// three identifier wildcards.
#[derive(Debug, Clone, Copy)]
pub struct WildcardCodec {
    rest: &'static str,
    node: &'static str,
    identifier: &'static str,
    keep_before: &'static [char],
}

impl WildcardCodec {
    /// Creates a codec from the three placeholder tokens.
    #[must_use]
    pub const fn new(
        rest: &'static str,
        node: &'static str,
        identifier: &'static str,
    ) -> Self {
        Self {
            rest,
            node,
            identifier,
            keep_before: &[],
        }
    }

    /// Leaves a lone `$` untouched when it is directly followed by one of
    /// `chars`.
    #[must_use]
    pub const fn keep_before(mut self, chars: &'static [char]) -> Self {
        self.keep_before = chars;
        self
    }

    /// Replaces wildcard markers in raw query text with placeholders.
    #[must_use]
    pub fn encode(&self, code: &str) -> String {
        let mut out = String::with_capacity(code.len());
        let mut chars = code.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            let mut run = 1;
            while run < 3 && chars.next_if_eq(&'$').is_some() {
                run += 1;
            }
            match run {
                3 => out.push_str(self.rest),
                2 => out.push_str(self.node),
                _ if chars.peek().is_some_and(|next| self.keep_before.contains(next)) => {
                    out.push('$');
                }
                _ => out.push_str(self.identifier),
            }
        }
        out
    }

    /// Restores wildcard markers in decoded node text.
    #[must_use]
    pub fn decode(&self, text: &str) -> String {
        text.replace(self.rest, REST_WILDCARD)
            .replace(self.node, NODE_WILDCARD)
            .replace(self.identifier, IDENTIFIER_WILDCARD)
    }

    /// Returns `true` when `text` still holds any placeholder.
    #[must_use]
    pub fn contains_placeholder(&self, text: &str) -> bool {
        [self.rest, self.node, self.identifier]
            .iter()
            .any(|token| text.contains(token))
    }
}
