//! Recursive match validation.
//!
//! Sequence fields are where the modes differ:
//!
//! - `exact` compares elements pairwise, letting each `$$$` absorb any run
//!   of file elements
//! - `include` drops `$$$`, sorts the remaining query elements so the most
//!   specific go first, and lets each claim the first free file element it
//!   validates against
//! - `include-with-order` additionally requires the claimed positions to
//!   follow the query order
//!
//! The greedy first-fit never revisits a claim, so a query that only
//! matches under a different assignment is reported as a mismatch.

use std::cmp::Reverse;

use shapeseek_core::{Mode, Span};
use tracing::trace;

use super::compare::compare_nodes;
use super::context::MatchContext;
use crate::adapter::LanguageAdapter;
use crate::error::SyntaxError;
use crate::node::{FieldValue, Node};
use crate::wildcard::{NodeWildcard, element_wildcard, fixed_len, has_wildcard, innermost};

/// Decides whether the whole `query` subtree matches the `file` subtree.
///
/// # Errors
///
/// Returns [`SyntaxError::ValidatorInvariant`] when the comparator yields
/// work lists of different lengths, which indicates an adapter defect.
pub fn validate(file: &Node, query: &Node, ctx: &mut MatchContext<'_>) -> Result<bool, SyntaxError> {
    let level = compare_nodes(file, query, ctx);
    if ctx.trace() {
        trace!(
            depth = ctx.depth(),
            file_kind = file.kind(),
            query_kind = query.kind(),
            matched = level.matched,
            "compared nodes"
        );
    }
    if !level.matched {
        return Ok(false);
    }
    if level.file_keys.len() != level.query_keys.len() {
        return Err(SyntaxError::validator_invariant(
            file.kind(),
            query.kind(),
            format!(
                "file keys {:?} do not line up with query keys {:?}",
                level.file_keys, level.query_keys
            ),
        ));
    }

    ctx.descend();
    let outcome = validate_fields(file, query, &level.file_keys, &level.query_keys, ctx);
    ctx.ascend();
    outcome
}

fn validate_fields(
    file: &Node,
    query: &Node,
    file_keys: &[&'static str],
    query_keys: &[&'static str],
    ctx: &mut MatchContext<'_>,
) -> Result<bool, SyntaxError> {
    for (file_key, query_key) in file_keys.iter().zip(query_keys) {
        let (Some(file_value), Some(query_value)) = (file.field(file_key), query.field(query_key))
        else {
            return Err(SyntaxError::validator_invariant(
                file.kind(),
                query.kind(),
                format!("field {query_key} vanished during comparison"),
            ));
        };
        if !validate_field(file_value, query_value, ctx)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn validate_field(
    file: &FieldValue,
    query: &FieldValue,
    ctx: &mut MatchContext<'_>,
) -> Result<bool, SyntaxError> {
    match (file, query) {
        (FieldValue::Child(Some(file_child)), FieldValue::Child(Some(query_child))) => {
            validate(file_child, query_child, ctx)
        }
        (FieldValue::Child(None), FieldValue::Child(None)) => Ok(true),
        (FieldValue::Sequence(file_items), FieldValue::Sequence(query_items)) => {
            validate_sequence(file_items, query_items, ctx)
        }
        (FieldValue::Primitive(actual), FieldValue::Primitive(expected)) => Ok(actual == expected),
        _ => Ok(false),
    }
}

/// Matches a query sequence against a file sequence under the context's
/// mode.
///
/// Elements the adapter excludes from comparison (whitespace-only text) are
/// filtered out on both sides first.
///
/// # Errors
///
/// Propagates [`SyntaxError::ValidatorInvariant`] from nested validation.
pub fn validate_sequence(
    file: &[Node],
    query: &[Node],
    ctx: &mut MatchContext<'_>,
) -> Result<bool, SyntaxError> {
    let adapter = ctx.adapter();
    let file_items = comparable(adapter, file);
    let query_items = comparable(adapter, query);
    match ctx.mode() {
        Mode::Exact => glob_match(&file_items, &query_items, ctx),
        _ => Ok(claim_elements(&file_items, &query_items, ctx)?.is_some()),
    }
}

/// Matches a statement-sequence query against the body of a program or
/// block, returning the span of every match.
///
/// Include modes yield at most one match spanning the first to the last
/// claimed statement. Exact mode yields one match per contiguous window
/// that matches pairwise.
///
/// # Errors
///
/// Propagates [`SyntaxError::ValidatorInvariant`] from nested validation.
pub fn match_statements(
    body: &[Node],
    query: &[Node],
    ctx: &mut MatchContext<'_>,
) -> Result<Vec<Span>, SyntaxError> {
    let adapter = ctx.adapter();
    let file_items = comparable(adapter, body);
    let query_items = comparable(adapter, query);

    if ctx.mode() != Mode::Exact {
        let Some(claimed) = claim_elements(&file_items, &query_items, ctx)? else {
            return Ok(Vec::new());
        };
        let first = claimed.iter().min().and_then(|idx| file_items.get(*idx));
        let last = claimed.iter().max().and_then(|idx| file_items.get(*idx));
        return Ok(match (first, last) {
            (Some(first), Some(last)) => vec![first.span().cover(&last.span())],
            _ => Vec::new(),
        });
    }

    let mut spans = Vec::new();
    for start in 0..file_items.len() {
        for end in start + 1..=file_items.len() {
            let window = file_items.get(start..end).unwrap_or_default();
            if glob_match(window, &query_items, ctx)? {
                if let (Some(first), Some(last)) = (window.first(), window.last()) {
                    spans.push(first.span().cover(&last.span()));
                }
                break;
            }
        }
    }
    Ok(spans)
}

fn comparable<'n>(adapter: &dyn LanguageAdapter, nodes: &'n [Node]) -> Vec<&'n Node> {
    nodes.iter().filter(|node| adapter.should_compare(node)).collect()
}

fn element_matches(
    file: &Node,
    query: &Node,
    ctx: &mut MatchContext<'_>,
) -> Result<bool, SyntaxError> {
    if element_wildcard(ctx.adapter(), query) == Some(NodeWildcard::Single) {
        return Ok(true);
    }
    validate(file, query, ctx)
}

fn is_rest(adapter: &dyn LanguageAdapter, node: &Node) -> bool {
    element_wildcard(adapter, node) == Some(NodeWildcard::Rest)
}

/// Ordered element-wise matching where `$$$` absorbs zero or more elements.
fn glob_match(
    file: &[&Node],
    query: &[&Node],
    ctx: &mut MatchContext<'_>,
) -> Result<bool, SyntaxError> {
    let adapter = ctx.adapter();
    if !query.iter().any(|node| is_rest(adapter, node)) && file.len() != query.len() {
        return Ok(false);
    }
    glob_from(file, query, ctx)
}

fn glob_from(
    file: &[&Node],
    query: &[&Node],
    ctx: &mut MatchContext<'_>,
) -> Result<bool, SyntaxError> {
    let Some((first, rest)) = query.split_first() else {
        return Ok(file.is_empty());
    };
    if is_rest(ctx.adapter(), first) {
        for skip in 0..=file.len() {
            if glob_from(file.get(skip..).unwrap_or_default(), rest, ctx)? {
                return Ok(true);
            }
        }
        return Ok(false);
    }
    let Some((head, tail)) = file.split_first() else {
        return Ok(false);
    };
    Ok(element_matches(head, first, ctx)? && glob_from(tail, rest, ctx)?)
}

/// Sort key placing concrete elements first, identifier wildcards next
/// (more fixed characters first) and node wildcards last.
fn strength(adapter: &dyn LanguageAdapter, node: &Node) -> (u8, Reverse<usize>) {
    if element_wildcard(adapter, node).is_some() {
        return (2, Reverse(0));
    }
    match adapter.identifier_name(innermost(node)) {
        Some(name) if has_wildcard(name) => (1, Reverse(fixed_len(name))),
        _ => (0, Reverse(0)),
    }
}

/// Greedy first-fit assignment of query elements to file elements.
///
/// Returns the claimed file indices in original query order, or `None`
/// when some element finds no free partner (or, in ordered mode, when the
/// claims are out of order).
fn claim_elements(
    file: &[&Node],
    query: &[&Node],
    ctx: &mut MatchContext<'_>,
) -> Result<Option<Vec<usize>>, SyntaxError> {
    let adapter = ctx.adapter();
    let mut pending: Vec<(usize, &Node)> = query
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, node)| !is_rest(adapter, node))
        .collect();
    if pending.len() > file.len() {
        return Ok(None);
    }
    pending.sort_by_key(|(_, node)| strength(adapter, node));

    let mut used = vec![false; file.len()];
    let mut claims: Vec<(usize, usize)> = Vec::with_capacity(pending.len());
    for (order, query_node) in pending {
        let mut claimed = None;
        for (idx, file_node) in file.iter().enumerate() {
            if used.get(idx).copied().unwrap_or(true) {
                continue;
            }
            if element_matches(file_node, query_node, ctx)? {
                claimed = Some(idx);
                break;
            }
        }
        let Some(idx) = claimed else {
            return Ok(None);
        };
        if let Some(slot) = used.get_mut(idx) {
            *slot = true;
        }
        claims.push((order, idx));
    }

    claims.sort_by_key(|(order, _)| *order);
    let indices: Vec<usize> = claims.into_iter().map(|(_, idx)| idx).collect();
    let in_order = indices
        .windows(2)
        .all(|pair| matches!(pair, [before, after] if before < after));
    if ctx.mode() == Mode::IncludeWithOrder && !in_order {
        return Ok(None);
    }
    Ok(Some(indices))
}
