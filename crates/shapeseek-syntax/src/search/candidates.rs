//! Candidate discovery for compiled queries.

use shapeseek_core::Span;

use crate::adapter::LanguageAdapter;
use crate::error::SyntaxError;
use crate::matcher::{MatchContext, match_statements, validate};
use crate::node::Node;
use crate::query::{CompiledQuery, QueryTarget};
use crate::wildcard::node_wildcard;

/// Returns the spans of every match of `query` inside `root`.
///
/// Candidates are visited in pre-order, so spans come out in document
/// order before deduplication.
///
/// # Errors
///
/// Propagates [`SyntaxError::ValidatorInvariant`].
pub(crate) fn find_spans(
    root: &Node,
    query: &CompiledQuery,
    ctx: &mut MatchContext<'_>,
) -> Result<Vec<Span>, SyntaxError> {
    let adapter = ctx.adapter();
    let mut nodes = Vec::new();
    root.walk(&mut |node| nodes.push(node));

    let mut spans = Vec::new();
    match query.target() {
        QueryTarget::Statements(block) => {
            let statements = adapter.program_body(block);
            for node in nodes.into_iter().filter(|node| holds_statements(adapter, node)) {
                spans.extend(match_statements(adapter.program_body(node), statements, ctx)?);
            }
        }
        QueryTarget::Node(target) if node_wildcard(adapter, target).is_some() => {
            // Without a statement wrapper a bare wildcard is only tried
            // against whole statements, never against fragments of one.
            for node in nodes.into_iter().filter(|node| holds_statements(adapter, node)) {
                let body = adapter.program_body(node);
                let standalone = body.iter().filter(|element| {
                    adapter.should_compare(element) && !adapter.is_fragment(element)
                });
                for element in standalone {
                    spans.push(element.span());
                }
            }
        }
        QueryTarget::Node(target) => {
            let plausible = nodes
                .into_iter()
                .filter(|node| adapter.are_alternatives(target.kind(), node.kind()));
            for node in plausible {
                if validate(node, target, ctx)? {
                    spans.push(node.span());
                }
            }
        }
    }
    Ok(spans)
}

fn holds_statements(adapter: &dyn LanguageAdapter, node: &Node) -> bool {
    adapter.is_program(node) || adapter.is_block(node)
}
