//! Query compilation.
//!
//! A query is ordinary source code of the target language with wildcard
//! markers. Compiling it means encoding the markers into something the
//! grammar accepts, parsing, restoring the markers on every node text and
//! picking the node (or statement list) that candidates are matched against.

use shapeseek_core::{Hint, SearchErrorRecord, Span};

use crate::adapter::LanguageAdapter;
use crate::error::SyntaxError;
use crate::node::Node;
use crate::parser::Parser;
use crate::wildcard::{IDENTIFIER_WILDCARD, node_wildcard};

/// What a compiled query is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTarget {
    /// A single node compared with every plausible file node.
    Node(Node),
    /// A synthetic block whose statements are compared with the bodies of
    /// programs and blocks.
    Statements(Node),
}

/// A parsed and decoded query pattern.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    index: usize,
    text: String,
    target: QueryTarget,
    hints: Vec<Hint>,
}

impl CompiledQuery {
    /// Returns the position of the query in the caller's list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the query text as written by the caller.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the match target.
    #[must_use]
    pub const fn target(&self) -> &QueryTarget {
        &self.target
    }

    /// Returns the advisory hints for this query.
    #[must_use]
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }
}

/// Outcome of compiling a list of queries.
///
/// `hints` has one entry per input query, empty for queries that failed.
#[derive(Debug, Default)]
pub struct QueryBatch {
    /// Successfully compiled queries, in input order.
    pub queries: Vec<CompiledQuery>,
    /// One record per failed query.
    pub errors: Vec<SearchErrorRecord>,
    /// Hints per input query.
    pub hints: Vec<Vec<Hint>>,
}

impl QueryBatch {
    /// Returns `true` when every query compiled.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Compiles every query text with `parser`.
///
/// Failures are collected rather than returned early so callers can report
/// all broken queries at once. An adapter initialisation failure affects
/// every query alike and is reported once, at index 0.
pub fn compile_queries<Q: AsRef<str>>(parser: &mut Parser, texts: &[Q]) -> QueryBatch {
    let mut batch = QueryBatch::default();
    for (index, text) in texts.iter().enumerate() {
        match compile_query(parser, index, text.as_ref()) {
            Ok(query) => {
                batch.hints.push(query.hints.clone());
                batch.queries.push(query);
            }
            Err(err @ SyntaxError::AdapterInit { .. }) => {
                batch.errors = vec![SearchErrorRecord::query(0, err.to_string(), None, None)];
                batch.hints.clear();
                return batch;
            }
            Err(err) => {
                let (line, column) = err.location().unzip();
                batch
                    .errors
                    .push(SearchErrorRecord::query(index, err.to_string(), line, column));
                batch.hints.push(Vec::new());
            }
        }
    }
    batch
}

/// Compiles one query text.
///
/// # Errors
///
/// Returns [`SyntaxError::EmptyQuery`] for blank queries and queries with
/// no comparable statement, and [`SyntaxError::Parse`] when the encoded
/// text is not valid in the parser's language.
pub fn compile_query(
    parser: &mut Parser,
    index: usize,
    text: &str,
) -> Result<CompiledQuery, SyntaxError> {
    if text.trim().is_empty() {
        return Err(SyntaxError::EmptyQuery);
    }
    let adapter = parser.adapter();
    let encoded = adapter.preprocess_query(text);
    let mut root = parser.parse_node(&encoded)?;
    root.walk_mut(&mut |node| {
        let Some(decoded) = node.text().map(|raw| adapter.decode_wildcards(raw)) else {
            return;
        };
        if adapter.is_identifier(node) {
            adapter.set_identifier_name(node, decoded);
        } else {
            node.set_text(decoded);
        }
    });

    let statements: Vec<&Node> = adapter
        .program_body(&root)
        .iter()
        .filter(|node| adapter.should_compare(node))
        .collect();
    let (target, hints) = select_target(adapter, &statements)?;
    Ok(CompiledQuery {
        index,
        text: text.to_owned(),
        target,
        hints,
    })
}

fn select_target(
    adapter: &dyn LanguageAdapter,
    statements: &[&Node],
) -> Result<(QueryTarget, Vec<Hint>), SyntaxError> {
    match statements {
        [] => Err(SyntaxError::EmptyQuery),
        [statement] => {
            let inner = adapter.unwrap_statement(statement);
            let mut hints = Vec::new();
            if adapter.identifier_name(inner) == Some(IDENTIFIER_WILDCARD) {
                hints.push(Hint::identifier_wildcard_only());
            }
            // A bare node wildcard keeps its wrapper so it matches whole
            // statements rather than every subtree.
            let target = if node_wildcard(adapter, inner).is_some() {
                (*statement).clone()
            } else {
                inner.clone()
            };
            Ok((QueryTarget::Node(target), hints))
        }
        all @ [first, .., last] => {
            let span = Span::new(first.span().start, last.span().end);
            let statements = all.iter().map(|node| (*node).clone()).collect();
            let block = adapter.create_block(statements, span);
            Ok((
                QueryTarget::Statements(block),
                vec![Hint::multiple_statements(all.len())],
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use shapeseek_core::{HintKind, SupportedLanguage};

    #[fixture]
    fn ts_parser() -> Parser {
        Parser::new(SupportedLanguage::TypeScript).expect("parser init")
    }

    #[rstest]
    fn single_statement_is_unwrapped(mut ts_parser: Parser) {
        let query = compile_query(&mut ts_parser, 0, "foo($$$);").expect("compiles");
        let QueryTarget::Node(node) = query.target() else {
            panic!("expected a node target");
        };
        assert_eq!(node.kind(), "call_expression");
        assert!(query.hints().is_empty());
    }

    #[rstest]
    fn node_wildcard_keeps_statement_wrapper(mut ts_parser: Parser) {
        let query = compile_query(&mut ts_parser, 0, "$$").expect("compiles");
        let QueryTarget::Node(node) = query.target() else {
            panic!("expected a node target");
        };
        assert_eq!(node.kind(), "expression_statement");
    }

    #[rstest]
    fn lone_identifier_wildcard_gets_hint(mut ts_parser: Parser) {
        let query = compile_query(&mut ts_parser, 0, "$").expect("compiles");
        let kinds: Vec<_> = query.hints().iter().map(Hint::kind).collect();
        assert_eq!(kinds, [HintKind::IdentifierWildcardOnly]);
    }

    #[rstest]
    fn several_statements_form_a_sequence(mut ts_parser: Parser) {
        let query = compile_query(&mut ts_parser, 0, "a();\nb();").expect("compiles");
        let QueryTarget::Statements(block) = query.target() else {
            panic!("expected a statement target");
        };
        let adapter = ts_parser.adapter();
        assert!(adapter.is_block(block));
        let lines: Vec<_> = adapter
            .program_body(block)
            .iter()
            .map(|node| node.span().start.line)
            .collect();
        assert_eq!(lines, [1, 2]);
        assert_eq!((block.span().start.line, block.span().end.line), (1, 2));
        let kinds: Vec<_> = query.hints().iter().map(Hint::kind).collect();
        assert_eq!(kinds, [HintKind::MultipleStatements]);
    }

    #[rstest]
    #[case::blank("   ")]
    #[case::comment_only("// nothing here")]
    fn empty_queries_are_rejected(mut ts_parser: Parser, #[case] text: &str) {
        let err = compile_query(&mut ts_parser, 0, text).expect_err("should fail");
        assert!(matches!(err, SyntaxError::EmptyQuery));
    }

    #[rstest]
    fn batch_reports_each_failure_with_location(mut ts_parser: Parser) {
        let batch = compile_queries(&mut ts_parser, &["foo();", "foo(", ""]);
        assert!(!batch.is_ok());
        assert_eq!(batch.queries.len(), 1);
        assert_eq!(batch.hints.len(), 3);
        let indices: Vec<_> = batch
            .errors
            .iter()
            .map(|record| match record {
                SearchErrorRecord::Query { index, line, .. } => (*index, line.is_some()),
                SearchErrorRecord::File { .. } => panic!("unexpected file record"),
            })
            .collect();
        assert_eq!(indices, [(1, true), (2, false)]);
    }

    #[test]
    fn python_placeholders_are_decoded() {
        let mut parser = Parser::new(SupportedLanguage::Python).expect("parser init");
        let query = compile_query(&mut parser, 0, "print($$$)").expect("compiles");
        let QueryTarget::Node(node) = query.target() else {
            panic!("expected a node target");
        };
        let mut texts = Vec::new();
        node.walk(&mut |n| texts.extend(n.text()));
        assert!(texts.contains(&"$$$"));
        assert!(texts.iter().all(|text| !text.contains("a_x_")));
    }
}
