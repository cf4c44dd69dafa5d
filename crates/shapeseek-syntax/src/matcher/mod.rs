//! Structural matching of query trees against file trees.
//!
//! Matching is split in two layers. The comparator ([`compare_nodes`])
//! inspects exactly one file node and one query node and reports which
//! fields still need comparing. The validator ([`validate`]) walks those
//! work lists recursively and implements the sequence semantics of each
//! [`Mode`](shapeseek_core::Mode).

mod compare;
mod context;
mod validate;

pub use compare::{LevelMatch, compare_nodes};
pub use context::MatchContext;
pub use validate::{match_statements, validate, validate_sequence};
