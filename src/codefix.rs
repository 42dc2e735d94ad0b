//! Code fix: rewrite a matched call to the direct container operation.
//!
//! Given an invocation matched by [`crate::analyzer::classify`], produce
//! a new tree in which `subject.Keys.Contains(arg)` becomes
//! `subject.ContainsKey(arg)` (or `ContainsValue` for the values view).
//! The subject expression and the entire original argument list are
//! moved into the replacement by id, so their internal formatting
//! survives untouched; structural sharing keeps every other node of the
//! tree physically identical to the original.
//!
//! A match is only valid against the exact tree it was computed from.
//! Applying it to a tree that has since been edited is a caller-contract
//! violation and fails loudly — silently rewriting the wrong node would
//! corrupt source.

use thiserror::Error;
use tracing::debug;

use mapfix_syntax::{EditError, NodeId, SyntaxTree};

use crate::analyzer::{ProjectionMatch, MEMBERSHIP_METHOD};

/// Title hosts can present for this fix.
pub const FIX_TITLE: &str = "Replace with specialized method";

/// Rewrite precondition failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// The matched node is not part of the supplied tree at all.
    #[error("{node} is not part of the supplied tree")]
    NodeNotInTree {
        /// The offending node id.
        node: NodeId,
    },

    /// The node exists but no longer has the shape the match recorded —
    /// the tree was edited since classification. Re-run analysis against
    /// the current tree and rewrite the fresh match.
    #[error("{node} no longer matches the recorded pattern; re-run analysis on the current tree")]
    StaleMatch {
        /// The offending node id.
        node: NodeId,
    },

    /// Two batched fixes cover overlapping source ranges, e.g. a match
    /// nested inside another match's argument. Rewriting one would
    /// invalidate the shape the other match recorded; apply one fix and
    /// re-run analysis instead.
    #[error("fixes for {first} and {second} cover overlapping ranges; apply one and re-run analysis")]
    OverlappingFixes {
        /// The earlier of the two conflicting fixes, in batch order.
        first: NodeId,
        /// The later of the two conflicting fixes.
        second: NodeId,
    },

    /// The underlying tree edit was rejected.
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Apply the rewrite for one match, producing a new tree.
///
/// `node` must be the invocation `m` was computed from, resolved from
/// `tree` itself. The returned tree shares every node not on the edit
/// path with `tree`; the caller decides how it is persisted and how
/// multiple independent fixes are sequenced.
pub fn rewrite(
    tree: &SyntaxTree,
    node: NodeId,
    m: &ProjectionMatch,
) -> Result<SyntaxTree, RewriteError> {
    if !tree.in_arena(node) {
        return Err(RewriteError::NodeNotInTree { node });
    }
    if !tree.is_reachable(node) {
        return Err(RewriteError::StaleMatch { node });
    }
    verify_match_shape(tree, node, m)?;

    let mut edit = tree.edit();
    let name = edit.identifier(m.replacement.method_name());
    let callee = edit.member_access(m.subject, name);
    let arguments = tree
        .invocation_arguments(node)
        .ok_or(RewriteError::StaleMatch { node })?;
    let replacement = edit.invocation(callee, arguments);
    let new_tree = edit.replace(node, replacement)?;

    debug!(
        %node,
        method = m.replacement.method_name(),
        "rewrote membership test to direct call"
    );
    Ok(new_tree)
}

/// Apply several matches from one analysis pass, producing one tree.
///
/// The fixes must cover span-disjoint calls: overlapping pairs are
/// rejected up front, before any rewrite, because editing one of the
/// pair invalidates the shape the other match recorded. Disjoint
/// subtrees keep their ids and shapes across each other's edits, so the
/// remaining fixes apply serially without re-analysis.
pub fn rewrite_all(
    tree: &SyntaxTree,
    fixes: &[(NodeId, ProjectionMatch)],
) -> Result<SyntaxTree, RewriteError> {
    let mut spans = Vec::with_capacity(fixes.len());
    for &(node, _) in fixes {
        if !tree.in_arena(node) {
            return Err(RewriteError::NodeNotInTree { node });
        }
        let span = tree.span(node).ok_or(RewriteError::StaleMatch { node })?;
        spans.push((node, span));
    }
    for (i, &(first, a)) in spans.iter().enumerate() {
        for &(second, b) in &spans[i + 1..] {
            if a.overlaps(&b) {
                return Err(RewriteError::OverlappingFixes { first, second });
            }
        }
    }

    let mut current = tree.clone();
    for &(node, m) in fixes {
        current = rewrite(&current, node, &m)?;
    }
    Ok(current)
}

/// Check that `node` still has the exact shape `m` recorded: same
/// subject and argument children, still a `.Keys`/`.Values` projection
/// under a `Contains` call. Ids are arena indices, so shape is the only
/// reliable staleness signal.
fn verify_match_shape(
    tree: &SyntaxTree,
    node: NodeId,
    m: &ProjectionMatch,
) -> Result<(), RewriteError> {
    let callee = tree
        .invocation_callee(node)
        .ok_or(RewriteError::StaleMatch { node })?;
    if tree.member_name(callee) != Some(MEMBERSHIP_METHOD) {
        return Err(RewriteError::StaleMatch { node });
    }
    let projection_access = tree
        .member_receiver(callee)
        .ok_or(RewriteError::StaleMatch { node })?;
    if tree.member_name(projection_access) != Some(m.projection.member_name()) {
        return Err(RewriteError::StaleMatch { node });
    }
    if tree.member_receiver(projection_access) != Some(m.subject) {
        return Err(RewriteError::StaleMatch { node });
    }
    let arguments = tree
        .invocation_arguments(node)
        .ok_or(RewriteError::StaleMatch { node })?;
    if tree.argument_exprs(arguments).as_slice() != [m.argument] {
        return Err(RewriteError::StaleMatch { node });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::classify;
    use crate::semantic::{StaticTypeResolver, TypeSymbol};
    use mapfix_syntax::TreeBuilder;

    fn keys_call() -> (SyntaxTree, NodeId) {
        let mut b = TreeBuilder::new();
        let d = b.identifier("d");
        let keys = b.identifier("Keys");
        let access = b.member_access(d, keys);
        let contains = b.identifier("Contains");
        let callee = b.member_access(access, contains);
        let x = b.identifier("x");
        let arg = b.argument(x);
        let list = b.argument_list(&[arg]);
        let call = b.invocation(callee, list);
        (b.finish(call), call)
    }

    fn resolver() -> StaticTypeResolver {
        StaticTypeResolver::new().with_binding(
            "d",
            TypeSymbol::new("Dictionary", 2).with_interface("IDictionary", 2),
        )
    }

    #[test]
    fn rewrites_keys_contains_to_contains_key() {
        let (tree, call) = keys_call();
        let m = classify(&tree, call, &resolver()).into_match().unwrap();
        let new_tree = rewrite(&tree, call, &m).unwrap();
        assert_eq!(new_tree.render(), "d.ContainsKey(x)");
    }

    #[test]
    fn rejects_node_outside_arena() {
        let (tree, call) = keys_call();
        let m = classify(&tree, call, &resolver()).into_match().unwrap();
        let bogus = NodeId(9999);
        let err = rewrite(&tree, bogus, &m).unwrap_err();
        assert_eq!(err, RewriteError::NodeNotInTree { node: bogus });
    }

    #[test]
    fn rejects_match_against_already_rewritten_tree() {
        let (tree, call) = keys_call();
        let m = classify(&tree, call, &resolver()).into_match().unwrap();
        let new_tree = rewrite(&tree, call, &m).unwrap();

        // The node id still exists in the new tree, but its shape is now
        // the rewritten call; the recorded match is stale.
        let err = rewrite(&new_tree, call, &m).unwrap_err();
        assert_eq!(err, RewriteError::StaleMatch { node: call });
    }

    #[test]
    fn batch_applies_span_disjoint_fixes() {
        let mut b = TreeBuilder::new();
        let first = {
            let d = b.identifier("d");
            let keys = b.identifier("Keys");
            let access = b.member_access(d, keys);
            let contains = b.identifier("Contains");
            let callee = b.member_access(access, contains);
            let x = b.identifier("x");
            let arg = b.argument(x);
            let list = b.argument_list(&[arg]);
            b.invocation(callee, list)
        };
        let sep = b.token_with_trivia("", " &&", " ");
        let second = {
            let d = b.identifier("d");
            let values = b.identifier("Values");
            let access = b.member_access(d, values);
            let contains = b.identifier("Contains");
            let callee = b.member_access(access, contains);
            let y = b.identifier("y");
            let arg = b.argument(y);
            let list = b.argument_list(&[arg]);
            b.invocation(callee, list)
        };
        let root = b.source_file(vec![first, sep, second]);
        let tree = b.finish(root);

        let resolver = resolver();
        let fixes = [
            (first, classify(&tree, first, &resolver).into_match().unwrap()),
            (second, classify(&tree, second, &resolver).into_match().unwrap()),
        ];
        let new_tree = rewrite_all(&tree, &fixes).unwrap();
        assert_eq!(new_tree.render(), "d.ContainsKey(x) && d.ContainsValue(y)");
    }

    #[test]
    fn batch_rejects_nested_fixes() {
        // The inner call is the outer call's argument; their ranges
        // overlap, so the pair cannot be applied as one batch.
        let mut b = TreeBuilder::new();
        let inner = {
            let e = b.identifier("e");
            let keys = b.identifier("Keys");
            let access = b.member_access(e, keys);
            let contains = b.identifier("Contains");
            let callee = b.member_access(access, contains);
            let x = b.identifier("x");
            let arg = b.argument(x);
            let list = b.argument_list(&[arg]);
            b.invocation(callee, list)
        };
        let outer = {
            let d = b.identifier("d");
            let keys = b.identifier("Keys");
            let access = b.member_access(d, keys);
            let contains = b.identifier("Contains");
            let callee = b.member_access(access, contains);
            let arg = b.argument(inner);
            let list = b.argument_list(&[arg]);
            b.invocation(callee, list)
        };
        let tree = b.finish(outer);

        let resolver = resolver().with_binding(
            "e",
            TypeSymbol::new("Dictionary", 2).with_interface("IDictionary", 2),
        );
        let fixes = [
            (outer, classify(&tree, outer, &resolver).into_match().unwrap()),
            (inner, classify(&tree, inner, &resolver).into_match().unwrap()),
        ];
        let err = rewrite_all(&tree, &fixes).unwrap_err();
        assert_eq!(
            err,
            RewriteError::OverlappingFixes {
                first: outer,
                second: inner
            }
        );
    }

    #[test]
    fn rejects_match_with_wrong_subject() {
        let (tree, call) = keys_call();
        let mut m = classify(&tree, call, &resolver()).into_match().unwrap();
        m.subject = call; // nonsense subject
        let err = rewrite(&tree, call, &m).unwrap_err();
        assert_eq!(err, RewriteError::StaleMatch { node: call });
    }
}
