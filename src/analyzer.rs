//! Pattern matcher for the membership-test-on-projection idiom.
//!
//! Detects calls of the general-purpose `Contains` method on the `Keys`
//! or `Values` projection of a dictionary-typed expression, e.g.
//! `d.Keys.Contains(x)` where `d` is dictionary-like. Such a call scans
//! the projection sequence when the container offers a direct lookup
//! (`ContainsKey`/`ContainsValue`).
//!
//! Classification is structural first (cheap shape checks), semantic
//! second (one resolver query), and strictly conservative: an
//! unresolvable type or an unexpected node shape is a non-match, never
//! an error. A false positive would propose a broken rewrite; a false
//! negative only misses a cleanup.

use mapfix_core::Diagnostic;
use mapfix_syntax::{NodeId, SyntaxKind, SyntaxTree};
use tracing::{debug, trace};

use crate::registry::SyntaxRule;
use crate::semantic::{TypeResolver, TypeSymbol};

/// The membership-test method this rule recognizes. Exact identifier
/// match; aliases and near-misses never match.
pub(crate) const MEMBERSHIP_METHOD: &str = "Contains";

/// Interface name of the minimal key/value-mapping contract.
const DICTIONARY_INTERFACE: &str = "IDictionary";
/// Name of the read-only key/value-mapping contract.
const READ_ONLY_DICTIONARY_INTERFACE: &str = "IReadOnlyDictionary";
/// Name of the concrete container that carries a direct `ContainsValue`.
const CONCRETE_DICTIONARY: &str = "Dictionary";
/// A key/value map has exactly two generic parameters.
const DICTIONARY_ARITY: u32 = 2;

/// Which projection of the container the call scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    /// The `Keys` view.
    Keys,
    /// The `Values` view.
    Values,
}

impl ProjectionKind {
    fn from_member_name(name: &str) -> Option<Self> {
        match name {
            "Keys" => Some(ProjectionKind::Keys),
            "Values" => Some(ProjectionKind::Values),
            _ => None,
        }
    }

    /// The projection's member name in source.
    pub fn member_name(&self) -> &'static str {
        match self {
            ProjectionKind::Keys => "Keys",
            ProjectionKind::Values => "Values",
        }
    }
}

/// The direct container operation that replaces the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementOp {
    /// Direct key lookup, available on any dictionary contract.
    ContainsKey,
    /// Direct value scan, a concrete `Dictionary` extension only.
    ContainsValue,
}

impl ReplacementOp {
    /// The method name to emit in the rewritten call.
    pub fn method_name(&self) -> &'static str {
        match self {
            ReplacementOp::ContainsKey => "ContainsKey",
            ReplacementOp::ContainsValue => "ContainsValue",
        }
    }
}

/// The payload of a successful classification.
///
/// Nodes are carried by id (structural identity): the rewriter moves the
/// subject and argument subtrees into the replacement unmodified,
/// preserving their internal formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionMatch {
    /// The container-valued expression (e.g. the dictionary variable).
    pub subject: NodeId,
    /// Which projection the call scans.
    pub projection: ProjectionKind,
    /// The single call argument expression.
    pub argument: NodeId,
    /// The direct operation to rewrite to.
    pub replacement: ReplacementOp,
}

/// Result of classifying one call-expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The node is not an instance of the idiom.
    NoMatch,
    /// The node matches; the payload drives diagnostic and rewrite.
    Match(ProjectionMatch),
}

impl MatchResult {
    /// Whether this is a match.
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Match(_))
    }

    /// The match payload, if any.
    pub fn into_match(self) -> Option<ProjectionMatch> {
        match self {
            MatchResult::NoMatch => None,
            MatchResult::Match(m) => Some(m),
        }
    }
}

/// Classify one call-expression node.
///
/// Stateless and read-only; safe to invoke concurrently across nodes and
/// trees. Any node may legitimately fail to have the expected shape, so
/// every structural probe short-circuits to [`MatchResult::NoMatch`].
pub fn classify(tree: &SyntaxTree, node: NodeId, resolver: &dyn TypeResolver) -> MatchResult {
    // Cheap structural rejection before any semantic resolution: the
    // callee must be a member access named exactly `Contains`.
    let Some(callee) = tree.invocation_callee(node) else {
        return MatchResult::NoMatch;
    };
    if tree.member_name(callee) != Some(MEMBERSHIP_METHOD) {
        return MatchResult::NoMatch;
    }

    // Only single-argument calls are pure membership tests; anything
    // else risks colliding with overloads.
    let Some(args) = tree.invocation_arguments(node) else {
        return MatchResult::NoMatch;
    };
    let arg_exprs = tree.argument_exprs(args);
    let &[argument] = arg_exprs.as_slice() else {
        return MatchResult::NoMatch;
    };

    // The receiver must itself be a `.Keys` or `.Values` access.
    let Some(projection_access) = tree.member_receiver(callee) else {
        return MatchResult::NoMatch;
    };
    if tree.kind(projection_access) != Some(SyntaxKind::MemberAccess) {
        return MatchResult::NoMatch;
    }
    let Some(projection) = tree
        .member_name(projection_access)
        .and_then(ProjectionKind::from_member_name)
    else {
        return MatchResult::NoMatch;
    };
    let Some(subject) = tree.member_receiver(projection_access) else {
        return MatchResult::NoMatch;
    };

    // Semantic gate: the projected expression must resolve to a
    // dictionary-like type. Unresolvable types occur while the user is
    // still typing; never guess.
    let Some(ty) = resolver.resolve_type(tree, subject) else {
        trace!(%node, "subject type unresolvable; skipping");
        return MatchResult::NoMatch;
    };
    if !is_dictionary_like(&ty) {
        return MatchResult::NoMatch;
    }

    // ContainsValue is only available on the concrete Dictionary type,
    // not on the abstract contracts.
    let replacement = match projection {
        ProjectionKind::Keys => ReplacementOp::ContainsKey,
        ProjectionKind::Values => {
            if ty.name != CONCRETE_DICTIONARY {
                return MatchResult::NoMatch;
            }
            ReplacementOp::ContainsValue
        }
    };

    debug!(
        %node,
        subject = %tree.node_text(subject).trim(),
        projection = projection.member_name(),
        replacement = replacement.method_name(),
        "matched membership test on projection"
    );
    MatchResult::Match(ProjectionMatch {
        subject,
        projection,
        argument,
        replacement,
    })
}

/// Whether a type is a key/value map: it implements the dictionary
/// contract with arity two, or is itself one of the dictionary contracts
/// with arity two.
fn is_dictionary_like(ty: &TypeSymbol) -> bool {
    ty.implements(DICTIONARY_INTERFACE, DICTIONARY_ARITY)
        || (ty.arity == DICTIONARY_ARITY
            && (ty.name == DICTIONARY_INTERFACE || ty.name == READ_ONLY_DICTIONARY_INTERFACE))
}

/// The analyzer rule: classification plus diagnostic reporting, behind
/// the registry's [`SyntaxRule`] seam.
#[derive(Debug, Default)]
pub struct ContainsKeyRule;

impl ContainsKeyRule {
    /// Stable diagnostic rule identifier.
    pub const RULE_ID: &'static str = "ContainsKeyAnalyzer";
    /// Diagnostic category.
    pub const CATEGORY: &'static str = "Performance";
}

impl SyntaxRule for ContainsKeyRule {
    fn rule_id(&self) -> &'static str {
        ContainsKeyRule::RULE_ID
    }

    fn check(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        resolver: &dyn TypeResolver,
    ) -> Option<Diagnostic> {
        let m = classify(tree, node, resolver).into_match()?;
        diagnostic_for_match(tree, node, &m)
    }
}

/// Turn a match into its diagnostic: severity Warning, the invocation's
/// source span, and a message carrying the call's literal source text.
///
/// Pure function of the matched node; no deduplication.
pub fn diagnostic_for_match(
    tree: &SyntaxTree,
    node: NodeId,
    m: &ProjectionMatch,
) -> Option<Diagnostic> {
    let span = tree.span(node)?;
    let call_text = tree.node_text(node);
    let message = format!(
        "Use '{}' instead of '{}'",
        m.replacement.method_name(),
        call_text.trim()
    );
    Some(Diagnostic::warning(ContainsKeyRule::RULE_ID, message, span))
}
