//! Explicit rule registry and the per-tree analysis driver.
//!
//! Rules are constructed directly in code and registered with a
//! [`RuleRegistry`]; there is no reflection- or metadata-based
//! discovery. The host owns the registry and drives analysis by handing
//! it trees and a type resolver.

use mapfix_core::Diagnostic;
use mapfix_syntax::{NodeId, SyntaxKind, SyntaxTree};
use tracing::debug;

use crate::analyzer::ContainsKeyRule;
use crate::semantic::TypeResolver;

/// One analysis rule over call-expression nodes.
///
/// Implementations must be stateless with respect to a single analysis
/// pass: `check` is invoked once per call-expression node, possibly
/// concurrently, and must only read its inputs.
pub trait SyntaxRule: Send + Sync {
    /// Stable identifier of this rule, carried on its diagnostics.
    fn rule_id(&self) -> &'static str;

    /// Check one call-expression node, producing a diagnostic on match.
    fn check(
        &self,
        tree: &SyntaxTree,
        node: NodeId,
        resolver: &dyn TypeResolver,
    ) -> Option<Diagnostic>;
}

/// A registry of explicitly constructed rules.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn SyntaxRule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        RuleRegistry::default()
    }

    /// Create a registry with every built-in rule registered.
    pub fn with_default_rules() -> Self {
        RuleRegistry::new().with_rule(Box::new(ContainsKeyRule))
    }

    /// Register a rule.
    pub fn with_rule(mut self, rule: Box<dyn SyntaxRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Identifiers of all registered rules, in registration order.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule_id()).collect()
    }

    /// Run every registered rule over every call-expression node of the
    /// tree, in source order.
    ///
    /// Diagnostics carry line/column positions computed against the
    /// tree's rendered source. Analysis is read-only; the tree is never
    /// modified.
    pub fn analyze(&self, tree: &SyntaxTree, resolver: &dyn TypeResolver) -> Vec<Diagnostic> {
        let source = tree.render();
        let mut diagnostics = Vec::new();

        for node in tree.descendants() {
            if tree.kind(node) != Some(SyntaxKind::Invocation) {
                continue;
            }
            for rule in &self.rules {
                if let Some(diagnostic) = rule.check(tree, node, resolver) {
                    diagnostics.push(diagnostic.at(&source));
                }
            }
        }

        debug!(
            rules = self.rules.len(),
            findings = diagnostics.len(),
            "analysis pass complete"
        );
        diagnostics
    }
}
