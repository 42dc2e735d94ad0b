//! mapfix: a static analyzer and code fix for dictionary membership-test
//! idioms.
//!
//! Testing key presence by scanning a dictionary's `Keys` projection —
//! `d.Keys.Contains(x)` — does linear work where the container offers a
//! direct `d.ContainsKey(x)` lookup. This crate finds that idiom (and
//! its `Values`/`ContainsValue` sibling, where available) and rewrites
//! matched calls in place, leaving every other byte of the source
//! untouched.
//!
//! # Architecture
//!
//! - [`mapfix_syntax`] (re-exported as [`syntax`]) holds the immutable
//!   arena-backed tree model with persistent edits.
//! - [`semantic`] defines the [`semantic::TypeResolver`] seam through
//!   which an external service answers "what type is this expression".
//! - [`analyzer`] classifies one call-expression node at a time;
//!   classification is pure, conservative (unresolvable means no match),
//!   and safe to run concurrently.
//! - [`codefix`] rewrites a matched call to the direct operation,
//!   validating the match is still live against the exact tree it is
//!   applied to.
//! - [`registry`] wires rules to a host: explicitly constructed rule
//!   instances, no runtime discovery.
//!
//! # Quick Start
//!
//! ```
//! use mapfix::analyzer::classify;
//! use mapfix::codefix::rewrite;
//! use mapfix::semantic::{StaticTypeResolver, TypeSymbol};
//! use mapfix::syntax::TreeBuilder;
//!
//! // Build `d.Keys.Contains(x)` (a host parser would normally do this).
//! let mut b = TreeBuilder::new();
//! let d = b.identifier("d");
//! let keys = b.identifier("Keys");
//! let access = b.member_access(d, keys);
//! let contains = b.identifier("Contains");
//! let callee = b.member_access(access, contains);
//! let x = b.identifier("x");
//! let arg = b.argument(x);
//! let args = b.argument_list(&[arg]);
//! let call = b.invocation(callee, args);
//! let tree = b.finish(call);
//!
//! let resolver = StaticTypeResolver::new().with_binding(
//!     "d",
//!     TypeSymbol::new("Dictionary", 2).with_interface("IDictionary", 2),
//! );
//!
//! let m = classify(&tree, call, &resolver).into_match().expect("should match");
//! let fixed = rewrite(&tree, call, &m).expect("fresh match");
//! assert_eq!(fixed.render(), "d.ContainsKey(x)");
//! ```

// Core infrastructure - re-exported from the workspace crates
pub use mapfix_core::diagnostic;
pub use mapfix_core::span;
pub use mapfix_core::text;
pub use mapfix_syntax as syntax;

pub mod analyzer;
pub mod codefix;
pub mod registry;
pub mod semantic;

pub use analyzer::{classify, ContainsKeyRule, MatchResult, ProjectionMatch};
pub use codefix::{rewrite, rewrite_all, RewriteError, FIX_TITLE};
pub use mapfix_core::{Diagnostic, Severity, Span};
pub use registry::{RuleRegistry, SyntaxRule};
pub use semantic::{StaticTypeResolver, TypeResolver, TypeSymbol};
