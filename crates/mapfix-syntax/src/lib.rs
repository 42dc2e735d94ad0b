//! Immutable arena-backed syntax trees with persistent edits.
//!
//! This crate provides the tree model the mapfix analyzer operates on.
//! Trees are produced by a host (an upstream parser or the
//! [`TreeBuilder`]) and are never mutated: an edit produces a new
//! [`SyntaxTree`] that physically shares every untouched node with the
//! original.
//!
//! # Arena Model
//!
//! Nodes live in an arena indexed by stable [`NodeId`]s. Each entry is an
//! `Arc`-shared [`SyntaxKind`]-tagged record holding either leaf text
//! (token text plus leading/trailing trivia) or an ordered child list.
//! An edit clones the arena vector (cheap `Arc` clones), appends entries
//! for newly built nodes, and overwrites only the replaced node's slot.
//! Every other entry stays pointer-identical across the two trees, which
//! is what makes an edit surgical: no unrelated syntax is re-rendered or
//! reformatted.
//!
//! # Quick Start
//!
//! ```
//! use mapfix_syntax::TreeBuilder;
//!
//! let mut b = TreeBuilder::new();
//! let d = b.identifier("d");
//! let keys = b.identifier("Keys");
//! let access = b.member_access(d, keys);
//! let x = b.identifier("x");
//! let arg = b.argument(x);
//! let args = b.argument_list(&[arg]);
//! let contains = b.identifier("Contains");
//! let callee = b.member_access(access, contains);
//! let call = b.invocation(callee, args);
//! let tree = b.finish(call);
//!
//! assert_eq!(tree.render(), "d.Keys.Contains(x)");
//! ```

pub mod builder;
pub mod edit;
pub mod kind;
pub mod tree;

pub use builder::TreeBuilder;
pub use edit::{EditError, TreeEdit};
pub use kind::SyntaxKind;
pub use tree::{NodeId, SyntaxTree};
