//! Programmatic construction of syntax trees.
//!
//! Parsing source text is a host concern; the analyzer consumes trees
//! that already exist. [`TreeBuilder`] is the construction surface hosts
//! (and tests) use to produce them. Leaves may carry leading/trailing
//! trivia so that a built tree renders back to the exact source text it
//! models.

use std::sync::Arc;

use crate::kind::SyntaxKind;
use crate::tree::{NodeData, NodeId, SyntaxTree};

/// Builds a [`SyntaxTree`] bottom-up: construct leaves first, combine
/// them into interior nodes, then call [`TreeBuilder::finish`] with the
/// root.
#[derive(Default)]
pub struct TreeBuilder {
    nodes: Vec<Arc<NodeData>>,
}

impl TreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Arc::new(data));
        id
    }

    /// A raw token leaf with no trivia.
    pub fn token(&mut self, text: impl Into<String>) -> NodeId {
        self.token_with_trivia("", text, "")
    }

    /// A raw token leaf with leading and trailing trivia.
    pub fn token_with_trivia(
        &mut self,
        leading: impl Into<String>,
        text: impl Into<String>,
        trailing: impl Into<String>,
    ) -> NodeId {
        self.push(NodeData::leaf(
            SyntaxKind::Token,
            leading.into(),
            text.into(),
            trailing.into(),
        ))
    }

    /// An identifier leaf with no trivia.
    pub fn identifier(&mut self, name: impl Into<String>) -> NodeId {
        self.identifier_with_trivia("", name, "")
    }

    /// An identifier leaf with leading and trailing trivia.
    pub fn identifier_with_trivia(
        &mut self,
        leading: impl Into<String>,
        name: impl Into<String>,
        trailing: impl Into<String>,
    ) -> NodeId {
        self.push(NodeData::leaf(
            SyntaxKind::Identifier,
            leading.into(),
            name.into(),
            trailing.into(),
        ))
    }

    /// `receiver.name` — a member access with a fresh `.` token.
    pub fn member_access(&mut self, receiver: NodeId, name: NodeId) -> NodeId {
        let dot = self.token(".");
        self.push(NodeData::interior(
            SyntaxKind::MemberAccess,
            vec![receiver, dot, name],
        ))
    }

    /// `callee(arguments)` — an invocation of a callee expression.
    pub fn invocation(&mut self, callee: NodeId, arguments: NodeId) -> NodeId {
        self.push(NodeData::interior(
            SyntaxKind::Invocation,
            vec![callee, arguments],
        ))
    }

    /// Wrap one expression as an argument.
    pub fn argument(&mut self, expr: NodeId) -> NodeId {
        self.push(NodeData::interior(SyntaxKind::Argument, vec![expr]))
    }

    /// `(a, b, ...)` — a parenthesized argument list with fresh
    /// punctuation tokens.
    pub fn argument_list(&mut self, arguments: &[NodeId]) -> NodeId {
        let mut children = Vec::with_capacity(arguments.len() * 2 + 1);
        children.push(self.token("("));
        for (i, &arg) in arguments.iter().enumerate() {
            if i > 0 {
                children.push(self.token_with_trivia("", ",", " "));
            }
            children.push(arg);
        }
        children.push(self.token(")"));
        self.push(NodeData::interior(SyntaxKind::ArgumentList, children))
    }

    /// A generic interior node the analyzer will not inspect.
    pub fn group(&mut self, children: Vec<NodeId>) -> NodeId {
        self.push(NodeData::interior(SyntaxKind::Group, children))
    }

    /// A source-file root wrapping top-level children.
    pub fn source_file(&mut self, children: Vec<NodeId>) -> NodeId {
        self.push(NodeData::interior(SyntaxKind::SourceFile, children))
    }

    /// Finish building, producing an immutable tree rooted at `root`.
    ///
    /// # Panics
    /// Panics if `root` was not allocated by this builder.
    pub fn finish(self, root: NodeId) -> SyntaxTree {
        assert!(
            root.index() < self.nodes.len(),
            "root {} was not allocated by this builder",
            root
        );
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}
