//! The immutable syntax tree and its traversal/query surface.

use std::fmt;
use std::sync::Arc;

use mapfix_core::Span;

use crate::kind::SyntaxKind;

/// Stable arena index of a syntax node.
///
/// Ids are stable across edits of the same tree family: an edit reuses
/// the ids of every node it does not touch. Ids from one tree family are
/// meaningless in an unrelated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// One arena entry. Leaves carry text and trivia; interior nodes carry an
/// ordered child list.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    /// Whitespace/comments preceding the token (leaves only).
    pub(crate) leading: String,
    /// The token text itself (leaves only).
    pub(crate) text: String,
    /// Whitespace/comments following the token (leaves only).
    pub(crate) trailing: String,
    /// Ordered children (interior nodes only).
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn leaf(kind: SyntaxKind, leading: String, text: String, trailing: String) -> Self {
        debug_assert!(kind.is_leaf());
        NodeData {
            kind,
            leading,
            text,
            trailing,
            children: Vec::new(),
        }
    }

    pub(crate) fn interior(kind: SyntaxKind, children: Vec<NodeId>) -> Self {
        debug_assert!(!kind.is_leaf());
        NodeData {
            kind,
            leading: String::new(),
            text: String::new(),
            trailing: String::new(),
            children,
        }
    }
}

/// An immutable, persistent syntax tree.
///
/// Produced by [`crate::TreeBuilder`] or by editing an existing tree via
/// [`SyntaxTree::edit`]. All query methods take `&self` only and hold no
/// interior mutable state, so a tree may be read from any number of
/// threads concurrently.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) nodes: Vec<Arc<NodeData>>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    /// The root node of this tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of arena entries, including entries detached by edits.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `id` names an arena entry of this tree.
    pub fn in_arena(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub(crate) fn data(&self, id: NodeId) -> Option<&Arc<NodeData>> {
        self.nodes.get(id.index())
    }

    /// The kind of a node, or `None` if `id` is not in the arena.
    pub fn kind(&self, id: NodeId) -> Option<SyntaxKind> {
        self.data(id).map(|d| d.kind)
    }

    /// The ordered children of a node. Leaves and unknown ids yield an
    /// empty slice.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    /// Token text of a leaf node, without trivia.
    pub fn token_text(&self, id: NodeId) -> Option<&str> {
        self.data(id)
            .filter(|d| d.kind.is_leaf())
            .map(|d| d.text.as_str())
    }

    /// Identifier value of an [`SyntaxKind::Identifier`] leaf.
    pub fn identifier_text(&self, id: NodeId) -> Option<&str> {
        self.data(id)
            .filter(|d| d.kind == SyntaxKind::Identifier)
            .map(|d| d.text.as_str())
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Pre-order traversal of every node reachable from the root.
    ///
    /// Children are visited in source order. Arena entries detached by a
    /// prior edit are not visited.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Whether `id` is reachable from the root of this tree.
    ///
    /// After an edit, nodes of the replaced subtree remain in the arena
    /// but are no longer reachable.
    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.in_arena(id) && self.descendants().any(|n| n == id)
    }

    /// The parent of a node, or `None` for the root or unreachable nodes.
    ///
    /// Parents are derived from the reachable tree rather than stored on
    /// nodes, so arena entries stay shareable across edits.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.descendants()
            .find(|&n| self.children(n).contains(&id))
    }

    // ------------------------------------------------------------------
    // Rendering and spans
    // ------------------------------------------------------------------

    /// Render the full source text of this tree.
    pub fn render(&self) -> String {
        self.node_text(self.root)
    }

    /// Render the source text of one subtree, including interior trivia.
    pub fn node_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_text(id, &mut out);
        out
    }

    fn write_text(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.data(id) else {
            return;
        };
        if data.kind.is_leaf() {
            out.push_str(&data.leading);
            out.push_str(&data.text);
            out.push_str(&data.trailing);
        } else {
            for &child in &data.children {
                self.write_text(child, out);
            }
        }
    }

    /// Width of a subtree in bytes of rendered text.
    fn width(&self, id: NodeId) -> u64 {
        let Some(data) = self.data(id) else {
            return 0;
        };
        if data.kind.is_leaf() {
            (data.leading.len() + data.text.len() + data.trailing.len()) as u64
        } else {
            data.children.iter().map(|&c| self.width(c)).sum()
        }
    }

    /// Bytes of leading trivia before a subtree's first token.
    fn leading_trivia_width(&self, id: NodeId) -> u64 {
        let Some(data) = self.data(id) else {
            return 0;
        };
        if data.kind.is_leaf() {
            return data.leading.len() as u64;
        }
        data.children
            .iter()
            .find(|&&c| self.width(c) > 0)
            .map_or(0, |&c| self.leading_trivia_width(c))
    }

    /// Bytes of trailing trivia after a subtree's last token.
    fn trailing_trivia_width(&self, id: NodeId) -> u64 {
        let Some(data) = self.data(id) else {
            return 0;
        };
        if data.kind.is_leaf() {
            return data.trailing.len() as u64;
        }
        data.children
            .iter()
            .rev()
            .find(|&&c| self.width(c) > 0)
            .map_or(0, |&c| self.trailing_trivia_width(c))
    }

    /// Byte span of a reachable node's tokens in the rendered source
    /// text.
    ///
    /// The span runs from the node's first token byte to its last,
    /// excluding the leading trivia carried on its first leaf and the
    /// trailing trivia on its last, so a diagnostic points at code
    /// rather than at surrounding whitespace. Returns `None` for
    /// unreachable nodes.
    pub fn span(&self, id: NodeId) -> Option<Span> {
        let mut offset = 0u64;
        self.span_from(self.root, id, &mut offset)
    }

    fn span_from(&self, current: NodeId, target: NodeId, offset: &mut u64) -> Option<Span> {
        if current == target {
            let width = self.width(current);
            let start = *offset + self.leading_trivia_width(current);
            let end = *offset + width - self.trailing_trivia_width(current);
            return Some(Span::new(start, end));
        }
        let data = self.data(current)?;
        if data.kind.is_leaf() {
            *offset += self.width(current);
            return None;
        }
        for &child in &data.children {
            if let Some(span) = self.span_from(child, target, offset) {
                return Some(span);
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Shape accessors
    // ------------------------------------------------------------------
    //
    // All of these are total: any node that does not have the expected
    // shape yields `None`, never a panic. The analyzer relies on this to
    // treat malformed shapes as non-matches.

    /// The callee expression of an [`SyntaxKind::Invocation`] node.
    pub fn invocation_callee(&self, id: NodeId) -> Option<NodeId> {
        let data = self.data(id).filter(|d| d.kind == SyntaxKind::Invocation)?;
        data.children.first().copied()
    }

    /// The [`SyntaxKind::ArgumentList`] of an invocation node.
    pub fn invocation_arguments(&self, id: NodeId) -> Option<NodeId> {
        let data = self.data(id).filter(|d| d.kind == SyntaxKind::Invocation)?;
        let list = *data.children.get(1)?;
        self.data(list)
            .filter(|d| d.kind == SyntaxKind::ArgumentList)?;
        Some(list)
    }

    /// The receiver expression of a [`SyntaxKind::MemberAccess`] node.
    pub fn member_receiver(&self, id: NodeId) -> Option<NodeId> {
        let data = self
            .data(id)
            .filter(|d| d.kind == SyntaxKind::MemberAccess)?;
        data.children.first().copied()
    }

    /// The accessed member name of a [`SyntaxKind::MemberAccess`] node.
    pub fn member_name(&self, id: NodeId) -> Option<&str> {
        let data = self
            .data(id)
            .filter(|d| d.kind == SyntaxKind::MemberAccess)?;
        let name = *data.children.last()?;
        self.identifier_text(name)
    }

    /// The expressions of an [`SyntaxKind::ArgumentList`], one per
    /// [`SyntaxKind::Argument`] child.
    pub fn argument_exprs(&self, list: NodeId) -> Vec<NodeId> {
        self.children(list)
            .iter()
            .copied()
            .filter(|&c| self.kind(c) == Some(SyntaxKind::Argument))
            .filter_map(|c| self.children(c).first().copied())
            .collect()
    }

    // ------------------------------------------------------------------
    // Structural sharing
    // ------------------------------------------------------------------

    /// Whether `id` names the pointer-identical arena entry in both
    /// trees.
    ///
    /// Two trees related by an edit share every entry the edit did not
    /// write; this is the observable form of structural sharing.
    pub fn same_node(&self, other: &SyntaxTree, id: NodeId) -> bool {
        match (self.data(id), other.data(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Pre-order iterator over reachable nodes. See [`SyntaxTree::descendants`].
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        let children = self.tree.children(next);
        for &child in children.iter().rev() {
            self.stack.push(child);
        }
        Some(next)
    }
}
