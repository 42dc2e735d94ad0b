//! Persistent tree edits: replace one node, get a new tree.
//!
//! A [`TreeEdit`] starts from an existing tree's arena (cheap `Arc`
//! clones), allocates replacement nodes, and commits with
//! [`TreeEdit::replace`]. The replaced node's id is reused for the new
//! subtree root, so parent child-lists and every untouched arena entry
//! carry over pointer-identical. Replacement nodes may reference
//! existing subtrees by id (e.g. an argument list), which moves them
//! into the new structure byte-for-byte unchanged.

use std::sync::Arc;

use thiserror::Error;

use crate::kind::SyntaxKind;
use crate::tree::{NodeData, NodeId, SyntaxTree};

/// Edit precondition failures.
///
/// An edit never partially applies: any of these leaves the original
/// tree untouched (it is immutable regardless).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The id does not name an arena entry of the edited tree.
    #[error("{0} is out of bounds for this tree")]
    NodeOutOfBounds(NodeId),

    /// The replacement target is not reachable from the tree root
    /// (typically a node detached by a previous edit).
    #[error("replacement target {0} is not reachable from the tree root")]
    TargetNotReachable(NodeId),

    /// The replacement subtree contains the target node, which would
    /// create a cycle.
    #[error("replacement subtree contains the target node {0}")]
    CyclicReplacement(NodeId),
}

/// An in-progress edit of one [`SyntaxTree`]. See the module docs.
pub struct TreeEdit {
    nodes: Vec<Arc<NodeData>>,
    root: NodeId,
    /// Arena length at edit start; entries at or past this index were
    /// allocated by this edit.
    first_new: usize,
}

impl SyntaxTree {
    /// Begin an edit of this tree. The tree itself is not modified.
    pub fn edit(&self) -> TreeEdit {
        TreeEdit {
            nodes: self.nodes.clone(),
            root: self.root,
            first_new: self.nodes.len(),
        }
    }
}

impl TreeEdit {
    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Arc::new(data));
        id
    }

    /// Allocate a raw token leaf with no trivia.
    pub fn token(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::leaf(
            SyntaxKind::Token,
            String::new(),
            text.into(),
            String::new(),
        ))
    }

    /// Allocate an identifier leaf with no trivia.
    pub fn identifier(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeData::leaf(
            SyntaxKind::Identifier,
            String::new(),
            name.into(),
            String::new(),
        ))
    }

    /// Allocate `receiver.name` with a fresh `.` token. `receiver` and
    /// `name` may be existing nodes; they are reused as-is.
    pub fn member_access(&mut self, receiver: NodeId, name: NodeId) -> NodeId {
        let dot = self.token(".");
        self.push(NodeData::interior(
            SyntaxKind::MemberAccess,
            vec![receiver, dot, name],
        ))
    }

    /// Allocate `callee(arguments)`. Both children may be existing
    /// nodes; they are reused as-is.
    pub fn invocation(&mut self, callee: NodeId, arguments: NodeId) -> NodeId {
        self.push(NodeData::interior(
            SyntaxKind::Invocation,
            vec![callee, arguments],
        ))
    }

    /// Commit the edit: replace `target` with `replacement`, producing a
    /// new tree.
    ///
    /// `target` must be a pre-edit node reachable from the root;
    /// `replacement` is typically a node allocated by this edit and must
    /// not contain `target` in its subtree.
    pub fn replace(mut self, target: NodeId, replacement: NodeId) -> Result<SyntaxTree, EditError> {
        if target.index() >= self.first_new {
            return Err(EditError::TargetNotReachable(target));
        }
        if target.index() >= self.nodes.len() {
            return Err(EditError::NodeOutOfBounds(target));
        }
        if replacement.index() >= self.nodes.len() {
            return Err(EditError::NodeOutOfBounds(replacement));
        }
        if !reachable_from(&self.nodes, self.root, target) {
            return Err(EditError::TargetNotReachable(target));
        }
        if reachable_from(&self.nodes, replacement, target) {
            return Err(EditError::CyclicReplacement(target));
        }

        // Only the target's slot is written; all other entries keep
        // their Arc identity.
        self.nodes[target.index()] = Arc::clone(&self.nodes[replacement.index()]);
        Ok(SyntaxTree {
            nodes: self.nodes,
            root: self.root,
        })
    }
}

fn reachable_from(nodes: &[Arc<NodeData>], from: NodeId, target: NodeId) -> bool {
    let mut stack = vec![from];
    while let Some(id) = stack.pop() {
        if id == target {
            return true;
        }
        if let Some(data) = nodes.get(id.index()) {
            stack.extend(data.children.iter().copied());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;

    /// `d.Keys.Contains(x)` with handles to the interesting nodes.
    struct Fixture {
        tree: SyntaxTree,
        call: NodeId,
        subject: NodeId,
        args: NodeId,
    }

    fn fixture() -> Fixture {
        let mut b = TreeBuilder::new();
        let subject = b.identifier("d");
        let keys = b.identifier("Keys");
        let access = b.member_access(subject, keys);
        let contains = b.identifier("Contains");
        let callee = b.member_access(access, contains);
        let x = b.identifier("x");
        let arg = b.argument(x);
        let args = b.argument_list(&[arg]);
        let call = b.invocation(callee, args);
        Fixture {
            tree: b.finish(call),
            call,
            subject,
            args,
        }
    }

    fn rewrite_to_contains_key(f: &Fixture) -> SyntaxTree {
        let mut edit = f.tree.edit();
        let name = edit.identifier("ContainsKey");
        let callee = edit.member_access(f.subject, name);
        let call = edit.invocation(callee, f.args);
        edit.replace(f.call, call).unwrap()
    }

    mod replace {
        use super::*;

        #[test]
        fn produces_rewritten_text() {
            let f = fixture();
            let new_tree = rewrite_to_contains_key(&f);
            assert_eq!(new_tree.render(), "d.ContainsKey(x)");
            // Original tree untouched.
            assert_eq!(f.tree.render(), "d.Keys.Contains(x)");
        }

        #[test]
        fn reuses_target_id_for_new_subtree_root() {
            let f = fixture();
            let new_tree = rewrite_to_contains_key(&f);
            assert_eq!(new_tree.kind(f.call), Some(SyntaxKind::Invocation));
            let callee = new_tree.invocation_callee(f.call).unwrap();
            assert_eq!(new_tree.member_name(callee), Some("ContainsKey"));
        }

        #[test]
        fn shares_untouched_entries() {
            let f = fixture();
            let new_tree = rewrite_to_contains_key(&f);
            assert!(new_tree.same_node(&f.tree, f.subject));
            assert!(new_tree.same_node(&f.tree, f.args));
            // The target slot was rewritten.
            assert!(!new_tree.same_node(&f.tree, f.call));
        }

        #[test]
        fn detaches_old_subtree() {
            let f = fixture();
            let old_callee = f.tree.invocation_callee(f.call).unwrap();
            let new_tree = rewrite_to_contains_key(&f);
            assert!(f.tree.is_reachable(old_callee));
            assert!(!new_tree.is_reachable(old_callee));
        }
    }

    mod preconditions {
        use super::*;

        #[test]
        fn rejects_out_of_bounds_replacement() {
            let f = fixture();
            let edit = f.tree.edit();
            let err = edit.replace(f.call, NodeId(9999)).unwrap_err();
            assert_eq!(err, EditError::NodeOutOfBounds(NodeId(9999)));
        }

        #[test]
        fn rejects_new_node_as_target() {
            let f = fixture();
            let mut edit = f.tree.edit();
            let name = edit.identifier("ContainsKey");
            let err = edit.replace(name, name).unwrap_err();
            assert_eq!(err, EditError::TargetNotReachable(name));
        }

        #[test]
        fn rejects_detached_target() {
            let f = fixture();
            let old_callee = f.tree.invocation_callee(f.call).unwrap();
            let new_tree = rewrite_to_contains_key(&f);

            // The old callee is still in the arena but detached.
            let mut edit = new_tree.edit();
            let replacement = edit.identifier("whatever");
            let err = edit.replace(old_callee, replacement).unwrap_err();
            assert_eq!(err, EditError::TargetNotReachable(old_callee));
        }

        #[test]
        fn rejects_cyclic_replacement() {
            let f = fixture();
            let mut edit = f.tree.edit();
            // A replacement that contains the target itself.
            let name = edit.identifier("ContainsKey");
            let callee = edit.member_access(f.call, name);
            let err = edit.replace(f.call, callee).unwrap_err();
            assert_eq!(err, EditError::CyclicReplacement(f.call));
        }
    }
}
