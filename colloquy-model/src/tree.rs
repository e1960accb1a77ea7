//! Hierarchical containers for a comment thread.
//!
//! A [`CommentTree`] is an ordered list of root [`CommentNode`]s; each node
//! owns its replies. Traversals here use an explicit stack so that very long
//! reply chains do not consume call-stack space.

use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity needed to place an entry inside a thread.
pub trait ThreadEntry {
    type Id: Copy + Eq + Hash + std::fmt::Debug;

    fn entry_id(&self) -> Self::Id;

    /// `None` for top-level entries.
    fn parent_entry_id(&self) -> Option<Self::Id>;
}

/// One position in the reply hierarchy: a comment and its direct replies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "C: Serialize", deserialize = "C: Deserialize<'de>"))
)]
pub struct CommentNode<C> {
    pub comment: C,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<CommentNode<C>>,
}

impl<C> CommentNode<C> {
    pub fn leaf(comment: C) -> Self {
        Self {
            comment,
            children: Vec::new(),
        }
    }

    pub fn with_children(comment: C, children: Vec<CommentNode<C>>) -> Self {
        Self { comment, children }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// A comment entry produced by flattening a tree, tagged with its depth
/// (roots are depth 0).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlatEntry<C> {
    pub depth: usize,
    pub comment: C,
}

/// Top-level comments of a thread, in display order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CommentTree<C> {
    roots: Vec<CommentNode<C>>,
}

impl<C> Default for CommentTree<C> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<C> From<Vec<CommentNode<C>>> for CommentTree<C> {
    fn from(roots: Vec<CommentNode<C>>) -> Self {
        Self { roots }
    }
}

impl<C> CommentTree<C> {
    pub fn new(roots: Vec<CommentNode<C>>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[CommentNode<C>] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Vec<CommentNode<C>> {
        &mut self.roots
    }

    pub fn into_roots(self) -> Vec<CommentNode<C>> {
        self.roots
    }

    /// Number of top-level comments.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of comments at every level.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(CommentNode::subtree_size).sum()
    }

    /// Number of levels; an empty tree has depth 0, roots alone depth 1.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, &CommentNode<C>)> =
            self.roots.iter().map(|node| (1, node)).collect();
        while let Some((depth, node)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|child| (depth + 1, child)));
        }
        deepest
    }

    /// Depth-first, pre-order walk yielding borrowed comments with depth.
    pub fn walk(&self) -> Vec<(usize, &C)> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack: Vec<(usize, std::slice::Iter<'_, CommentNode<C>>)> =
            vec![(0, self.roots.iter())];
        while let Some((depth, iter)) = stack.last_mut() {
            let depth = *depth;
            match iter.next() {
                Some(node) => {
                    out.push((depth, &node.comment));
                    if node.has_children() {
                        stack.push((depth + 1, node.children.iter()));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        out
    }

    /// Consumes the tree into display order: each comment directly followed
    /// by its replies (depth-first, pre-order).
    pub fn flatten(self) -> Vec<FlatEntry<C>> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, std::vec::IntoIter<CommentNode<C>>)> =
            vec![(0, self.roots.into_iter())];
        while let Some((depth, iter)) = stack.last_mut() {
            let depth = *depth;
            match iter.next() {
                Some(CommentNode { comment, children }) => {
                    out.push(FlatEntry { depth, comment });
                    if !children.is_empty() {
                        stack.push((depth + 1, children.into_iter()));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CommentTree<&'static str> {
        CommentTree::new(vec![
            CommentNode::with_children(
                "a",
                vec![
                    CommentNode::with_children("a.1", vec![CommentNode::leaf("a.1.1")]),
                    CommentNode::leaf("a.2"),
                ],
            ),
            CommentNode::leaf("b"),
        ])
    }

    #[test]
    fn counts_every_level() {
        let tree = sample();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.max_depth(), 3);
        assert_eq!(CommentTree::<u8>::default().max_depth(), 0);
    }

    #[test]
    fn flatten_is_pre_order() {
        let flat: Vec<_> = sample()
            .flatten()
            .into_iter()
            .map(|entry| (entry.depth, entry.comment))
            .collect();
        assert_eq!(
            flat,
            vec![(0, "a"), (1, "a.1"), (2, "a.1.1"), (1, "a.2"), (0, "b")]
        );
    }

    #[test]
    fn walk_matches_flatten() {
        let tree = sample();
        let walked: Vec<_> = tree.walk().into_iter().map(|(d, c)| (d, *c)).collect();
        let flat: Vec<_> = tree
            .clone()
            .flatten()
            .into_iter()
            .map(|entry| (entry.depth, entry.comment))
            .collect();
        assert_eq!(walked, flat);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn comment_tree_survives_json() {
        use crate::{Comment, CommentID, ThreadID};
        use uuid::Uuid;

        let thread = ThreadID::new("article-7");
        let root_id = CommentID::from(Uuid::from_u128(1));
        let root = Comment::new(thread.clone(), "first").with_id(root_id);
        let reply = Comment::new(thread, "second")
            .with_id(CommentID::from(Uuid::from_u128(2)))
            .reply_to(root_id)
            .with_score(Some(4));
        let tree = CommentTree::new(vec![CommentNode::with_children(
            root,
            vec![CommentNode::leaf(reply)],
        )]);

        let json = serde_json::to_string(&tree).expect("serialize tree");
        let back: CommentTree<Comment> = serde_json::from_str(&json).expect("deserialize tree");
        assert_eq!(back, tree);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_children_deserialize_as_leaves() {
        use crate::Comment;

        let json = r#"[{"comment": {
            "id": "00000000-0000-0000-0000-000000000009",
            "thread_id": "article-7",
            "body": "no replies yet"
        }}]"#;
        let tree: CommentTree<Comment> = serde_json::from_str(json).expect("deserialize tree");
        assert_eq!(tree.len(), 1);
        assert!(!tree.roots()[0].has_children());
        assert_eq!(tree.roots()[0].comment.body, "no replies yet");
    }
}
