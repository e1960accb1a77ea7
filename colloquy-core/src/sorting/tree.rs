//! Tree sorter
//!
//! Children are ordered before their parent's level, at every level of the
//! thread. The work is split into a read-only planning pass that computes a
//! permutation per level, and an apply pass that moves nodes. Any comparison
//! failure surfaces from the planning pass, before a single node has moved.

use colloquy_model::{CommentNode, CommentTree};
use tracing::debug;

use super::directed::DirectedSorter;
use super::error::{Result, SortError};
use super::traits::CommentComparator;
use super::utils::{apply_permutation, try_sorted_indices};

/// Target order for one sibling list plus the plans of each sibling's
/// replies, indexed by the sibling's original position.
#[derive(Debug)]
struct LevelPlan {
    order: Vec<usize>,
    children: Vec<Option<LevelPlan>>,
}

impl<S> DirectedSorter<S> {
    /// Sorts every level of `tree`, returning the reordered tree.
    pub fn sort_tree<C>(&self, mut tree: CommentTree<C>) -> Result<CommentTree<C>>
    where
        S: CommentComparator<C>,
    {
        self.sort_tree_in_place(tree.roots_mut())?;
        Ok(tree)
    }

    /// Sorts a sibling list and all of its descendants in place.
    ///
    /// On error `nodes` is left exactly as it was passed in.
    pub fn sort_tree_in_place<C>(&self, nodes: &mut [CommentNode<C>]) -> Result<()>
    where
        S: CommentComparator<C>,
    {
        debug!(
            direction = %self.direction(),
            roots = nodes.len(),
            max_depth = ?self.options().max_depth,
            "sorting comment tree"
        );

        let plan = self.plan_level(nodes, 1).inspect_err(|err| {
            debug!(error = %err, "comment tree sort aborted");
        })?;
        apply_plan(nodes, plan);
        Ok(())
    }

    fn plan_level<C>(&self, nodes: &[CommentNode<C>], depth: usize) -> Result<LevelPlan>
    where
        S: CommentComparator<C>,
    {
        if let Some(limit) = self.options().max_depth
            && depth > limit
        {
            return Err(SortError::DepthExceeded { limit });
        }

        let children = nodes
            .iter()
            .map(|node| {
                if node.has_children() {
                    self.plan_level(&node.children, depth + 1).map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let order = try_sorted_indices(nodes, |a, b| {
            self.directed_compare(&a.comment, &b.comment)
        })?;

        Ok(LevelPlan { order, children })
    }
}

fn apply_plan<C>(nodes: &mut [CommentNode<C>], plan: LevelPlan) {
    // Child plans are indexed by original position, so descend before this
    // level is permuted.
    for (node, child_plan) in nodes.iter_mut().zip(plan.children) {
        if let Some(child_plan) = child_plan {
            apply_plan(&mut node.children, child_plan);
        }
    }
    apply_permutation(nodes, plan.order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::{ComparisonError, SortOptions};
    use colloquy_model::Direction;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, Copy)]
    struct ByValue;

    impl CommentComparator<u32> for ByValue {
        fn compare(&self, a: &u32, b: &u32) -> std::result::Result<Ordering, ComparisonError> {
            Ok(a.cmp(b))
        }
    }

    fn values(nodes: &[CommentNode<u32>]) -> Vec<u32> {
        nodes.iter().map(|node| node.comment).collect()
    }

    #[test]
    fn sorts_children_and_roots() {
        let tree = CommentTree::new(vec![
            CommentNode::with_children(
                20,
                vec![CommentNode::leaf(5), CommentNode::leaf(1), CommentNode::leaf(3)],
            ),
            CommentNode::leaf(10),
        ]);

        let sorted = DirectedSorter::new(ByValue, Direction::Ascending)
            .sort_tree(tree)
            .unwrap();

        assert_eq!(values(sorted.roots()), vec![10, 20]);
        assert_eq!(values(&sorted.roots()[1].children), vec![1, 3, 5]);
    }

    #[test]
    fn empty_tree_is_returned_as_is() {
        let sorter = DirectedSorter::new(ByValue, Direction::Descending);
        let sorted = sorter.sort_tree(CommentTree::<u32>::default()).unwrap();
        assert!(sorted.is_empty());
    }

    #[test]
    fn depth_guard_rejects_deep_threads() {
        let tree = CommentTree::new(vec![CommentNode::with_children(
            1,
            vec![CommentNode::with_children(2, vec![CommentNode::leaf(3)])],
        )]);
        let sorter = DirectedSorter::new(ByValue, Direction::Ascending);

        let err = sorter
            .clone()
            .with_options(SortOptions::default().with_max_depth(2))
            .sort_tree(tree.clone())
            .unwrap_err();
        assert_eq!(err, SortError::DepthExceeded { limit: 2 });

        let ok = sorter
            .with_options(SortOptions::default().with_max_depth(3))
            .sort_tree(tree);
        assert!(ok.is_ok());
    }
}
