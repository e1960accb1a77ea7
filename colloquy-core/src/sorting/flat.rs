//! Flat sorter: one level, no recursion.

use tracing::debug;

use super::directed::DirectedSorter;
use super::error::Result;
use super::traits::CommentComparator;
use super::utils::{apply_permutation, try_sorted_indices};

impl<S> DirectedSorter<S> {
    /// Sorts a flat list of comments, returning the reordered list.
    pub fn sort_flat<C>(&self, mut comments: Vec<C>) -> Result<Vec<C>>
    where
        S: CommentComparator<C>,
    {
        self.sort_flat_in_place(&mut comments)?;
        Ok(comments)
    }

    /// Sorts a flat list of comments in place. On error `comments` keeps its
    /// original order.
    pub fn sort_flat_in_place<C>(&self, comments: &mut [C]) -> Result<()>
    where
        S: CommentComparator<C>,
    {
        debug!(
            direction = %self.direction(),
            len = comments.len(),
            "sorting flat comment list"
        );

        let order = try_sorted_indices(comments, |a, b| self.directed_compare(a, b))
            .inspect_err(|err| debug!(error = %err, "flat comment sort aborted"))?;
        apply_permutation(comments, order);
        Ok(())
    }
}
