//! Direction-aware sorter
//!
//! [`DirectedSorter`] pairs a comparator strategy with a fixed
//! [`Direction`]. Descending order is produced by swapping the operands
//! handed to the strategy, which works for any consistent comparator
//! regardless of how it computes its result.

use std::cmp::Ordering;

use colloquy_model::Direction;

use super::error::ComparisonError;
use super::strategy::SharedComparator;
use super::traits::CommentComparator;

/// Tuning knobs shared by the tree and flat sorters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOptions {
    /// Maximum number of tree levels accepted by the tree sorter. `None`
    /// leaves depth unbounded.
    pub max_depth: Option<usize>,
}

impl SortOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// A comparator strategy bound to a sort direction.
#[derive(Debug, Clone)]
pub struct DirectedSorter<S> {
    strategy: S,
    direction: Direction,
    options: SortOptions,
}

/// Type-erased sorter as stored in a [`SortingRegistry`](super::SortingRegistry).
pub type DynSorter<C> = DirectedSorter<SharedComparator<C>>;

impl<S> DirectedSorter<S> {
    pub fn new(strategy: S, direction: Direction) -> Self {
        Self {
            strategy,
            direction,
            options: SortOptions::default(),
        }
    }

    /// Builds a sorter from a textual direction. Only the exact tokens
    /// `ASC` and `DESC` are accepted.
    pub fn from_token(
        strategy: S,
        token: &str,
    ) -> Result<Self, colloquy_model::InvalidDirectionError> {
        let direction = Direction::parse(token)?;
        Ok(Self::new(strategy, direction))
    }

    pub fn with_options(mut self, options: SortOptions) -> Self {
        self.options = options;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn options(&self) -> SortOptions {
        self.options
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Direction-aware comparison: ascending passes the operands through,
    /// descending swaps them.
    #[inline]
    pub fn directed_compare<C>(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError>
    where
        C: ?Sized,
        S: CommentComparator<C>,
    {
        match self.direction {
            Direction::Ascending => self.strategy.compare(a, b),
            Direction::Descending => self.strategy.compare(b, a),
        }
    }
}

impl<S> DirectedSorter<S> {
    /// Erases the strategy type so sorters with different strategies can be
    /// stored together.
    pub fn into_shared<C>(self) -> DynSorter<C>
    where
        S: CommentComparator<C> + Send + Sync + 'static,
    {
        DirectedSorter {
            strategy: std::sync::Arc::new(self.strategy),
            direction: self.direction,
            options: self.options,
        }
    }
}
