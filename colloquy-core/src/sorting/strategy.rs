//! Built-in comparator strategies
//!
//! Each strategy compares one attribute in its natural (ascending) order.
//! Direction is applied by [`DirectedSorter`](super::DirectedSorter), never
//! by the strategy itself.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::error::ComparisonError;
use super::traits::{CommentComparator, HasCreatedAt, HasScore, HasUpdatedAt};

/// Orders comments by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByCreatedAt;

impl<C: HasCreatedAt + ?Sized> CommentComparator<C> for ByCreatedAt {
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        let left = a
            .created_at()
            .ok_or_else(|| ComparisonError::missing("created_at", a))?;
        let right = b
            .created_at()
            .ok_or_else(|| ComparisonError::missing("created_at", b))?;
        Ok(left.cmp(&right))
    }

    fn name(&self) -> &'static str {
        "created_at"
    }
}

/// Orders comments by last activity: the edit time when present, otherwise
/// the creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByUpdatedAt;

impl<C: HasUpdatedAt + ?Sized> CommentComparator<C> for ByUpdatedAt {
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        let left = a
            .updated_at()
            .or_else(|| a.created_at())
            .ok_or_else(|| ComparisonError::missing("updated_at", a))?;
        let right = b
            .updated_at()
            .or_else(|| b.created_at())
            .ok_or_else(|| ComparisonError::missing("updated_at", b))?;
        Ok(left.cmp(&right))
    }

    fn name(&self) -> &'static str {
        "updated_at"
    }
}

/// Orders comments by vote score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByScore;

impl<C: HasScore + ?Sized> CommentComparator<C> for ByScore {
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        let left = a.score().ok_or_else(|| ComparisonError::missing("score", a))?;
        let right = b.score().ok_or_else(|| ComparisonError::missing("score", b))?;
        Ok(left.cmp(&right))
    }

    fn name(&self) -> &'static str {
        "score"
    }
}

/// Lexicographic composition: `secondary` only breaks ties left by `primary`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThenBy<P, S> {
    pub primary: P,
    pub secondary: S,
}

impl<P, S> ThenBy<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<C, P, S> CommentComparator<C> for ThenBy<P, S>
where
    C: ?Sized,
    P: CommentComparator<C>,
    S: CommentComparator<C>,
{
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        match self.primary.compare(a, b)? {
            Ordering::Equal => self.secondary.compare(a, b),
            decided => Ok(decided),
        }
    }

    fn name(&self) -> &'static str {
        self.primary.name()
    }
}

/// Adapts a closure into a strategy.
#[derive(Clone, Copy)]
pub struct FnComparator<F> {
    compare: F,
    name: &'static str,
}

impl<F> FnComparator<F> {
    pub fn new<C>(name: &'static str, compare: F) -> Self
    where
        C: ?Sized,
        F: Fn(&C, &C) -> Result<Ordering, ComparisonError>,
    {
        Self { compare, name }
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComparator")
            .field("name", &self.name)
            .finish()
    }
}

impl<C, F> CommentComparator<C> for FnComparator<F>
where
    C: ?Sized,
    F: Fn(&C, &C) -> Result<Ordering, ComparisonError>,
{
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        (self.compare)(a, b)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Shared, type-erased strategy as stored by the registry.
pub type SharedComparator<C> = Arc<dyn CommentComparator<C> + Send + Sync>;

/// Runtime-selectable built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    CreatedAt,
    UpdatedAt,
    /// Score; equal scores fall back to creation time.
    Score,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::CreatedAt => "created_at",
            StrategyKind::UpdatedAt => "updated_at",
            StrategyKind::Score => "score",
        }
    }

    pub fn comparator<C>(&self) -> SharedComparator<C>
    where
        C: HasUpdatedAt + HasScore + 'static,
    {
        match self {
            StrategyKind::CreatedAt => Arc::new(ByCreatedAt),
            StrategyKind::UpdatedAt => Arc::new(ByUpdatedAt),
            StrategyKind::Score => Arc::new(ThenBy::new(ByScore, ByCreatedAt)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
