//! Core traits for sortable comments
//!
//! Strategies never reach into comment fields directly; they go through the
//! capability traits below, so any comment type that exposes the right
//! attribute can be ordered by the matching strategy.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::ComparisonError;

/// Base trait for anything the engine orders.
pub trait SortableComment {
    /// Short identifier used in error messages and logs.
    fn sort_label(&self) -> String;
}

pub trait HasCreatedAt: SortableComment {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

pub trait HasUpdatedAt: HasCreatedAt {
    /// Last edit time; `None` when the comment was never edited.
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

pub trait HasScore: SortableComment {
    fn score(&self) -> Option<i64>;
}

/// Three-way comparison between two comments.
///
/// Implementations must be consistent (`compare(a, b)` is the inverse of
/// `compare(b, a)`) and transitive, must not have side effects, and return
/// [`ComparisonError`] rather than `Equal` when an operand lacks the data
/// being compared.
pub trait CommentComparator<C: ?Sized> {
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError>;

    /// Name used when logging which strategy ran.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<C: ?Sized, T: CommentComparator<C> + ?Sized> CommentComparator<C> for &T {
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        (**self).compare(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: ?Sized, T: CommentComparator<C> + ?Sized> CommentComparator<C> for Box<T> {
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        (**self).compare(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: ?Sized, T: CommentComparator<C> + ?Sized> CommentComparator<C> for Arc<T> {
    fn compare(&self, a: &C, b: &C) -> Result<Ordering, ComparisonError> {
        (**self).compare(a, b)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: SortableComment + ?Sized> SortableComment for &T {
    fn sort_label(&self) -> String {
        (**self).sort_label()
    }
}

impl<T: HasCreatedAt + ?Sized> HasCreatedAt for &T {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        (**self).created_at()
    }
}

impl<T: HasUpdatedAt + ?Sized> HasUpdatedAt for &T {
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        (**self).updated_at()
    }
}

impl<T: HasScore + ?Sized> HasScore for &T {
    fn score(&self) -> Option<i64> {
        (**self).score()
    }
}
