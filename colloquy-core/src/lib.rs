//! # Colloquy Core
//!
//! Ordering engine for threaded comments. Given a thread of comments (either
//! as a nested [`CommentTree`] or as a flat list) it produces a deterministic
//! order according to a pluggable comparison strategy.
//!
//! ## Overview
//!
//! - **Strategies**: [`CommentComparator`] implementations compare two
//!   comments on one attribute ([`ByCreatedAt`], [`ByScore`], ...)
//! - **Direction**: [`DirectedSorter`] binds a strategy to a [`Direction`]
//!   and inverts descending order by swapping operands
//! - **Tree and flat sorting**: stable, atomic sorts over owned or borrowed
//!   collections
//! - **Registry**: [`SortingRegistry`] maps user-facing aliases such as
//!   `date_desc` to configured sorters
//! - **Thread assembly**: [`thread::assemble_tree`] builds a tree from
//!   parent-linked comments
//!
//! ## Examples
//!
//! ```
//! use colloquy_core::{ByCreatedAt, DirectedSorter, Direction};
//! use colloquy_model::{Comment, CommentNode, CommentTree, ThreadID};
//!
//! # fn main() -> Result<(), colloquy_core::SortError> {
//! let thread = ThreadID::new("article-42");
//! let first = Comment::new(thread.clone(), "first");
//! let reply = Comment::new(thread, "reply").reply_to(first.id);
//! let tree = CommentTree::new(vec![CommentNode::with_children(
//!     first,
//!     vec![CommentNode::leaf(reply)],
//! )]);
//!
//! let sorter = DirectedSorter::new(ByCreatedAt, Direction::Descending);
//! let sorted = sorter.sort_tree(tree)?;
//! assert_eq!(sorted.node_count(), 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Comparator strategies, direction handling and the tree/flat sorters
pub mod sorting;

/// Thread assembly from parent-linked comments
pub mod thread;

pub use colloquy_model::{
    Comment, CommentNode, CommentTree, Direction, InvalidDirectionError,
};
pub use sorting::*;
