//! Core data model definitions shared across Colloquy crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod comment;
pub mod direction;
pub mod error;
pub mod ids;
pub mod tree;

// Intentionally curated re-exports for downstream consumers.
pub use comment::{Comment, CommentState};
pub use direction::Direction;
pub use error::InvalidDirectionError;
pub use ids::{CommentID, ThreadID};
pub use tree::{CommentNode, CommentTree, FlatEntry, ThreadEntry};
