//! Thread assembly: turning parent-linked comments into a [`CommentTree`].
//!
//! [`CommentTree`]: colloquy_model::CommentTree

pub mod assembly;

pub use assembly::{assemble_tree, thread_depth};
