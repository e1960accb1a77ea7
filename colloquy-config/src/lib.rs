//! Shared configuration library for Colloquy.
//!
//! This crate loads the sorting alias table (which user-facing options map
//! to which strategy and direction), validates it, and turns it into a
//! [`SortingRegistry`](colloquy_core::SortingRegistry). The `colloquy-sort`
//! binary is built on top of it.

pub mod models;
pub mod validation;

pub use models::sorting::{SorterSpec, SortingConfig, SortingConfigSource};
pub use validation::SortingConfigError;
