//! Sorting module for threaded comments
//!
//! This module provides:
//! - Capability traits exposing the attributes strategies compare
//! - The comparator strategy trait and built-in strategies
//! - The direction-aware sorter with tree and flat sorting
//! - An alias registry for user-facing sort options

pub mod directed;
pub mod error;
pub mod flat;
pub mod impls;
pub mod registry;
pub mod strategy;
pub mod traits;
pub mod tree;
pub mod utils;


pub use directed::*;
pub use error::*;
pub use registry::*;
pub use strategy::*;
pub use traits::*;
