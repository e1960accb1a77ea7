//! Configuration models.

pub mod sorting;
