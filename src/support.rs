//! Crate-level utilities shared by models.

pub mod constraint;
pub mod matrix;
pub mod registry;
