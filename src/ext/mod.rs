//! Extending standard functions and structures.

pub mod fmt;
pub mod sys;
pub mod rand;
