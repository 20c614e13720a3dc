//! Core types for inventory analysis

mod vm;
mod host;
mod summary;

pub use vm::*;
pub use host::*;
pub use summary::*;
