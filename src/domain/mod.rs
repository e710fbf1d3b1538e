//! Domain layer: the layout tree and its text form
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod codec;
pub mod entities;
pub mod error;
pub mod tree;

pub use entities::*;
pub use error::DomainError;
pub use tree::DirectoryTree;
