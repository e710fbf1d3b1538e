//! Infrastructure layer: the real filesystem and service wiring
//!
//! `RealFileSystem` backs the layout and structure services in production.

pub mod di;
pub mod error;
pub mod traits;

pub use error::InfraError;
