//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait
//! but are themselves concrete structs, not traits.

mod layout;
mod structure;

pub use layout::{LayoutPlan, LayoutReport, LayoutService, ScanOptions};
pub use structure::{StructureEdit, StructureService};
