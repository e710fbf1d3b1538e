//! treeplan: directory-tree layouts as text
//!
//! Parses `tree`-style drawings into a [`domain::DirectoryTree`], formats them
//! back canonically, edits them and creates the described directories.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::codec::{format, parse, render};
pub use domain::DirectoryTree;
