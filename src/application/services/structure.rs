//! Structure text service
//!
//! Loads layouts from structure files or the configured default, writes them
//! back in canonical form and applies edits to structure files.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::codec;
use crate::domain::{DirectoryTree, DomainError};
use crate::infrastructure::traits::FileSystem;

/// A single change to a layout, as issued by `treeplan edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureEdit {
    /// Add leaf `name` under `parent` (empty parent = top level)
    Add { parent: String, name: String },
    /// Remove the entry at `path` with everything below it
    Remove { path: String },
    /// Rename the entry at `path`, keeping its children
    Rename { path: String, new_name: String },
}

impl StructureEdit {
    pub fn apply(&self, tree: &mut DirectoryTree) -> Result<(), DomainError> {
        match self {
            StructureEdit::Add { parent, name } => tree.add(parent, name),
            StructureEdit::Remove { path } => tree.remove(path).map(|_| ()),
            StructureEdit::Rename { path, new_name } => tree.rename(path, new_name),
        }
    }
}

/// Structure file service.
pub struct StructureService {
    fs: Arc<dyn FileSystem>,
    default_structure: String,
}

impl StructureService {
    /// Create a new structure service.
    ///
    /// # Arguments
    /// * `fs` - Filesystem abstraction
    /// * `settings` - Source of the default structure text
    pub fn new(fs: Arc<dyn FileSystem>, settings: &Settings) -> Self {
        Self {
            fs,
            default_structure: settings.default_structure.clone(),
        }
    }

    /// Parse a structure file.
    #[instrument(level = "debug", skip(self))]
    pub fn load_file(&self, path: &Path) -> ApplicationResult<DirectoryTree> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::StructureNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read structure file", path)?;
        let tree = codec::parse(&content);
        debug!(
            "load_file: path={}, entries={}",
            path.display(),
            tree.total_entries()
        );
        Ok(tree)
    }

    pub fn load_text(&self, text: &str) -> DirectoryTree {
        codec::parse(text)
    }

    /// Parse the configured default structure.
    pub fn load_default(&self) -> DirectoryTree {
        codec::parse(&self.default_structure)
    }

    /// Parse `path` when given, otherwise the configured default.
    pub fn load_or_default(&self, path: Option<&Path>) -> ApplicationResult<DirectoryTree> {
        match path {
            Some(path) => self.load_file(path),
            None => {
                debug!("load_or_default: using configured default structure");
                Ok(self.load_default())
            }
        }
    }

    /// Canonical text of a tree: root marker, sorted drawing, trailing newline.
    pub fn canonical_text(tree: &DirectoryTree) -> String {
        codec::render(tree)
    }

    /// Write a tree to `path` in canonical form, replacing the file atomically.
    pub fn save(&self, path: &Path, tree: &DirectoryTree) -> ApplicationResult<()> {
        self.fs
            .write_atomic(path, &Self::canonical_text(tree))
            .with_path_context("write structure file", path)?;
        debug!("save: path={}", path.display());
        Ok(())
    }

    /// Whether the file at `path` is already in canonical form.
    pub fn check(&self, path: &Path) -> ApplicationResult<bool> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::StructureNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read structure file", path)?;
        Ok(codec::is_canonical(&content))
    }

    /// Rewrite a structure file canonically.
    ///
    /// Returns `true` if the file content changed.
    pub fn format_file(&self, path: &Path) -> ApplicationResult<bool> {
        if self.check(path)? {
            debug!("format_file: already canonical: {}", path.display());
            return Ok(false);
        }
        let tree = self.load_file(path)?;
        self.save(path, &tree)?;
        info!("Formatted {}", path.display());
        Ok(true)
    }

    /// Load, edit and save a structure file. Nothing is written if the edit fails.
    pub fn edit(&self, path: &Path, edit: &StructureEdit) -> ApplicationResult<DirectoryTree> {
        let mut tree = self.load_file(path)?;
        edit.apply(&mut tree)?;
        self.save(path, &tree)?;
        info!("Applied {:?} to {}", edit, path.display());
        Ok(tree)
    }
}
