//! Layout service: turns a `DirectoryTree` into directories on disk and back
//!
//! Only entries whose name contains no dot become directories. Special files,
//! hidden names and `..` stay in the tree but are reported as skipped. So are
//! names that are not a single plain path segment (`/abs`, `a/b`), since
//! joining them would leave the root.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{DirectoryTree, DomainError, EntryKind, PARENT_TOKEN};
use crate::infrastructure::traits::FileSystem;

/// Directories a layout would create below a root, in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    /// Entries that are part of the tree but never created
    pub skipped: Vec<PathBuf>,
}

/// Outcome of materializing a layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub root: PathBuf,
    pub root_created: bool,
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Options for [`LayoutService::scan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Include hidden directories such as `.github`
    pub include_hidden: bool,
    /// Levels below the root to descend; `None` = unlimited
    pub max_depth: Option<usize>,
}

/// Layout service.
pub struct LayoutService {
    fs: Arc<dyn FileSystem>,
}

impl LayoutService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Compute which directories `materialize` would create. Touches nothing.
    pub fn plan(root: &Path, tree: &DirectoryTree) -> LayoutPlan {
        let mut plan = LayoutPlan {
            root: root.to_path_buf(),
            ..LayoutPlan::default()
        };
        collect_plan(root, tree, &mut plan);
        plan
    }

    /// Create the directory part of `tree` below `root`.
    ///
    /// `root` is created if missing. Directories that already exist are
    /// reported, not treated as errors, so running twice is harmless.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn materialize(&self, root: &Path, tree: &DirectoryTree) -> ApplicationResult<LayoutReport> {
        let plan = Self::plan(root, tree);
        let mut report = LayoutReport {
            root: plan.root.clone(),
            skipped: plan.skipped,
            ..LayoutReport::default()
        };

        if self.fs.exists(root) {
            if !self.fs.is_dir(root) {
                return Err(ApplicationError::NotADirectory(root.to_path_buf()));
            }
        } else {
            self.fs
                .create_dir_all(root)
                .with_path_context("create root directory", root)?;
            report.root_created = true;
        }

        for dir in plan.directories {
            if self.fs.is_dir(&dir) {
                debug!("materialize: exists: {}", dir.display());
                report.existing.push(dir);
            } else if self.fs.exists(&dir) {
                return Err(ApplicationError::NotADirectory(dir));
            } else {
                self.fs
                    .create_dir_all(&dir)
                    .with_path_context("create directory", &dir)?;
                debug!("materialize: created: {}", dir.display());
                report.created.push(dir);
            }
        }

        info!(
            "Materialized {}: created={}, existing={}, skipped={}",
            root.display(),
            report.created.len(),
            report.existing.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Create a new project directory `parent/name` holding the layout.
    ///
    /// # Errors
    /// `ProjectExists` if anything is already at `parent/name`.
    pub fn create_project(
        &self,
        parent: &Path,
        name: &str,
        tree: &DirectoryTree,
    ) -> ApplicationResult<LayoutReport> {
        validate_project_name(name)?;
        let project_dir = parent.join(name);
        if self.fs.exists(&project_dir) {
            return Err(ApplicationError::ProjectExists(project_dir));
        }
        debug!("create_project: dir={}", project_dir.display());
        self.materialize(&project_dir, tree)
    }

    /// Build a layout from an existing directory.
    ///
    /// Directories with dot-free names are kept (hidden ones on request),
    /// together with special files. Anything below a dropped directory is
    /// dropped as well.
    #[instrument(level = "debug", skip(self))]
    pub fn scan(&self, root: &Path, options: ScanOptions) -> ApplicationResult<DirectoryTree> {
        if !self.fs.is_dir(root) {
            return Err(ApplicationError::NotADirectory(root.to_path_buf()));
        }
        let entries = self
            .fs
            .walk(root, options.max_depth)
            .with_path_context("scan directory", root)?;

        let mut tree = DirectoryTree::new();
        for entry in entries {
            let names: Option<Vec<&str>> = entry
                .relative
                .components()
                .map(|c| c.as_os_str().to_str())
                .collect();
            let Some(names) = names else {
                debug!("scan: skip non-UTF-8 path: {}", entry.relative.display());
                continue;
            };
            let Some((leaf, parents)) = names.split_last() else {
                continue;
            };
            if !parents.iter().all(|name| keeps_directory(name, options)) {
                continue;
            }
            let keep = if entry.is_dir {
                keeps_directory(leaf, options)
            } else {
                EntryKind::of(leaf) == EntryKind::SpecialFile
            };
            if keep {
                tree.insert_path(names.iter().copied());
            }
        }

        debug!(
            "scan: root={}, entries={}",
            root.display(),
            tree.total_entries()
        );
        Ok(tree)
    }
}

fn collect_plan(dir: &Path, tree: &DirectoryTree, plan: &mut LayoutPlan) {
    for (name, child) in tree.iter() {
        if !is_single_segment(name) {
            debug!("plan: skip non-segment name={:?}", name);
            plan.skipped.push(dir.join(name.trim_start_matches(['/', '\\'])));
            continue;
        }
        let path = dir.join(name);
        if EntryKind::of(name).is_materialized() {
            plan.directories.push(path.clone());
            collect_plan(&path, child, plan);
        } else {
            plan.skipped.push(path);
        }
    }
}

/// Whether `name` is exactly one normal path component.
fn is_single_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

fn keeps_directory(name: &str, options: ScanOptions) -> bool {
    match EntryKind::of(name) {
        EntryKind::Directory => true,
        EntryKind::Hidden => options.include_hidden && name != PARENT_TOKEN,
        EntryKind::SpecialFile | EntryKind::File => false,
    }
}

/// Project names may contain dots, but must be a single plain path segment.
fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name == "." || name == PARENT_TOKEN {
        Some("name refers to an existing directory")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(DomainError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
