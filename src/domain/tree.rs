//! Hierarchical name mapping describing a project layout
//!
//! A `DirectoryTree` is a mapping from entry name to the subtree below it.
//! The root of a layout is itself a `DirectoryTree`; a leaf is an entry whose
//! subtree is empty. Each subtree is owned by exactly one parent map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{split_entry_path, validate_entry_name, EntryKind};
use crate::domain::DomainError;

/// Nested name mapping. Serializes as `{"Docs": {"API": {}}}`.
///
/// Entries are kept in a `BTreeMap`, so iteration is always lexicographic.
/// Insertion order is not preserved and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryTree {
    entries: BTreeMap<String, DirectoryTree>,
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `/`-separated entry paths.
    ///
    /// Intermediate segments are created as needed, exactly like parsed lines.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for path in paths {
            tree.insert_path(split_entry_path(path.as_ref()));
        }
        tree
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries at every level.
    pub fn total_entries(&self) -> usize {
        self.entries
            .values()
            .map(|child| 1 + child.total_entries())
            .sum()
    }

    /// Number of nesting levels; an empty tree has depth 0.
    pub fn depth(&self) -> usize {
        self.entries
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Direct child by name.
    pub fn get(&self, name: &str) -> Option<&DirectoryTree> {
        self.entries.get(name)
    }

    /// Entries in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectoryTree)> {
        self.entries.iter().map(|(name, child)| (name.as_str(), child))
    }

    /// Get-or-insert a direct child.
    ///
    /// An existing entry keeps its children; repeated insertion never clears them.
    pub fn insert(&mut self, name: impl Into<String>) -> &mut DirectoryTree {
        self.entries.entry(name.into()).or_default()
    }

    /// Get-or-insert every segment of a path, returning the deepest subtree.
    pub fn insert_path<I, S>(&mut self, segments: I) -> &mut DirectoryTree
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments
            .into_iter()
            .fold(self, |node, segment| node.insert(segment))
    }

    /// Subtree at a `/`-separated path. The empty path is the tree itself.
    pub fn find(&self, path: &str) -> Option<&DirectoryTree> {
        split_entry_path(path)
            .into_iter()
            .try_fold(self, |node, segment| node.entries.get(segment))
    }

    fn find_mut(&mut self, segments: &[&str]) -> Option<&mut DirectoryTree> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.entries.get_mut(*segment))
    }

    /// Add a new leaf `name` under the entry at `parent_path`.
    ///
    /// Unlike [`insert`](Self::insert) this rejects duplicates, which is what an
    /// interactive editor wants.
    pub fn add(&mut self, parent_path: &str, name: &str) -> Result<(), DomainError> {
        validate_entry_name(name)?;
        let segments = split_entry_path(parent_path);
        if let Some(last) = segments.last() {
            if !EntryKind::of(last).can_nest() {
                return Err(DomainError::NotNestable(segments.join("/")));
            }
        }
        let parent = self
            .find_mut(&segments)
            .ok_or_else(|| DomainError::EntryNotFound(segments.join("/")))?;
        if parent.contains(name) {
            return Err(DomainError::EntryExists(join_path(&segments, name)));
        }
        parent.entries.insert(name.to_string(), DirectoryTree::new());
        Ok(())
    }

    /// Remove the entry at `path` together with its subtree.
    pub fn remove(&mut self, path: &str) -> Result<DirectoryTree, DomainError> {
        let segments = split_entry_path(path);
        let (name, parents) = segments
            .split_last()
            .ok_or_else(|| DomainError::EntryNotFound(path.to_string()))?;
        self.find_mut(parents)
            .and_then(|parent| parent.entries.remove(*name))
            .ok_or_else(|| DomainError::EntryNotFound(segments.join("/")))
    }

    /// Rename the entry at `path`, keeping its children.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<(), DomainError> {
        validate_entry_name(new_name)?;
        let segments = split_entry_path(path);
        let (name, parents) = segments
            .split_last()
            .ok_or_else(|| DomainError::EntryNotFound(path.to_string()))?;
        let parent = self
            .find_mut(parents)
            .ok_or_else(|| DomainError::EntryNotFound(segments.join("/")))?;

        if !parent.contains(name) {
            return Err(DomainError::EntryNotFound(segments.join("/")));
        }
        if *name == new_name {
            return Ok(());
        }
        if parent.contains(new_name) {
            return Err(DomainError::EntryExists(join_path(parents, new_name)));
        }
        let subtree = parent.entries.remove(*name).unwrap_or_default();
        if !subtree.is_empty() && !EntryKind::of(new_name).can_nest() {
            parent.entries.insert((*name).to_string(), subtree);
            return Err(DomainError::NotNestable(join_path(parents, new_name)));
        }
        parent.entries.insert(new_name.to_string(), subtree);
        Ok(())
    }

    /// Every entry path in depth-first pre-order.
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.total_entries());
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, child) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            out.push(path.clone());
            child.collect_paths(&path, out);
        }
    }
}

fn join_path(parents: &[&str], name: &str) -> String {
    parents
        .iter()
        .copied()
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join("/")
}

impl<S: Into<String>> FromIterator<(S, DirectoryTree)> for DirectoryTree {
    fn from_iter<T: IntoIterator<Item = (S, DirectoryTree)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, child)| (name.into(), child))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DirectoryTree {
    type Item = (&'a String, &'a DirectoryTree);
    type IntoIter = std::collections::btree_map::Iter<'a, String, DirectoryTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
