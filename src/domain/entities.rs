//! Domain entities: entry names and how they are classified

use crate::domain::DomainError;

/// Dotted names that are kept in a layout even though they look like files.
pub const SPECIAL_FILES: [&str; 4] = ["README.md", "LICENSE", "requirements.txt", ".gitignore"];

/// The literal parent-reference token, kept as a directory-like name.
pub const PARENT_TOKEN: &str = "..";

/// Path separator used for entry paths such as `Docs/API`.
pub const PATH_SEPARATOR: char = '/';

/// What a name in a layout stands for.
///
/// Classification is purely lexical; nothing here looks at the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// No dot in the name. Nests children and is created on disk.
    Directory,
    /// Starts with a dot (hidden-directory convention) or is `..`.
    /// Nests children but is never created on disk.
    Hidden,
    /// One of [`SPECIAL_FILES`]. Always a leaf.
    SpecialFile,
    /// Any other dotted name. Dropped when parsing.
    File,
}

impl EntryKind {
    pub fn of(name: &str) -> Self {
        if is_special_file(name) {
            EntryKind::SpecialFile
        } else if !name.contains('.') {
            EntryKind::Directory
        } else if name.starts_with('.') {
            // covers `..` as well
            EntryKind::Hidden
        } else {
            EntryKind::File
        }
    }

    /// Whether the parser keeps entries of this kind.
    pub fn is_retained(self) -> bool {
        !matches!(self, EntryKind::File)
    }

    /// Whether entries of this kind may own children.
    pub fn can_nest(self) -> bool {
        matches!(self, EntryKind::Directory | EntryKind::Hidden)
    }

    /// Whether the layout service creates a directory for this kind.
    pub fn is_materialized(self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

pub fn is_special_file(name: &str) -> bool {
    SPECIAL_FILES.contains(&name)
}

/// Validate a name that is about to be added to a tree by an edit.
///
/// Parsed names are never validated; the parser is permissive.
pub fn validate_entry_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason| {
        Err(DomainError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.trim().is_empty() {
        return invalid("name is empty");
    }
    if name != name.trim() {
        return invalid("name has surrounding whitespace");
    }
    if name == "." {
        return invalid("'.' is the root marker");
    }
    if name.contains(PATH_SEPARATOR) || name.contains('\\') {
        return invalid("name contains a path separator");
    }
    if name.chars().any(char::is_control) {
        return invalid("name contains a control character");
    }
    if EntryKind::of(name) == EntryKind::File {
        return invalid("plain file names are not part of a layout");
    }
    Ok(())
}

/// Split an entry path like `Docs/API` into its segments.
///
/// Empty segments are ignored, so `/Docs//API/` is the same path.
pub fn split_entry_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Expand environment variables and tilde in a string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Unknown variables leave the input untouched.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
