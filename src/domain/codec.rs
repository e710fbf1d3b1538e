//! Tree text codec
//!
//! Converts the drawing produced by `tree`-style listings into a
//! [`DirectoryTree`] and back:
//!
//! ```text
//! .
//! ├── Core
//! ├── Docs
//! │   └── API
//! ├── README.md
//! └── Utils
//! ```
//!
//! Parsing never fails. Lines without a usable name are skipped, and plain
//! indented text works as well as box glyphs.
//!
//! Nesting is resolved with a stack of `(indent, name)` frames. A line pops
//! every frame whose indent is at least its own, then becomes the new top.
//! Deeper lines therefore descend, equal lines become siblings, and shallower
//! lines return to the closest ancestor with a smaller indent, whatever the
//! indent width of the input.

use std::fmt;

use tracing::trace;

use crate::domain::entities::EntryKind;
use crate::domain::DirectoryTree;

/// Connector for every entry but the last at its level.
pub const BRANCH: &str = "├── ";
/// Connector for the last entry at its level.
pub const LAST_BRANCH: &str = "└── ";
/// Guide below a non-last entry.
pub const PIPE_GUIDE: &str = "│   ";
/// Guide below the last entry.
pub const SPACE_GUIDE: &str = "    ";
/// Conventional "current directory" line at the top of a listing.
pub const ROOT_MARKER: &str = ".";

const VERTICAL: char = '│';
const BRANCH_GLYPHS: [&str; 2] = ["├──", "└──"];

/// Indent and name extracted from one line of tree text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// Character width of the guide in front of the connector (or name).
    pub indent: usize,
    pub name: &'a str,
}

/// Split a line into the width of its guide and the rest.
///
/// The guide is the leading run of whitespace and vertical bars; it covers
/// both the `│   ` and the blank continuation tokens.
fn split_guide(line: &str) -> (usize, &str) {
    let rest = line.trim_start_matches(|c: char| c.is_whitespace() || c == VERTICAL);
    let guide = &line[..line.len() - rest.len()];
    (guide.chars().count(), rest)
}

/// Connector grammar: guide, `├── ` or `└── `, name.
///
/// Any whitespace after the dashes is accepted, since some `tree` builds emit
/// a no-break space there.
pub fn classify_connector(line: &str) -> Option<ClassifiedLine<'_>> {
    let (indent, rest) = split_guide(line);
    let after = BRANCH_GLYPHS
        .iter()
        .find_map(|glyph| rest.strip_prefix(*glyph))?;
    if !after.is_empty() && !after.starts_with(char::is_whitespace) {
        return None;
    }
    Some(ClassifiedLine {
        indent,
        name: after.trim(),
    })
}

/// Plain grammar: guide, name. Matches any line.
pub fn classify_plain(line: &str) -> Option<ClassifiedLine<'_>> {
    let (indent, rest) = split_guide(line);
    Some(ClassifiedLine {
        indent,
        name: rest.trim(),
    })
}

/// Classify a line, trying the connector grammar before the plain one.
///
/// Returns `None` when the line carries no name, e.g. a bare `│`.
pub fn classify_line(line: &str) -> Option<ClassifiedLine<'_>> {
    classify_connector(line)
        .or_else(|| classify_plain(line))
        .filter(|classified| !classified.name.is_empty())
}

/// Lines that take part in parsing: trailing whitespace removed, blank
/// lines and root markers dropped.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.trim()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && line.trim() != ROOT_MARKER)
}

struct Frame<'a> {
    indent: usize,
    name: &'a str,
}

/// Parse tree text into a [`DirectoryTree`]. Never fails.
///
/// Plain file names (dotted, not hidden, not `..`) are dropped. The special
/// files from [`SPECIAL_FILES`](crate::domain::entities::SPECIAL_FILES) are
/// kept as leaves under the entry their indent points at; they never become
/// parents themselves.
pub fn parse(text: &str) -> DirectoryTree {
    let mut tree = DirectoryTree::new();
    let mut frames: Vec<Frame<'_>> = Vec::new();

    for line in content_lines(text) {
        let Some(ClassifiedLine { indent, name }) = classify_line(line) else {
            trace!("parse: skip nameless line={:?}", line);
            continue;
        };

        let kind = EntryKind::of(name);
        if !kind.is_retained() {
            trace!("parse: drop file name={}", name);
            continue;
        }

        if kind.can_nest() {
            while frames.last().is_some_and(|top| top.indent >= indent) {
                frames.pop();
            }
            frames.push(Frame { indent, name });
            tree.insert_path(frames.iter().map(|f| f.name));
        } else {
            // leaf: attach under the deepest shallower frame, never push
            let depth = frames.iter().take_while(|f| f.indent < indent).count();
            tree.insert_path(frames[..depth].iter().map(|f| f.name))
                .insert(name);
        }
    }

    trace!("parse: entries={}", tree.total_entries());
    tree
}

/// Parse optional text; `None` yields an empty tree.
pub fn parse_opt(text: Option<&str>) -> DirectoryTree {
    text.map(parse).unwrap_or_default()
}

/// Format a tree as drawing lines, siblings in lexicographic order.
///
/// `prefix` is prepended to every line; pass `""` for a top-level listing.
/// The root marker is not emitted, see [`render`] for that.
pub fn format(tree: &DirectoryTree, prefix: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(tree.total_entries());
    format_into(tree, prefix, &mut lines);
    lines
}

fn format_into(tree: &DirectoryTree, prefix: &str, out: &mut Vec<String>) {
    let count = tree.len();
    for (i, (name, child)) in tree.iter().enumerate() {
        let (connector, guide) = if i + 1 == count {
            (LAST_BRANCH, SPACE_GUIDE)
        } else {
            (BRANCH, PIPE_GUIDE)
        };
        out.push(format!("{prefix}{connector}{name}"));
        if !child.is_empty() {
            format_into(child, &format!("{prefix}{guide}"), out);
        }
    }
}

/// Canonical file form: root marker, formatted lines, trailing newline.
pub fn render(tree: &DirectoryTree) -> String {
    let mut text = String::from(ROOT_MARKER);
    text.push('\n');
    for line in format(tree, "") {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

/// Whether `text` is byte-for-byte what [`render`] produces for it.
pub fn is_canonical(text: &str) -> bool {
    render(&parse(text)) == text
}

impl fmt::Display for DirectoryTree {
    /// Formatted lines without root marker, joined by newlines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in format(self, "").iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
