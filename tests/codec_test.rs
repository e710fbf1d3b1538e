//! Tests for the tree text codec
//!
//! Covers parsing of box-glyph and plain indented text, file filtering,
//! canonical formatting and stability under reparse.

use rstest::rstest;

use treeplan::config::DEFAULT_STRUCTURE;
use treeplan::domain::codec::{self, format, is_canonical, parse, parse_opt, render};
use treeplan::domain::DirectoryTree;
use treeplan::util::testing;

fn tree(paths: &[&str]) -> DirectoryTree {
    DirectoryTree::from_paths(paths.iter().copied())
}

// ============================================================
// Parse: empty and degenerate input
// ============================================================

#[rstest]
#[case::empty("")]
#[case::whitespace("   \n\t\n")]
#[case::root_marker_only(".")]
#[case::root_marker_and_blanks("\n  .  \n\n")]
#[case::bare_guides("│\n│   \n")]
fn given_text_without_names_when_parsing_then_empty(#[case] text: &str) {
    testing::init_test_setup();
    assert!(parse(text).is_empty());
}

#[test]
fn given_none_when_parsing_then_empty() {
    assert!(parse_opt(None).is_empty());
    assert_eq!(parse_opt(Some(".\n├── Core")), tree(&["Core"]));
}

// ============================================================
// Parse: nesting
// ============================================================

#[test]
fn given_root_marker_when_parsing_then_marker_ignored() {
    assert_eq!(parse(".\n├── Core"), tree(&["Core"]));
}

#[test]
fn given_connector_tree_when_parsing_then_nested_mapping() {
    // Arrange
    let text = ".\n├── Core\n├── Docs\n│   └── API\n└── Utils";

    // Act
    let parsed = parse(text);

    // Assert
    assert_eq!(parsed, tree(&["Core", "Docs/API", "Utils"]));
    assert!(parsed.get("Docs").and_then(|d| d.get("API")).is_some());
    assert!(parsed.get("Core").is_some_and(DirectoryTree::is_empty));
}

#[test]
fn given_deep_tree_when_parsing_then_returns_to_right_ancestor() {
    let text = "\
.
├── A
│   ├── B
│   │   └── C
│   └── D
└── E
    └── F
";
    assert_eq!(parse(text), tree(&["A/B/C", "A/D", "E/F"]));
}

#[test]
fn given_consecutive_lines_at_same_indent_when_parsing_then_siblings() {
    let parsed = parse("├── Alpha\n├── Beta\n└── Gamma");
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed, tree(&["Alpha", "Beta", "Gamma"]));
}

#[test]
fn given_plain_indented_text_when_parsing_then_nested_via_fallback() {
    assert_eq!(parse("Core\n  SubCore"), tree(&["Core/SubCore"]));
}

#[test]
fn given_irregular_indent_when_parsing_then_closest_smaller_indent_is_parent() {
    let text = "Core\n    Deep\n  Mid\nTop";
    assert_eq!(parse(text), tree(&["Core/Deep", "Core/Mid", "Top"]));
}

#[test]
fn given_mixed_glyph_and_plain_lines_when_parsing_then_indent_is_guide_width() {
    let text = "├── Src\n    Lib\n└── Docs";
    assert_eq!(parse(text), tree(&["Src/Lib", "Docs"]));
}

#[test]
fn given_tabs_and_crlf_when_parsing_then_treated_as_whitespace() {
    let text = "Core\r\n\tSub\r\nUtils\r\n";
    assert_eq!(parse(text), tree(&["Core/Sub", "Utils"]));
}

#[test]
fn given_duplicate_name_when_parsing_then_first_children_preserved() {
    let text = "\
├── A
│   └── B
├── A
│   └── C
└── D
";
    let parsed = parse(text);

    let a = parsed.get("A").expect("A present");
    assert!(a.contains("B"), "children of first occurrence must survive");
    assert!(a.contains("C"));
    assert_eq!(parsed.len(), 2);
}

// ============================================================
// Parse: file filtering and special files
// ============================================================

#[test]
fn given_plain_file_when_parsing_then_dropped() {
    assert_eq!(parse(".\n├── main.py\n└── Core"), tree(&["Core"]));
}

#[test]
fn given_special_file_when_parsing_then_kept_as_leaf() {
    assert_eq!(
        parse(".\n├── README.md\n└── Core"),
        tree(&["README.md", "Core"])
    );
}

#[rstest]
#[case("README.md", true)]
#[case("LICENSE", true)]
#[case("requirements.txt", true)]
#[case(".gitignore", true)]
#[case(".github", true)]
#[case("..", true)]
#[case("setup.py", false)]
#[case("notes.txt", false)]
#[case("readme.md", false)]
fn given_top_level_name_when_parsing_then_retained_per_dot_rules(
    #[case] name: &str,
    #[case] retained: bool,
) {
    let parsed = parse(&format!(".\n└── {name}"));
    assert_eq!(parsed.contains(name), retained, "{name}");
}

#[test]
fn given_special_file_inside_subtree_when_parsing_then_nested_by_indent() {
    let text = "\
.
├── Docs
│   ├── API
│   │   └── v1
│   └── README.md
└── LICENSE
";
    assert_eq!(
        parse(text),
        tree(&["Docs/API/v1", "Docs/README.md", "LICENSE"])
    );
}

#[test]
fn given_lines_after_special_file_when_parsing_then_file_never_becomes_parent() {
    let text = "├── README.md\n│   └── Inner\n└── Core";
    let parsed = parse(text);
    assert!(parsed.get("README.md").is_some_and(DirectoryTree::is_empty));
    assert!(parsed.contains("Inner"));
}

#[test]
fn given_hidden_directory_when_parsing_then_it_nests_children() {
    let parsed = parse(".github\n  workflows");
    assert_eq!(parsed, tree(&[".github/workflows"]));
}

#[test]
fn given_default_structure_when_parsing_then_all_entries_present() {
    let parsed = parse(DEFAULT_STRUCTURE);
    assert_eq!(parsed.len(), 11);
    assert_eq!(parsed.total_entries(), 12);
    assert!(parsed.find("Docs/API").is_some());
    assert!(parsed.contains("requirements.txt"));
}

// ============================================================
// Format
// ============================================================

#[test]
fn given_empty_tree_when_formatting_then_no_lines() {
    assert!(format(&DirectoryTree::new(), "").is_empty());
}

#[test]
fn given_unsorted_insertion_when_formatting_then_lexicographic() {
    let mut t = DirectoryTree::new();
    t.insert("Utils");
    t.insert("Core");

    assert_eq!(format(&t, ""), vec!["├── Core", "└── Utils"]);
}

#[test]
fn given_nested_tree_when_formatting_then_guides_follow_last_flag() {
    let t = tree(&["A/B/C", "A/D", "E/F"]);

    let lines = format(&t, "");

    assert_eq!(
        lines,
        vec![
            "├── A",
            "│   ├── B",
            "│   │   └── C",
            "│   └── D",
            "└── E",
            "    └── F",
        ]
    );
}

#[test]
fn given_prefix_when_formatting_then_every_line_prefixed() {
    let lines = format(&tree(&["X/Y"]), ">> ");
    assert_eq!(lines, vec![">> └── X", ">>     └── Y"]);
}

#[test]
fn given_canonical_example_when_rendering_then_byte_identical() {
    let text = "\
.
├── Core
├── Docs
│   └── API
├── LICENSE
├── README.md
└── Utils
";
    assert_eq!(render(&parse(text)), text);
    assert!(is_canonical(text));
}

#[test]
fn given_uppercase_and_lowercase_names_when_formatting_then_code_point_order() {
    let lines = format(&tree(&["beta", "Alpha", "Zeta"]), "");
    assert_eq!(lines, vec!["├── Alpha", "├── Zeta", "└── beta"]);
}

#[test]
fn given_tree_when_displayed_then_lines_joined_without_trailing_newline() {
    assert_eq!(tree(&["A", "B"]).to_string(), "├── A\n└── B");
}

#[test]
fn given_unsorted_text_when_checking_canonical_then_false() {
    assert!(!is_canonical(".\n├── Utils\n└── Core\n"));
    assert!(!is_canonical("├── Core\n└── Utils\n"), "root marker missing");
}

/// An independent renderer must draw the same tree lines.
#[test]
fn given_tree_when_formatting_then_matches_termtree_rendering() {
    fn to_termtree(label: &str, t: &DirectoryTree) -> termtree::Tree<String> {
        termtree::Tree::new(label.to_string())
            .with_leaves(t.iter().map(|(name, child)| to_termtree(name, child)))
    }

    let t = parse(DEFAULT_STRUCTURE);
    let oracle: Vec<String> = to_termtree(".", &t)
        .to_string()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect();

    assert_eq!(codec::format(&t, ""), oracle);
}

// ============================================================
// Round trip
// ============================================================

#[rstest]
#[case::example(".\n├── Core\n├── Docs\n│   └── API\n└── Utils")]
#[case::plain("Core\n  SubCore\n    Leaf\n  Other\nTop")]
#[case::irregular("a\n       b\n   c\n d\ne")]
#[case::deep_last_branch("└── A\n    └── B\n        └── C\n            └── D")]
#[case::specials("├── Docs\n│   └── README.md\n├── .gitignore\n└── src\n    └── main.rs")]
#[case::default(DEFAULT_STRUCTURE)]
fn given_parsed_tree_when_formatting_and_reparsing_then_identical(#[case] text: &str) {
    // Arrange
    let first = parse(text);

    // Act
    let reparsed = parse(&format(&first, "").join("\n"));

    // Assert
    assert_eq!(reparsed, first);
    assert_eq!(parse(&render(&first)), first);
}
