//! Tests for LayoutService
//!
//! Materializes layouts into temp directories and scans them back.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use treeplan::application::services::{LayoutService, ScanOptions};
use treeplan::application::ApplicationError;
use treeplan::config::DEFAULT_STRUCTURE;
use treeplan::domain::codec::{format, parse};
use treeplan::domain::DirectoryTree;
use treeplan::infrastructure::traits::RealFileSystem;
use treeplan::util::testing;

fn service() -> LayoutService {
    testing::init_test_setup();
    LayoutService::new(Arc::new(RealFileSystem))
}

// ============================================================
// materialize
// ============================================================

#[test]
fn given_layout_when_materializing_then_only_directories_created() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    let tree = parse(DEFAULT_STRUCTURE);

    // Act
    let report = service().materialize(&root, &tree).expect("materialize");

    // Assert
    assert!(report.root_created);
    assert!(root.join("Docs/API").is_dir());
    assert!(root.join("Core").is_dir());
    assert!(!root.join("README.md").exists(), "special files are not created");
    assert!(!root.join("LICENSE").exists());
    assert_eq!(report.created.len(), 9);
    assert_eq!(report.skipped.len(), 3);
    assert!(report.existing.is_empty());
}

#[test]
fn given_materialized_layout_when_materializing_again_then_all_existing() {
    let temp = TempDir::new().unwrap();
    let tree = DirectoryTree::from_paths(["Core", "Docs/API"]);
    let svc = service();
    svc.materialize(temp.path(), &tree).expect("first run");

    let report = svc.materialize(temp.path(), &tree).expect("second run");

    assert!(!report.root_created);
    assert!(report.created.is_empty());
    assert_eq!(report.existing.len(), 3);
}

#[test]
fn given_root_is_file_when_materializing_then_not_a_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("file");
    fs::write(&root, "x").unwrap();

    let err = service()
        .materialize(&root, &DirectoryTree::from_paths(["Core"]))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotADirectory(p) if p == root));
}

#[test]
fn given_file_in_place_of_directory_when_materializing_then_not_a_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("Core"), "x").unwrap();

    let err = service()
        .materialize(temp.path(), &DirectoryTree::from_paths(["Core/Sub"]))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotADirectory(_)));
}

#[test]
fn given_hidden_and_parent_entries_when_materializing_then_skipped() {
    let temp = TempDir::new().unwrap();
    let tree = DirectoryTree::from_paths([".github/workflows", "..", "src"]);

    let report = service().materialize(temp.path(), &tree).expect("materialize");

    assert_eq!(report.created, vec![temp.path().join("src")]);
    assert!(!temp.path().join(".github").exists());
    assert_eq!(report.skipped.len(), 2);
}

#[test]
fn given_absolute_and_nested_names_when_materializing_then_nothing_outside_root() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    let outside = temp.path().join("outside");
    let mut tree = parse(".\n├── Core\n└── a/b\n");
    // temp paths contain a dot, which the parser would drop as a file name
    tree.insert(format!("{}/escaped", outside.display()));

    // Act
    let report = service().materialize(&root, &tree).expect("materialize");

    // Assert
    assert_eq!(report.created, vec![root.join("Core")]);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped.iter().all(|p| p.starts_with(&root)), "{:?}", report.skipped);
    assert!(!outside.exists(), "absolute entry escaped the root");
    assert!(!root.join("a").exists());
}

// ============================================================
// create_project
// ============================================================

#[test]
fn given_new_name_when_creating_project_then_directory_with_layout() {
    let temp = TempDir::new().unwrap();
    let tree = DirectoryTree::from_paths(["Core", "Tests"]);

    let report = service()
        .create_project(temp.path(), "demo.app", &tree)
        .expect("create");

    assert_eq!(report.root, temp.path().join("demo.app"));
    assert!(temp.path().join("demo.app/Core").is_dir());
    assert!(temp.path().join("demo.app/Tests").is_dir());
}

#[test]
fn given_existing_project_when_creating_then_project_exists() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("demo")).unwrap();

    let err = service()
        .create_project(temp.path(), "demo", &DirectoryTree::new())
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ProjectExists(_)));
}

#[test]
fn given_name_with_separator_when_creating_project_then_invalid_name() {
    let temp = TempDir::new().unwrap();
    let err = service()
        .create_project(temp.path(), "a/b", &DirectoryTree::new())
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)));
}

// ============================================================
// scan
// ============================================================

#[test]
fn given_directory_when_scanning_then_dirs_and_special_files_only() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/bin")).unwrap();
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::create_dir_all(root.join("build.out/tmp")).unwrap();
    fs::write(root.join("README.md"), "# demo").unwrap();
    fs::write(root.join(".gitignore"), "target").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src/LICENSE"), "BSD").unwrap();

    // Act
    let tree = service().scan(root, ScanOptions::default()).expect("scan");

    // Assert
    assert_eq!(
        tree,
        DirectoryTree::from_paths([".gitignore", "README.md", "src/LICENSE", "src/bin"])
    );
}

#[test]
fn given_hidden_option_when_scanning_then_hidden_dirs_included() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".config/nvim")).unwrap();

    let options = ScanOptions {
        include_hidden: true,
        max_depth: None,
    };
    let tree = service().scan(temp.path(), options).expect("scan");

    assert_eq!(tree, DirectoryTree::from_paths([".config/nvim"]));
}

#[test]
fn given_max_depth_when_scanning_then_deeper_levels_ignored() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("a/b/c")).unwrap();

    let options = ScanOptions {
        include_hidden: false,
        max_depth: Some(2),
    };
    let tree = service().scan(temp.path(), options).expect("scan");

    assert_eq!(tree, DirectoryTree::from_paths(["a/b"]));
}

#[test]
fn given_file_when_scanning_then_not_a_directory() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("f");
    fs::write(&file, "").unwrap();

    let err = service().scan(&file, ScanOptions::default()).unwrap_err();

    assert!(matches!(err, ApplicationError::NotADirectory(_)));
}

#[test]
fn given_materialized_layout_when_scanning_then_directory_part_reproduced() {
    let temp = TempDir::new().unwrap();
    let tree = parse(DEFAULT_STRUCTURE);
    let svc = service();
    svc.materialize(temp.path(), &tree).expect("materialize");

    let scanned = svc.scan(temp.path(), ScanOptions::default()).expect("scan");

    let mut expected = tree.clone();
    for file in ["LICENSE", "README.md", "requirements.txt"] {
        expected.remove(file).expect("present in default structure");
    }
    assert_eq!(scanned, expected);
    assert_eq!(parse(&format(&scanned, "").join("\n")), scanned);
}
