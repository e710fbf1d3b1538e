//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Parse, format, edit and materialize ASCII directory-tree layouts
#[derive(Parser, Debug)]
#[command(name = "treeplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Working directory for local config and relative paths (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse tree text and print it in canonical form
    Parse {
        /// Structure file ('-' or omitted: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a structure file in canonical form
    Fmt {
        /// Structure file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only report whether the file is canonical
        #[arg(long)]
        check: bool,
    },

    /// Show the configured default structure
    Show {
        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the directories `apply` would create
    Plan {
        /// Target directory
        #[arg(value_hint = ValueHint::DirPath)]
        target: PathBuf,
        /// Structure file (default: configured default structure)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        structure: Option<PathBuf>,
    },

    /// Create the layout's directories below a target directory
    Apply {
        /// Target directory (created if missing)
        #[arg(value_hint = ValueHint::DirPath)]
        target: PathBuf,
        /// Structure file (default: configured default structure)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        structure: Option<PathBuf>,
    },

    /// Create a new project directory holding the layout
    New {
        /// Project name
        name: String,
        /// Parent directory (default: projects_dir from config)
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        parent: Option<PathBuf>,
        /// Structure file (default: configured default structure)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        structure: Option<PathBuf>,
    },

    /// Print the layout of an existing directory
    Scan {
        /// Directory to scan
        #[arg(value_hint = ValueHint::DirPath)]
        root: PathBuf,
        /// Include hidden directories
        #[arg(long)]
        hidden: bool,
        /// Levels to descend
        #[arg(long)]
        max_depth: Option<usize>,
        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a structure file in place
    Edit {
        #[command(subcommand)]
        command: EditCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum EditCommands {
    /// Add an entry
    Add {
        /// Structure file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry path, e.g. Docs/Guides
        path: String,
    },

    /// Remove an entry and everything below it
    Remove {
        /// Structure file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry path
        path: String,
    },

    /// Rename an entry, keeping its children
    Rename {
        /// Structure file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Entry path
        path: String,
        /// New name (single segment)
        new_name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,

    /// Create config file from template
    Init {
        /// Create in the working directory instead of the global location
        #[arg(short, long)]
        local: bool,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config file locations
    Path,
}
