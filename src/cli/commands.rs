//! Command dispatch: maps parsed arguments onto services

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::debug;

use crate::application::services::{
    LayoutPlan, LayoutReport, LayoutService, ScanOptions, StructureEdit, StructureService,
};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, EditCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::codec;
use crate::domain::{split_entry_path, DirectoryTree};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the command selected on the command line.
pub fn execute(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see 'treeplan --help'".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let work_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("get current directory", e))?,
    };
    debug!("execute: work_dir={}", work_dir.display());

    let settings = Settings::load(Some(&work_dir))?;
    let container = ServiceContainer::new(settings);
    let ctx = Context {
        container,
        work_dir,
    };

    match command {
        Commands::Parse { file, json } => ctx.parse(file.as_deref(), *json),
        Commands::Fmt { file, check } => ctx.fmt(file, *check),
        Commands::Show { json } => {
            let tree = ctx.structures().load_default();
            print_tree(&tree, *json)
        }
        Commands::Plan { target, structure } => ctx.plan(target, structure.as_deref()),
        Commands::Apply { target, structure } => ctx.apply(target, structure.as_deref()),
        Commands::New {
            name,
            parent,
            structure,
        } => ctx.new_project(name, parent.as_deref(), structure.as_deref()),
        Commands::Scan {
            root,
            hidden,
            max_depth,
            json,
        } => ctx.scan(
            root,
            ScanOptions {
                include_hidden: *hidden,
                max_depth: *max_depth,
            },
            *json,
        ),
        Commands::Edit { command } => ctx.edit(command),
        Commands::Config { command } => ctx.config(command),
        Commands::Completion { .. } => Ok(()),
    }
}

struct Context {
    container: ServiceContainer,
    work_dir: PathBuf,
}

impl Context {
    fn structures(&self) -> StructureService {
        self.container.structure_service()
    }

    fn layouts(&self) -> LayoutService {
        self.container.layout_service()
    }

    /// Relative paths are taken relative to the working directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }

    fn load_structure(&self, structure: Option<&Path>) -> CliResult<DirectoryTree> {
        let path = structure.map(|p| self.resolve(p));
        let tree = self.structures().load_or_default(path.as_deref())?;
        if tree.is_empty() {
            output::warning("structure is empty, nothing to create");
        }
        Ok(tree)
    }

    fn parse(&self, file: Option<&Path>, json: bool) -> CliResult<()> {
        let tree = match file {
            Some(path) if path != Path::new("-") => {
                self.structures().load_file(&self.resolve(path))?
            }
            _ => {
                let text = io::read_to_string(io::stdin())
                    .map_err(|e| InfraError::io("read structure from stdin", e))?;
                self.structures().load_text(&text)
            }
        };
        print_tree(&tree, json)
    }

    fn fmt(&self, file: &Path, check: bool) -> CliResult<()> {
        let path = self.resolve(file);
        let service = self.structures();
        if check {
            if !service.check(&path)? {
                return Err(CliError::NotCanonical(path));
            }
            output::success(&format!("{} is canonical", path.display()));
            return Ok(());
        }
        if service.format_file(&path)? {
            output::action("Formatted", &path.display());
        } else {
            output::success(&format!("{} unchanged", path.display()));
        }
        Ok(())
    }

    fn plan(&self, target: &Path, structure: Option<&Path>) -> CliResult<()> {
        let tree = self.load_structure(structure)?;
        let plan = LayoutService::plan(&self.resolve(target), &tree);
        print_plan(&plan);
        Ok(())
    }

    fn apply(&self, target: &Path, structure: Option<&Path>) -> CliResult<()> {
        let tree = self.load_structure(structure)?;
        let report = self.layouts().materialize(&self.resolve(target), &tree)?;
        print_report(&report);
        Ok(())
    }

    fn new_project(
        &self,
        name: &str,
        parent: Option<&Path>,
        structure: Option<&Path>,
    ) -> CliResult<()> {
        let tree = self.load_structure(structure)?;
        let parent = match parent {
            Some(p) => self.resolve(p),
            None => self.container.settings.projects_dir.clone(),
        };
        let report = self.layouts().create_project(&parent, name, &tree)?;
        print_report(&report);
        Ok(())
    }

    fn scan(&self, root: &Path, options: ScanOptions, json: bool) -> CliResult<()> {
        let tree = self.layouts().scan(&self.resolve(root), options)?;
        print_tree(&tree, json)
    }

    fn edit(&self, command: &EditCommands) -> CliResult<()> {
        let (file, edit) = match command {
            EditCommands::Add { file, path } => {
                let segments = split_entry_path(path);
                let Some((name, parents)) = segments.split_last() else {
                    return Err(CliError::InvalidArgs(format!("empty entry path: '{path}'")));
                };
                let edit = StructureEdit::Add {
                    parent: parents.join("/"),
                    name: (*name).to_string(),
                };
                (file, edit)
            }
            EditCommands::Remove { file, path } => {
                (file, StructureEdit::Remove { path: path.clone() })
            }
            EditCommands::Rename {
                file,
                path,
                new_name,
            } => (
                file,
                StructureEdit::Rename {
                    path: path.clone(),
                    new_name: new_name.clone(),
                },
            ),
        };

        let path = self.resolve(file);
        let tree = self.structures().edit(&path, &edit)?;
        output::action("Updated", &path.display());
        output::info(&codec::render(&tree).trim_end());
        Ok(())
    }

    fn config(&self, command: &ConfigCommands) -> CliResult<()> {
        match command {
            ConfigCommands::Show => {
                output::info(&self.container.settings.to_toml()?.trim_end());
            }
            ConfigCommands::Path => {
                let global = global_config_path();
                let local = local_config_path(&self.work_dir);
                match &global {
                    Some(path) => print_config_location("global", path, self.container.fs.exists(path)),
                    None => output::detail("global: (no config directory on this platform)"),
                }
                print_config_location("local", &local, self.container.fs.exists(&local));
            }
            ConfigCommands::Init { local, force } => {
                let path = if *local {
                    local_config_path(&self.work_dir)
                } else {
                    global_config_path().ok_or_else(|| ApplicationError::Config {
                        message: "cannot determine global config directory".to_string(),
                    })?
                };
                if self.container.fs.exists(&path) && !*force {
                    return Err(CliError::Usage(format!(
                        "config already exists: {} (use --force to overwrite)",
                        path.display()
                    )));
                }
                if let Some(dir) = path.parent() {
                    self.container
                        .fs
                        .create_dir_all(dir)
                        .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
                }
                self.container
                    .fs
                    .write(&path, &Settings::template())
                    .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
                output::action("Created", &path.display());
            }
        }
        Ok(())
    }
}

fn print_tree(tree: &DirectoryTree, json: bool) -> CliResult<()> {
    if json {
        let text = serde_json::to_string_pretty(tree).map_err(|e| {
            ApplicationError::OperationFailed {
                context: "serialize layout as JSON".to_string(),
                source: Box::new(e),
            }
        })?;
        output::info(&text);
    } else {
        output::info(&codec::render(tree).trim_end());
    }
    Ok(())
}

fn print_config_location(label: &str, path: &Path, exists: bool) {
    let state = if exists { "exists" } else { "not found" };
    output::detail(&format!("{label}: {} ({state})", path.display()));
}

fn relative_to<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn print_plan(plan: &LayoutPlan) {
    output::header(&format!("Plan for {}", plan.root.display()));
    for dir in &plan.directories {
        output::diff_add(&relative_to(&plan.root, dir).display());
    }
    for skipped in &plan.skipped {
        output::detail(&format!("skip {}", relative_to(&plan.root, skipped).display()));
    }
}

fn print_report(report: &LayoutReport) {
    if report.root_created {
        output::action("Created", &report.root.display());
    }
    for dir in &report.created {
        output::diff_add(&relative_to(&report.root, dir).display());
    }
    for dir in &report.existing {
        output::detail(&format!("exists {}", relative_to(&report.root, dir).display()));
    }
    output::success(&format!(
        "{} directories created, {} already present",
        report.created.len(),
        report.existing.len()
    ));
}
