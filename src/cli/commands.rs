//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::domain::Tree;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::read_document;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// File argument that selects standard input.
const STDIN_ARG: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Show { file, listing }) => cmd_show(cli, file, *listing),
        Some(Commands::Children { file, name }) => cmd_children(cli, file, name),
        Some(Commands::Loops { file }) => cmd_loops(cli, file),
        Some(Commands::Check { file }) => cmd_check(cli, file),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage("no command given, see --help".into())),
    }
}

/// `--config` if given, otherwise `./.looptree.toml`.
fn local_config_target(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(config::expand_path)
        .unwrap_or_else(|| config::local_config_path(Path::new(".")))
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let local = local_config_target(cli);
    // the implicit local file is optional, an explicit one is not
    let local = (cli.config.is_some() || local.exists()).then_some(local);
    Ok(Settings::load(local.as_deref())?)
}

#[instrument(level = "debug", skip(container))]
fn load_tree(container: &ServiceContainer, file: &Path) -> CliResult<Tree> {
    let service = container.tree_service();
    let tree = if file == Path::new(STDIN_ARG) {
        let text = read_document(io::stdin().lock())?;
        service.parse_str(&text)?
    } else {
        service.load(file)?
    };
    debug!(root = tree.root(), nodes = tree.node_count(), "tree loaded");
    Ok(tree)
}

fn cmd_show(cli: &Cli, file: &Path, listing: bool) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?);
    let tree = load_tree(&container, file)?;

    if listing {
        for line in tree.listing() {
            output::line(line);
        }
    } else {
        output::line(tree.to_termtree(&container.settings.loop_marker));
    }
    Ok(())
}

fn cmd_children(cli: &Cli, file: &Path, name: &str) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?);
    let tree = load_tree(&container, file)?;

    if !tree.contains(name) {
        output::warning(format!("unknown node: {name}"));
    }
    for child in tree.children(name) {
        output::line(child);
    }
    Ok(())
}

fn cmd_loops(cli: &Cli, file: &Path) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?);
    let tree = load_tree(&container, file)?;

    for name in tree.loops() {
        output::line(name);
    }
    Ok(())
}

fn cmd_check(cli: &Cli, file: &Path) -> CliResult<()> {
    let container = ServiceContainer::new(load_settings(cli)?);
    let tree = load_tree(&container, file)?;

    output::success(format!(
        "{}: root '{}', {} nodes, {} loop parents, depth {}",
        file.display(),
        tree.root(),
        tree.node_count(),
        tree.loops().len(),
        tree.depth()
    ));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::line(settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = config::global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(unavailable)".into());
            output::label("Global", global);
            output::label("Local", local_config_target(cli).display());
        }
        ConfigCommands::Init { global } => {
            let target = if *global {
                config::global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".into())
                })?
            } else {
                local_config_target(cli)
            };
            let fs = RealFileSystem;
            if fs.exists(&target) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    target.display()
                )));
            }
            fs.ensure_parent(&target)
                .with_path_context("create directory for", &target)?;
            fs.write(&target, &Settings::template())
                .with_path_context("write config", &target)?;
            output::success(format!("created {}", target.display()));
        }
    }
    Ok(())
}
