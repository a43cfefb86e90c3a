//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build name trees with loop markers from nested JSON documents
#[derive(Parser, Debug)]
#[command(name = "looptree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Local config file (default: ./.looptree.toml if present)
    #[arg(long, global = true, env = "LOOPTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the tree
    Show {
        /// JSON document (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Print `children(..) == [..]` lines instead of a drawn tree
        #[arg(short, long)]
        listing: bool,
    },

    /// List the children of a node
    Children {
        /// JSON document (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Node name
        name: String,
    },

    /// List nodes that have loop children
    Loops {
        /// JSON document (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Validate a document
    Check {
        /// JSON document (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
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
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_repeated_debug_flag_when_parsing_then_counts_occurrences() {
        let cli = Cli::parse_from(["looptree", "-dd", "show", "tree.json"]);

        assert_eq!(cli.debug, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Show { listing: false, .. })
        ));
    }

    #[test]
    fn given_children_command_when_parsing_then_keeps_file_and_name() {
        let cli = Cli::parse_from(["looptree", "children", "-", "class"]);

        match cli.command {
            Some(Commands::Children { file, name }) => {
                assert_eq!(file, PathBuf::from("-"));
                assert_eq!(name, "class");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
