use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    classpath_command, home_command, init_command, refresh_command, run_command, tasks_command,
};

#[derive(Parser, Debug)]
#[command(name = "taskbridge")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    /// Workspace root used for settings discovery and ${workspace_loc}
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the project and task tree of a build file
    #[command(visible_alias = "t")]
    Tasks {
        /// Path to the build file (placeholders such as ${workspace_loc} are expanded)
        build_file: String,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recompute the project and task tree of a build file
    Refresh {
        build_file: String,

        /// Run the refresh as a background job and wait for its status
        #[arg(short, long)]
        background: bool,
    },
    /// Update a project's classpath from a build file
    Classpath {
        build_file: String,

        /// Project directory receiving the classpath file
        #[arg(short, long)]
        project: PathBuf,
    },
    /// Run the builder on a build file
    #[command(visible_alias = "r")]
    Run {
        build_file: String,

        /// Arguments passed to the builder, e.g. `-- clean test`
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Print the resolved builder home
    Home,
    /// Write a default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the command, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        let cwd = self.cwd.as_deref();
        match self.command {
            Commands::Tasks { build_file, json } => tasks_command(cwd, &build_file, json),
            Commands::Refresh {
                build_file,
                background,
            } => refresh_command(cwd, &build_file, background),
            Commands::Classpath {
                build_file,
                project,
            } => classpath_command(cwd, &build_file, &project),
            Commands::Run { build_file, args } => run_command(cwd, &build_file, &args),
            Commands::Home => home_command(cwd),
            Commands::Init { force } => init_command(cwd, force),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_collects_trailing_arguments() {
        let cli = Cli::parse_from(["taskbridge", "--cwd", "/w", "run", "build.x", "--", "clean", "test"]);
        assert_eq!(cli.cwd, Some(PathBuf::from("/w")));
        match cli.command {
            Commands::Run { build_file, args } => {
                assert_eq!(build_file, "build.x");
                assert_eq!(args, vec!["clean", "test"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
