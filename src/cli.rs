use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(name = "gitprof", version, about = "Manage named Git identity profiles")]
pub struct Cli {
    /// Only print requested values, no messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
    /// Git config file to use instead of ~/.gitconfig
    #[arg(short, long, global = true, env = "GITPROF_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Git executable to run
    #[arg(long, global = true, env = "GITPROF_GIT", value_name = "PROGRAM")]
    pub git: Option<PathBuf>,
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Adds a new profile
    Add {
        /// Profile name
        name: String,
        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Re-writes the fields of an existing profile
    Update {
        /// Profile name
        name: String,
        #[command(flatten)]
        fields: ProfileFields,
    },
    /// Deletes a profile
    Del {
        /// Profile name
        name: String,
    },
    /// Lists all stored profiles
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Activates a profile for this repository, or globally
    Use {
        /// Profile name
        name: String,
        /// Activate in the global config
        #[arg(short, long)]
        global: bool,
    },
    /// Displays the active profile name
    Current {
        /// Read the global config only
        #[arg(short, long)]
        global: bool,
    },
    /// Displays a stored profile, or the active git identity
    Show {
        /// Profile name, omit for the active identity
        name: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Identity fields given on the command line
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileFields {
    /// Git username (user.name)
    #[arg(short, long)]
    pub user: Option<String>,
    /// Git email (user.email)
    #[arg(short, long)]
    pub email: Option<String>,
    /// Signing key (user.signingkey), empty to remove
    #[arg(short = 'k', long)]
    pub signing_key: Option<String>,
}
