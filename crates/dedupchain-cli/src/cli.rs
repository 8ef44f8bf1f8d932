use clap::{ArgAction, Args, Parser, Subcommand};
use dedupchain_core::config::{DEFAULT_CACHE_MARKER, Policy};
use std::path::PathBuf;

/// Priority-chain directory deduplication
///
/// Deletes files from later directory trees that duplicate a file at the same relative path in an earlier tree, then prunes directories left empty
#[derive(Parser, Debug)]
#[command(name = "dedupchain")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview deletions without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Hash files one at a time instead of on a thread pool
    #[arg(long, global = true)]
    pub sequential: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one job config (JSON or TOML)
    Run {
        /// Job config file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Run every job config listed in a list file
    Batch {
        /// List file; one config path per line, `#` starts a comment
        #[arg(value_name = "LIST")]
        list: PathBuf,
    },

    /// Clean one candidate tree against one reference tree
    Pair {
        /// Authoritative tree, never modified
        reference: PathBuf,

        /// Tree to clean
        candidate: PathBuf,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Write a default job config template
    Init {
        /// Destination; a `.toml` extension selects TOML, anything else JSON
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

/// Policy flags for the `pair` command
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct PolicyArgs {
    /// Do not visit hidden files and directories
    #[arg(long)]
    pub skip_hidden: bool,

    /// Do not remove cache-marker files from the candidate tree
    #[arg(long)]
    pub keep_cache_files: bool,

    /// Delete every path-identical file without comparing content
    #[arg(long)]
    pub force_by_name: bool,

    /// Delete path-identical files with this extension without comparing content ("*" for all)
    #[arg(long = "force-ext", value_name = "EXT", action = ArgAction::Append, value_delimiter = ',')]
    pub force_ext: Vec<String>,

    /// Delete differing candidates that are both older and smaller
    #[arg(long)]
    pub smaller_and_older: bool,

    /// Also compare files lying directly in the two roots
    #[arg(long)]
    pub compare_root_files: bool,

    /// Reserved cache-marker filename
    #[arg(long, value_name = "NAME", default_value = DEFAULT_CACHE_MARKER)]
    pub cache_marker: String,
}

impl PolicyArgs {
    /// Build a policy from the flags
    pub fn to_policy(&self, sequential: bool) -> Policy {
        Policy {
            include_hidden: !self.skip_hidden,
            remove_cache_files: !self.keep_cache_files,
            force_delete_by_name: self.force_by_name,
            force_delete_extensions: self.force_ext.clone(),
            delete_if_smaller_and_older: self.smaller_and_older,
            compare_root_files: self.compare_root_files,
            cache_marker: self.cache_marker.clone(),
            parallel_hashing: !sequential,
            ..Policy::default()
        }
    }
}
