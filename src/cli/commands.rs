//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memos")]
#[command(about = "Keep a simple list of dated memoranda", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new memo collection
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Create a memo
    Create {
        /// Date the memo is about (MM/DD/YYYY)
        #[arg(short, long)]
        date: String,

        /// Memo text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Report the outcome as JSON instead of failing
        #[arg(long)]
        json: bool,
    },

    /// List memos, newest date first
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove memos by id or by list position
    Remove {
        /// Memo ids to remove
        #[arg(required_unless_present = "index")]
        ids: Vec<String>,

        /// Position in 'memos list' output (starting at 1); repeatable
        #[arg(short, long = "index", value_name = "N")]
        index: Vec<usize>,

        /// Report the outcome as JSON instead of failing
        #[arg(long)]
        json: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
