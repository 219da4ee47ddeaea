use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "lugat", version, about = "English/Turkish vocabulary flashcards")]
pub struct Cli {
    /// Profile to load settings from
    #[arg(long, global = true, default_value = "main")]
    pub profile: String,

    /// Directory holding saved cards and the API key
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Ignore the stored API key and use offline lookups
    #[arg(long, global = true)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive session (default)
    Repl,
    /// Translate a word and optionally save it as a card
    Lookup {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
        /// Save the result without asking
        #[arg(long)]
        save: bool,
    },
    /// Show saved cards
    List {
        /// Print the raw JSON records
        #[arg(long)]
        json: bool,
    },
    /// Delete a saved card
    Remove { id: Uuid },
    /// Drill yourself on saved cards
    Quiz,
    /// Manage the API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// List models available to an API key
    Models {
        /// Key to check instead of the stored one
        #[arg(long)]
        key: Option<String>,
    },
    /// Manage settings profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Store a new key
    Set { key: String },
    /// Forget the stored key
    Clear,
    /// Show the stored key, masked
    Show,
    /// Check the stored key against the provider
    Test,
}

#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Copy the main profile under a new name
    Add { name: String },
    /// Print the active settings
    Show,
}
