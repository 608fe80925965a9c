pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kapitel")]
#[command(about = "Embeddable RSS audio-chapter player", long_about = None)]
pub struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new player configuration
    Add {
        /// Display name of the configuration
        name: String,
        /// URL of the RSS feed to play
        feed_url: String,
        /// List chapters oldest-first
        #[arg(long)]
        sort_ascending: bool,
        /// Start playback on the first (oldest) post
        #[arg(long)]
        show_first_post: bool,
    },
    /// Delete a player configuration
    Remove {
        /// Configuration id
        id: String,
    },
    /// Update fields of an existing configuration
    Set {
        /// Configuration id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        feed_url: Option<String>,
        #[arg(long)]
        list_height: Option<u32>,
        #[arg(long)]
        sort_ascending: Option<bool>,
        #[arg(long)]
        show_first_post: Option<bool>,
        /// Player size: big, medium or small
        #[arg(long)]
        player_type: Option<String>,
    },
    /// List stored configurations
    List,
    /// Show one configuration
    Show {
        /// Configuration id
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch a feed URL and print its chapters
    Fetch {
        /// RSS feed URL
        url: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch a configuration's feed and render it as the embed would
    Preview {
        /// Configuration id
        id: String,
    },
    /// Print iframe and script embed codes for a configuration
    Embed {
        /// Configuration id
        id: String,
        /// Base URL of the player deployment (with trailing slash)
        #[arg(long)]
        base_url: String,
    },
}
