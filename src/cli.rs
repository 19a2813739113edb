//! Command-line interface definition for SoulCare
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for chatting, the stress check-in, and history.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SoulCare - a quiet place to check in with yourself
///
/// Take a short stress assessment, talk things through with an AI
/// companion, and come back to earlier conversations.
#[derive(Parser, Debug, Clone)]
#[command(name = "soulcare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Directory for quota and conversation data
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the generation proxy base URL
    #[arg(long)]
    pub proxy_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for SoulCare
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat with the companion
    Chat {
        /// Continue the conversation with this id
        #[arg(short, long, conflicts_with = "topic")]
        resume: Option<u64>,

        /// Let the companion open the conversation on a topic
        #[arg(short, long)]
        topic: Option<String>,
    },

    /// Take the four-question stress assessment
    Assess {
        /// Offer to start a chat on a suggested topic afterwards
        #[arg(long)]
        chat: bool,
    },

    /// Manage stored conversations
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Show how many AI requests remain today
    Quota,

    /// Print an inspirational quote
    Quote,
}

/// Conversation history subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List stored conversations
    List,

    /// Print a conversation's messages
    Show {
        /// Conversation id
        id: u64,
    },

    /// Delete one conversation
    Delete {
        /// Conversation id
        id: u64,
    },

    /// Delete every stored conversation
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            data_dir: None,
            proxy_url: None,
            verbose: false,
            command: Commands::Quote,
        }
    }
}
