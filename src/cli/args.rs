// src/cli/args.rs
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::{MemoFilter, SortKey};
use crate::constants::SCAN_INTERVAL_SECS;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Backend origin for client commands, e.g. http://127.0.0.1:8000
    /// (optional, falls back to TIMENOTES_BACKEND_URL)
    #[arg(short, long, value_name = "URL", global = true)]
    pub backend_url: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the Time Notes API server
    Serve {
        /// Port to bind (optional, falls back to TIMENOTES_PORT)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Directory for the memo database and uploads
        /// (optional, falls back to TIMENOTES_DATA_DIR)
        #[arg(short, long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },

    /// List memos with optional search, filter and sort
    List {
        /// Search term matched against title and content
        #[arg(value_name = "SEARCH")]
        search: Option<String>,

        /// Restrict to a memo category
        #[arg(short, long, value_enum, default_value_t = MemoFilter::All)]
        filter: MemoFilter,

        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortKey::Recent)]
        sort: SortKey,
    },

    /// Show a single memo
    Show {
        /// Memo id to show
        #[arg(value_name = "MEMO_ID")]
        id: String,

        /// Output memo as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a memo
    Add {
        /// Memo title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Memo content
        #[arg(short, long, default_value = "")]
        content: String,

        /// Path to an image to upload and attach
        #[arg(short, long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Alarm time, RFC 3339 (e.g. 2026-08-07T09:30:00Z)
        #[arg(short, long, value_name = "TIME")]
        alarm: Option<DateTime<Utc>>,
    },

    /// Delete a memo
    Delete {
        /// Memo id to delete
        #[arg(value_name = "MEMO_ID")]
        id: String,
    },

    /// Flip a memo's alarm on or off
    ToggleAlarm {
        /// Memo id to toggle
        #[arg(value_name = "MEMO_ID")]
        id: String,
    },

    /// Poll for due alarms and raise reminder notifications
    Watch {
        /// Seconds between scans
        #[arg(short, long, value_name = "SECS", default_value_t = SCAN_INTERVAL_SECS)]
        interval: u64,
    },
}
