//! Command-line interface for travelrec.
//!
//! This module provides the CLI structure and output rendering for the
//! `travrec` binary.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    field_values, ConfigCommand, CreateCommand, DeleteCommand, EditCommand, EntityArg,
    LookupCommand, OutputFormat, StatusCommand, ViewCommand,
};
pub use render::{columns, Renderer};

use crate::logging::Verbosity;

/// travrec - Travel agency record keeping
///
/// Keeps clients, airlines, available flights and bookings in JSON files.
/// Back-office commands need the agent login; flight lookup does not.
#[derive(Debug, Parser)]
#[command(name = "travrec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Agent username
    #[arg(long, global = true, env = "TRAVREC_USERNAME")]
    pub username: Option<String>,

    /// Agent password (never prompted for)
    #[arg(long, global = true, env = "TRAVREC_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a record (agent only)
    Create(CreateCommand),

    /// List or show records (agent only)
    View(ViewCommand),

    /// Change fields of a record (agent only)
    Edit(EditCommand),

    /// Delete a record, with cascade for clients and airlines (agent only)
    Delete(DeleteCommand),

    /// Find booked flights for a client with an airline
    Lookup(LookupCommand),

    /// Show record counts and data location
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        }
    }
}
