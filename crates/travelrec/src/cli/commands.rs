//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::records::{parse_assignment, EntityKind, FieldValues};

/// Which collection a command works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    /// Agency clients
    Client,
    /// Airline companies
    Airline,
    /// Available flights (routes)
    Flight,
    /// Client bookings
    Booking,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Client => Self::Client,
            EntityArg::Airline => Self::Airline,
            EntityArg::Flight => Self::AvailableFlight,
            EntityArg::Booking => Self::Booking,
        }
    }
}

/// Create command arguments.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Kind of record to create
    #[arg(value_enum)]
    pub entity: EntityArg,

    /// Field value, e.g. -f "Company Name=Delta" (repeatable)
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub fields: Vec<(String, String)>,
}

/// View command arguments.
#[derive(Debug, Args)]
pub struct ViewCommand {
    /// Kind of record to view
    #[arg(value_enum)]
    pub entity: EntityArg,

    /// ID to show (client ID for bookings); omit to list everything
    pub id: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Kind of record to edit
    #[arg(value_enum)]
    pub entity: EntityArg,

    /// ID of the record
    pub id: String,

    /// New field value (repeatable)
    #[arg(
        short = 'f',
        long = "field",
        value_name = "KEY=VALUE",
        value_parser = parse_assignment,
        required = true
    )]
    pub fields: Vec<(String, String)>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Kind of record to delete
    #[arg(value_enum)]
    pub entity: EntityArg,

    /// ID of the record
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Lookup command arguments.
#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Client ID
    #[arg(long, value_name = "ID")]
    pub client: String,

    /// Airline ID
    #[arg(long, value_name = "ID")]
    pub airline: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One "Field: value" line per field
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Collect `-f` pairs into field values. A repeated key keeps its last value.
#[must_use]
pub fn field_values(pairs: &[(String, String)]) -> FieldValues {
    pairs.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_arg_conversion() {
        assert_eq!(EntityKind::from(EntityArg::Client), EntityKind::Client);
        assert_eq!(EntityKind::from(EntityArg::Airline), EntityKind::Airline);
        assert_eq!(
            EntityKind::from(EntityArg::Flight),
            EntityKind::AvailableFlight
        );
        assert_eq!(EntityKind::from(EntityArg::Booking), EntityKind::Booking);
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_field_values_last_wins() {
        let pairs = vec![
            ("City".to_string(), "Oslo".to_string()),
            ("City".to_string(), "Bergen".to_string()),
            ("Name".to_string(), "Jane".to_string()),
        ];
        let fields = field_values(&pairs);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("City"), Some("Bergen"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
