//! `travelrec` - Record keeping for a small travel agency
//!
//! This library keeps clients, airlines, available flights and bookings in
//! JSON files, with ID assignment, field validation, cascade delete and the
//! booking joins the `travrec` CLI shows.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod records;
pub mod storage;

pub use auth::AgentSession;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use records::{EntityKind, FieldValues, Record};
pub use storage::{DeleteOutcome, DeletePlan, Store, StorePaths, StoreStats};
