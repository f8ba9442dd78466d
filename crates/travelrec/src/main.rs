//! `travrec` - CLI for travelrec
//!
//! This binary provides the command-line interface for keeping travel
//! agency records: clients, airlines, available flights and bookings.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use travelrec::cli::{
    columns, field_values, Cli, Command, ConfigCommand, CreateCommand, DeleteCommand,
    EditCommand, LookupCommand, Renderer, ViewCommand,
};
use travelrec::records::BookingView;
use travelrec::{init_logging, AgentSession, Config, EntityKind, Error, Store};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        username,
        password,
        command,
        ..
    } = cli;
    let credentials = Credentials { username, password };
    let load_config = || Config::load_from(config_path.clone());

    match command {
        Command::Create(cmd) => {
            let config = load_config()?;
            let session = credentials.login(&config)?;
            let mut store = open_store(&config)?;
            handle_create(&mut store, &session, renderer(&config), &cmd)
        }
        Command::View(cmd) => {
            let config = load_config()?;
            credentials.login(&config)?;
            handle_view(&open_store(&config)?, renderer(&config), &cmd)
        }
        Command::Edit(cmd) => {
            let config = load_config()?;
            let session = credentials.login(&config)?;
            handle_edit(&mut open_store(&config)?, &session, &cmd)
        }
        Command::Delete(cmd) => {
            let config = load_config()?;
            let session = credentials.login(&config)?;
            handle_delete(&mut open_store(&config)?, &session, &cmd)
        }
        Command::Lookup(cmd) => {
            let config = load_config()?;
            handle_lookup(&open_store(&config)?, renderer(&config), &cmd)
        }
        Command::Status(cmd) => handle_status(&open_store(&load_config()?)?, cmd.json),
        // Config commands must work even when the config itself is broken
        Command::Config(cmd) => handle_config(config_path.as_deref(), cmd),
    }
}

fn renderer(config: &Config) -> Renderer {
    Renderer::new(config.display.id_width)
}

fn open_store(config: &Config) -> Result<Store> {
    Store::open(config.store_paths()).context("failed to open record store")
}

struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

impl Credentials {
    /// Log in with the given credentials, prompting for a missing username.
    ///
    /// The password is never prompted for, as the terminal would echo it.
    fn login(self, config: &Config) -> Result<AgentSession> {
        let Some(password) = self.password else {
            anyhow::bail!("password required: pass --password or set TRAVREC_PASSWORD");
        };
        let username = match self.username {
            Some(username) => username,
            None => prompt("Username: ")?,
        };
        Ok(AgentSession::login(&config.agent, &username, &password)?)
    }
}

fn prompt(label: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{question} [y/N] ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Print a warning for the user. Bypasses the log filter so `-q` keeps it.
fn warning(message: &str) {
    eprintln!("Warning: {message}");
}

/// Report a missing record as a warning; pass every other error on.
fn not_found_is_warning(err: Error) -> Result<()> {
    if err.is_not_found() {
        warning(&err.to_string());
        Ok(())
    } else {
        Err(err.into())
    }
}

fn handle_create(
    store: &mut Store,
    session: &AgentSession,
    renderer: Renderer,
    cmd: &CreateCommand,
) -> Result<()> {
    let kind = EntityKind::from(cmd.entity);
    info!("{} creating {kind}", session.username());

    let id = store.create(kind, &field_values(&cmd.fields))?;
    println!("{} created with ID {}", kind.title(), renderer.id(id));
    Ok(())
}

fn handle_view(store: &Store, renderer: Renderer, cmd: &ViewCommand) -> Result<()> {
    let kind = EntityKind::from(cmd.entity);
    let filter = cmd.id.as_deref().unwrap_or_default();

    let rows = store.search(kind, filter);
    if rows.is_empty() && !filter.trim().is_empty() {
        warning(&format!("{} not found", kind.title()));
        return Ok(());
    }

    println!("{}", renderer.render(cmd.format, columns(kind), &rows)?);
    Ok(())
}

fn handle_edit(store: &mut Store, session: &AgentSession, cmd: &EditCommand) -> Result<()> {
    let kind = EntityKind::from(cmd.entity);
    info!("{} editing {kind} {}", session.username(), cmd.id);

    match store.edit(kind, &cmd.id, &field_values(&cmd.fields)) {
        Ok(()) => {
            println!("{} updated successfully", kind.title());
            Ok(())
        }
        Err(err) => not_found_is_warning(err),
    }
}

fn handle_delete(store: &mut Store, session: &AgentSession, cmd: &DeleteCommand) -> Result<()> {
    let kind = EntityKind::from(cmd.entity);
    let plan = match store.plan_delete(kind, &cmd.id) {
        Ok(plan) => plan,
        Err(err) => return not_found_is_warning(err),
    };

    if !cmd.yes && !confirm(&plan.prompt())? {
        println!("Deletion cancelled");
        return Ok(());
    }

    info!("{} deleting {kind} {}", session.username(), plan.id());
    let outcome = store.delete(plan)?;
    println!("{}", outcome.message());
    Ok(())
}

fn handle_lookup(store: &Store, renderer: Renderer, cmd: &LookupCommand) -> Result<()> {
    let matches = store.lookup(&cmd.client, &cmd.airline);
    if matches.is_empty() {
        println!("No matching flights found. Please check the details and try again.");
        return Ok(());
    }

    let rows: Vec<_> = matches.iter().map(BookingView::to_fields).collect();
    println!("{} matching flight(s):", rows.len());
    println!(
        "{}",
        renderer.render(cmd.format, columns(EntityKind::Booking), &rows)?
    );
    Ok(())
}

fn handle_status(store: &Store, json: bool) -> Result<()> {
    let stats = store.stats();
    if json {
        let status = serde_json::json!({
            "data_dir": stats.data_dir,
            "clients": stats.clients,
            "airlines": stats.airlines,
            "available_flights": stats.available_flights,
            "bookings": stats.bookings,
            "bytes_on_disk": stats.bytes_on_disk,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("travrec status");
        println!("--------------");
        println!("Data directory:    {}", stats.data_dir.display());
        println!("Clients:           {}", stats.clients);
        println!("Airlines:          {}", stats.airlines);
        println!("Available flights: {}", stats.available_flights);
        println!("Bookings:          {}", stats.bookings);
        println!("Size on disk:      {} bytes", stats.bytes_on_disk);
    }
    Ok(())
}

fn handle_config(config_path: Option<&Path>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path.map(Path::to_path_buf))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config.redacted())?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Clients file:       {}", config.storage.clients_file);
                println!("  Airlines file:      {}", config.storage.airlines_file);
                println!(
                    "  Routes file:        {}",
                    config.storage.available_flights_file
                );
                println!("  Bookings file:      {}", config.storage.bookings_file);
                println!();
                println!("[Agent]");
                println!("  Username:           {}", config.agent.username);
                println!();
                println!("[Display]");
                println!("  ID width:           {}", config.display.id_width);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.map_or_else(Config::default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or_else(|| config_path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    anyhow::bail!("configuration is invalid");
                }
            }
        }
    }
    Ok(())
}
