//! Storage layer for travelrec.
//!
//! This module provides the record store: four in-memory collections
//! (clients, airlines, available flights and bookings), each loaded once
//! from its JSON file and rewritten on every change. It also owns the rules
//! that cross collections:
//! - booking creation copies route details
//! - deleting a client or airline deletes its bookings
//! - booking rows are joined with client and airline names

pub mod collection;
pub mod json;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use collection::Collection;

use crate::error::{Error, Result};
use crate::records::{
    field, id_matches, Airline, AvailableFlight, Booking, BookingView, Client, EntityKind,
    FieldValues, Record,
};

/// Default file name for clients.
pub const CLIENTS_FILE: &str = "clients.json";

/// Default file name for airlines.
pub const AIRLINES_FILE: &str = "airlines.json";

/// Default file name for available flights.
pub const AVAILABLE_FLIGHTS_FILE: &str = "available_flights.json";

/// Default file name for bookings.
pub const BOOKINGS_FILE: &str = "flights.json";

/// Where each collection lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    /// Directory holding the files.
    pub data_dir: PathBuf,
    /// Clients file.
    pub clients: PathBuf,
    /// Airlines file.
    pub airlines: PathBuf,
    /// Available flights file.
    pub available_flights: PathBuf,
    /// Bookings file.
    pub bookings: PathBuf,
}

impl StorePaths {
    /// Default file names inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            clients: data_dir.join(CLIENTS_FILE),
            airlines: data_dir.join(AIRLINES_FILE),
            available_flights: data_dir.join(AVAILABLE_FLIGHTS_FILE),
            bookings: data_dir.join(BOOKINGS_FILE),
            data_dir,
        }
    }

    /// The file backing the given collection.
    #[must_use]
    pub fn path_for(&self, kind: EntityKind) -> &Path {
        match kind {
            EntityKind::Client => &self.clients,
            EntityKind::Airline => &self.airlines,
            EntityKind::AvailableFlight => &self.available_flights,
            EntityKind::Booking => &self.bookings,
        }
    }
}

/// The record store.
///
/// Constructed once at startup and passed by reference to whatever needs
/// it. There is no locking: two processes sharing a data directory will
/// overwrite each other's changes.
#[derive(Debug)]
pub struct Store {
    paths: StorePaths,
    clients: Collection<Client>,
    airlines: Collection<Airline>,
    available_flights: Collection<AvailableFlight>,
    bookings: Collection<Booking>,
}

/// A delete that has been looked up but not yet applied.
///
/// Only `Store::plan_delete` creates one, so a record can only be deleted
/// after the caller has had the chance to show `prompt()` and get a yes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    kind: EntityKind,
    id: u64,
    label: String,
    cascaded_bookings: Vec<u64>,
}

impl DeletePlan {
    /// Collection the record lives in.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// ID of the record to delete.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Bookings that will be removed along with the record.
    #[must_use]
    pub fn cascaded_bookings(&self) -> &[u64] {
        &self.cascaded_bookings
    }

    /// The confirmation question naming the record.
    #[must_use]
    pub fn prompt(&self) -> String {
        match self.kind {
            EntityKind::Client => format!(
                "Are you sure you want to delete {} and all their flights?",
                self.label
            ),
            EntityKind::Airline => format!(
                "Are you sure you want to delete {} and all associated flights?",
                self.label
            ),
            EntityKind::AvailableFlight | EntityKind::Booking => {
                format!("Are you sure you want to delete {}?", self.label)
            }
        }
    }
}

/// What a confirmed delete removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Collection the record was removed from.
    pub kind: EntityKind,
    /// ID of the removed record.
    pub id: u64,
    /// IDs of bookings removed by cascade.
    pub cascaded_bookings: Vec<u64>,
}

impl DeleteOutcome {
    /// Confirmation message for the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            EntityKind::Client | EntityKind::Airline => format!(
                "{} {} and all associated flights have been deleted",
                self.kind.title(),
                self.id
            ),
            EntityKind::AvailableFlight | EntityKind::Booking => {
                format!("{} {} has been deleted", self.kind.title(), self.id)
            }
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Directory holding the files.
    pub data_dir: PathBuf,
    /// Number of clients.
    pub clients: usize,
    /// Number of airlines.
    pub airlines: usize,
    /// Number of available flights.
    pub available_flights: usize,
    /// Number of bookings.
    pub bookings: usize,
    /// Combined size of the four files in bytes.
    pub bytes_on_disk: u64,
}

impl Store {
    /// Open the store, loading every collection.
    ///
    /// Creates the data directory and writes `[]` for any missing file.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created, or a file
    /// cannot be read or parsed.
    pub fn open(paths: StorePaths) -> Result<Self> {
        json::ensure_dir(&paths.data_dir)?;
        debug!("Opening store in {}", paths.data_dir.display());

        let store = Self {
            clients: Collection::open(&paths.clients)?,
            airlines: Collection::open(&paths.airlines)?,
            available_flights: Collection::open(&paths.available_flights)?,
            bookings: Collection::open(&paths.bookings)?,
            paths,
        };

        info!(
            "Store opened: {} clients, {} airlines, {} available flights, {} bookings",
            store.clients.len(),
            store.airlines.len(),
            store.available_flights.len(),
            store.bookings.len()
        );
        Ok(store)
    }

    /// Open the store with the default file names inside `data_dir`.
    ///
    /// # Errors
    ///
    /// See [`Store::open`].
    pub fn open_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open(StorePaths::in_dir(data_dir))
    }

    /// Where the collections live.
    #[must_use]
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// All clients in insertion order.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        self.clients.records()
    }

    /// All airlines in insertion order.
    #[must_use]
    pub fn airlines(&self) -> &[Airline] {
        self.airlines.records()
    }

    /// All available flights in insertion order.
    #[must_use]
    pub fn available_flights(&self) -> &[AvailableFlight] {
        self.available_flights.records()
    }

    /// All bookings in insertion order.
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        self.bookings.records()
    }

    /// Create a record from caller-supplied values and return its ID.
    ///
    /// For bookings, a `Flight_ID` naming an existing available flight
    /// copies that route's airline, date and cities over whatever the
    /// caller supplied. References are never checked for existence.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is rejected (nothing is
    /// written), or an I/O error if the file cannot be written.
    pub fn create(&mut self, kind: EntityKind, fields: &FieldValues) -> Result<u64> {
        match kind {
            EntityKind::Client => self.clients.insert(fields),
            EntityKind::Airline => self.airlines.insert(fields),
            EntityKind::AvailableFlight => self.available_flights.insert(fields),
            EntityKind::Booking => self.create_booking(fields),
        }
    }

    fn create_booking(&mut self, fields: &FieldValues) -> Result<u64> {
        let mut fields = fields.clone();
        let route = fields
            .id(field::FLIGHT_ID)?
            .and_then(|id| self.available_flights.get_by_id(id));

        if let Some(route) = route {
            debug!("Copying route {} into new booking", route.flight_id);
            fields.set(field::AIRLINE_ID, route.airline_id.to_string());
            fields.set(field::DATE, route.date.as_str());
            fields.set(field::START_CITY, route.start_city.as_str());
            fields.set(field::END_CITY, route.end_city.as_str());
        }

        self.bookings.insert(&fields)
    }

    /// Search a collection, returning rows as field values.
    ///
    /// A blank filter returns every record. Otherwise the filter is compared
    /// by exact string equality against `ID` (clients, airlines),
    /// `Flight_ID` (available flights) or `Client_ID` (bookings). Booking
    /// rows carry the joined `Client` and `Airline` names.
    #[must_use]
    pub fn search(&self, kind: EntityKind, filter: &str) -> Vec<FieldValues> {
        match kind {
            EntityKind::Client => rows(self.clients.search(filter)),
            EntityKind::Airline => rows(self.airlines.search(filter)),
            EntityKind::AvailableFlight => rows(self.available_flights.search(filter)),
            EntityKind::Booking => self
                .search_bookings(filter)
                .iter()
                .map(BookingView::to_fields)
                .collect(),
        }
    }

    /// Bookings for the given client (all bookings when blank), joined with
    /// client and airline names.
    #[must_use]
    pub fn search_bookings(&self, client_filter: &str) -> Vec<BookingView> {
        self.bookings
            .search(client_filter)
            .into_iter()
            .map(|booking| self.join(booking))
            .collect()
    }

    /// Public flight search: bookings matching both a client and an airline.
    ///
    /// Both IDs are compared as typed; a blank ID matches nothing.
    #[must_use]
    pub fn lookup(&self, client_id: &str, airline_id: &str) -> Vec<BookingView> {
        self.bookings
            .records()
            .iter()
            .filter(|b| id_matches(b.client_id, client_id))
            .filter(|b| b.airline_id.is_some_and(|id| id_matches(id, airline_id)))
            .cloned()
            .map(|booking| self.join(booking))
            .collect()
    }

    /// Fetch one record by its ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record has that ID.
    pub fn get(&self, kind: EntityKind, id: &str) -> Result<FieldValues> {
        let found = match kind {
            EntityKind::Client => self.clients.get(id).map(Record::to_fields),
            EntityKind::Airline => self.airlines.get(id).map(Record::to_fields),
            EntityKind::AvailableFlight => self.available_flights.get(id).map(Record::to_fields),
            EntityKind::Booking => self
                .bookings
                .get(id)
                .map(|b| self.join(b.clone()).to_fields()),
        };
        found.ok_or_else(|| Error::not_found(kind, id.trim()))
    }

    /// Overwrite fields of an existing record and persist.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record has that ID, a validation
    /// error if a change is rejected (nothing is written), or an I/O error.
    pub fn edit(&mut self, kind: EntityKind, id: &str, changes: &FieldValues) -> Result<()> {
        let updated = match kind {
            EntityKind::Client => self.clients.update(id, changes),
            EntityKind::Airline => self.airlines.update(id, changes),
            EntityKind::AvailableFlight => self.available_flights.update(id, changes),
            EntityKind::Booking => self.bookings.update(id, changes),
        };
        updated.map(drop)
    }

    /// First step of a delete: find the record and work out what else goes
    /// with it.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record has that ID.
    pub fn plan_delete(&self, kind: EntityKind, id: &str) -> Result<DeletePlan> {
        let not_found = || Error::not_found(kind, id.trim());
        let (id, label, cascaded_bookings) = match kind {
            EntityKind::Client => {
                let client = self.clients.get(id).ok_or_else(not_found)?;
                let cascaded = self.booking_ids(|b| b.client_id == client.id);
                (client.id, client.label(), cascaded)
            }
            EntityKind::Airline => {
                let airline = self.airlines.get(id).ok_or_else(not_found)?;
                let cascaded = self.booking_ids(|b| b.airline_id == Some(airline.id));
                (airline.id, airline.label(), cascaded)
            }
            EntityKind::AvailableFlight => {
                let route = self.available_flights.get(id).ok_or_else(not_found)?;
                (route.flight_id, route.label(), Vec::new())
            }
            EntityKind::Booking => {
                let booking = self.bookings.get(id).ok_or_else(not_found)?;
                (booking.booking_id, booking.label(), Vec::new())
            }
        };

        Ok(DeletePlan {
            kind,
            id,
            label,
            cascaded_bookings,
        })
    }

    /// Second step of a delete: apply a confirmed plan.
    ///
    /// Clients and airlines take their bookings with them and both files
    /// are rewritten. Available flights and bookings are removed alone.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the record has gone since the plan was
    /// made, or an I/O error.
    pub fn delete(&mut self, plan: DeletePlan) -> Result<DeleteOutcome> {
        let DeletePlan { kind, id, .. } = plan;
        let cascaded = match kind {
            EntityKind::Client => {
                self.clients.remove(id)?;
                self.bookings.remove_where(|b| b.client_id == id)?
            }
            EntityKind::Airline => {
                self.airlines.remove(id)?;
                self.bookings.remove_where(|b| b.airline_id == Some(id))?
            }
            EntityKind::AvailableFlight => {
                self.available_flights.remove(id)?;
                Vec::new()
            }
            EntityKind::Booking => {
                self.bookings.remove(id)?;
                Vec::new()
            }
        };

        let cascaded_bookings: Vec<u64> = cascaded.iter().map(Record::id).collect();
        if !cascaded_bookings.is_empty() {
            info!(
                "Deleting {} {} removed {} bookings",
                kind,
                id,
                cascaded_bookings.len()
            );
        }

        Ok(DeleteOutcome {
            kind,
            id,
            cascaded_bookings,
        })
    }

    /// Record counts and on-disk size.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let bytes_on_disk = EntityKind::ALL
            .iter()
            .map(|kind| {
                std::fs::metadata(self.paths.path_for(*kind)).map_or(0, |m| m.len())
            })
            .sum();

        StoreStats {
            data_dir: self.paths.data_dir.clone(),
            clients: self.clients.len(),
            airlines: self.airlines.len(),
            available_flights: self.available_flights.len(),
            bookings: self.bookings.len(),
            bytes_on_disk,
        }
    }

    fn booking_ids(&self, predicate: impl Fn(&Booking) -> bool) -> Vec<u64> {
        self.bookings
            .records()
            .iter()
            .filter(|b| predicate(b))
            .map(Record::id)
            .collect()
    }

    fn join(&self, booking: Booking) -> BookingView {
        let client_name = self
            .clients
            .get_by_id(booking.client_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let airline_name = booking
            .airline_id
            .and_then(|id| self.airlines.get_by_id(id))
            .map(|a| a.company_name.clone())
            .unwrap_or_default();

        BookingView {
            booking,
            client_name,
            airline_name,
        }
    }
}

fn rows<R: Record>(records: Vec<R>) -> Vec<FieldValues> {
    records.iter().map(Record::to_fields).collect()
}
