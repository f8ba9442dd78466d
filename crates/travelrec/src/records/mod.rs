//! Record types for travelrec.
//!
//! This module defines the four kinds of records the agency keeps and the
//! `Record` trait the storage layer uses to treat them uniformly.

mod airline;
mod booking;
mod client;
mod fields;
mod route;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use airline::Airline;
pub use booking::{Booking, BookingView};
pub use client::Client;
pub use fields::{is_id_field, parse_assignment, FieldValues};
pub use route::AvailableFlight;

/// Field names exactly as they appear in the JSON files.
pub mod field {
    /// Client and airline ID.
    pub const ID: &str = "ID";
    /// Constant record type tag.
    pub const TYPE: &str = "Type";
    /// Client name.
    pub const NAME: &str = "Name";
    /// First address line.
    pub const ADDRESS_LINE_1: &str = "Address Line 1";
    /// Second address line.
    pub const ADDRESS_LINE_2: &str = "Address Line 2";
    /// Third address line.
    pub const ADDRESS_LINE_3: &str = "Address Line 3";
    /// City.
    pub const CITY: &str = "City";
    /// State or region.
    pub const STATE: &str = "State";
    /// Postal code.
    pub const ZIP_CODE: &str = "Zip Code";
    /// Country.
    pub const COUNTRY: &str = "Country";
    /// Phone number.
    pub const PHONE_NUMBER: &str = "Phone Number";
    /// Airline name.
    pub const COMPANY_NAME: &str = "Company Name";
    /// Available flight ID, also referenced from bookings.
    pub const FLIGHT_ID: &str = "Flight_ID";
    /// Airline reference.
    pub const AIRLINE_ID: &str = "Airline_ID";
    /// Client reference.
    pub const CLIENT_ID: &str = "Client_ID";
    /// Booking ID.
    pub const BOOKING_ID: &str = "Booking_ID";
    /// Departure date, free text.
    pub const DATE: &str = "Date";
    /// Departure city.
    pub const START_CITY: &str = "Start City";
    /// Arrival city.
    pub const END_CITY: &str = "End City";
    /// Joined client name on booking rows.
    pub const CLIENT: &str = "Client";
    /// Joined airline name on booking rows.
    pub const AIRLINE: &str = "Airline";
}

/// The four collections the store keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Agency clients.
    Client,
    /// Airline companies.
    Airline,
    /// Sellable routes.
    AvailableFlight,
    /// A client booked on a route.
    Booking,
}

impl EntityKind {
    /// All kinds, in the order the collections are loaded.
    pub const ALL: [EntityKind; 4] = [
        Self::Client,
        Self::Airline,
        Self::AvailableFlight,
        Self::Booking,
    ];

    /// Capitalized name for messages ("Client created with ID ...").
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Airline => "Airline",
            Self::AvailableFlight => "Available flight",
            Self::Booking => "Flight booking",
        }
    }

    /// The field holding this collection's unique ID.
    #[must_use]
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Client | Self::Airline => field::ID,
            Self::AvailableFlight => field::FLIGHT_ID,
            Self::Booking => field::BOOKING_ID,
        }
    }

    /// The field a search filter is compared against.
    ///
    /// Bookings are looked up by the client they belong to.
    #[must_use]
    pub fn search_field(self) -> &'static str {
        match self {
            Self::Booking => field::CLIENT_ID,
            other => other.id_field(),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Airline => write!(f, "airline"),
            Self::AvailableFlight => write!(f, "available flight"),
            Self::Booking => write!(f, "booking"),
        }
    }
}

/// A record kept in one of the store's collections.
///
/// Implementors are plain structs whose serde field names match the JSON
/// files. Conversion to and from `FieldValues` is where required fields
/// and integer references get checked.
pub trait Record: Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// Which collection this record lives in.
    const KIND: EntityKind;

    /// Every field name, in display order.
    const FIELDS: &'static [&'static str];

    /// Fields the store assigns; callers may not set them.
    const DISPLAY_ONLY: &'static [&'static str];

    /// The record's unique ID.
    fn id(&self) -> u64;

    /// The value search filters are compared against.
    fn search_key(&self) -> u64 {
        self.id()
    }

    /// Build a record with the given ID from caller-supplied values.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank required field or a
    /// non-integer reference.
    fn from_fields(id: u64, fields: &FieldValues) -> Result<Self>;

    /// Every field as text.
    fn to_fields(&self) -> FieldValues;

    /// Short human description used in confirmation prompts.
    fn label(&self) -> String;
}

/// Reject field names the record type does not accept from callers.
///
/// Integer references are parsed here as well so that a bad `*ID` value
/// is reported against its own field before anything else is checked.
///
/// # Errors
///
/// Returns a validation error for a display-only field, an unknown field
/// or a non-integer `*ID` value.
pub fn check_writable<R: Record>(fields: &FieldValues) -> Result<()> {
    for name in fields.names() {
        if R::DISPLAY_ONLY.contains(&name) {
            return Err(Error::validation(name, "is display-only"));
        }
        if !R::FIELDS.contains(&name) {
            return Err(Error::validation(
                name,
                format!("is not a {} field", R::KIND),
            ));
        }
        if is_id_field(name) {
            fields.id(name)?;
        }
    }
    Ok(())
}

/// Whether `id` matches a filter typed by the user.
///
/// Matching is exact string equality against the decimal form, so `"007"`
/// does not match 7.
#[must_use]
pub fn id_matches(id: u64, query: &str) -> bool {
    id.to_string() == query.trim()
}
