use chrono::Local;
use serde::{Deserialize, Serialize};

use super::{field, EntityKind, FieldValues, Record};
use crate::error::Result;

/// Format used when a route is created without a date.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A sellable route: an airline flying between two cities on a date.
///
/// Bookings copy the date and cities when they are made, so removing a
/// route never touches existing bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableFlight {
    /// Unique sequential ID.
    #[serde(rename = "Flight_ID")]
    pub flight_id: u64,
    /// The operating airline. Not checked against the airline collection.
    #[serde(rename = "Airline_ID")]
    pub airline_id: u64,
    /// Departure date, free text.
    #[serde(rename = "Date", default)]
    pub date: String,
    /// Departure city.
    #[serde(rename = "Start City")]
    pub start_city: String,
    /// Arrival city.
    #[serde(rename = "End City")]
    pub end_city: String,
}

fn now() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

impl Record for AvailableFlight {
    const KIND: EntityKind = EntityKind::AvailableFlight;

    const FIELDS: &'static [&'static str] = &[
        field::FLIGHT_ID,
        field::AIRLINE_ID,
        field::DATE,
        field::START_CITY,
        field::END_CITY,
    ];

    const DISPLAY_ONLY: &'static [&'static str] = &[field::FLIGHT_ID];

    fn id(&self) -> u64 {
        self.flight_id
    }

    fn from_fields(id: u64, fields: &FieldValues) -> Result<Self> {
        let airline_id = fields.required_id(field::AIRLINE_ID)?;
        let date = match fields.get(field::DATE) {
            Some(date) if !date.trim().is_empty() => date.to_string(),
            _ => now(),
        };
        Ok(Self {
            flight_id: id,
            airline_id,
            date,
            start_city: fields.required(field::START_CITY)?,
            end_city: fields.required(field::END_CITY)?,
        })
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::new()
            .with(field::FLIGHT_ID, self.flight_id.to_string())
            .with(field::AIRLINE_ID, self.airline_id.to_string())
            .with(field::DATE, self.date.as_str())
            .with(field::START_CITY, self.start_city.as_str())
            .with(field::END_CITY, self.end_city.as_str())
    }

    fn label(&self) -> String {
        format!(
            "available flight {} ({} to {})",
            self.flight_id, self.start_city, self.end_city
        )
    }
}
