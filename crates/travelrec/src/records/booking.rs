use serde::{Deserialize, Serialize};

use super::{field, EntityKind, FieldValues, Record};
use crate::error::Result;

/// A client booked with an airline on a route.
///
/// Date and cities are a snapshot taken from the route at booking time.
/// None of the references are checked for existence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique sequential ID.
    #[serde(rename = "Booking_ID")]
    pub booking_id: u64,
    /// The booked client.
    #[serde(rename = "Client_ID")]
    pub client_id: u64,
    /// The airline flying the client.
    #[serde(rename = "Airline_ID", default)]
    pub airline_id: Option<u64>,
    /// The route this booking was made from.
    #[serde(rename = "Flight_ID", default)]
    pub flight_id: Option<u64>,
    /// Departure date.
    #[serde(rename = "Date", default)]
    pub date: String,
    /// Departure city.
    #[serde(rename = "Start City", default)]
    pub start_city: String,
    /// Arrival city.
    #[serde(rename = "End City", default)]
    pub end_city: String,
    /// Always `"Flight"`.
    #[serde(rename = "Type", default = "Booking::type_tag")]
    pub record_type: String,
}

impl Booking {
    /// Value of the `Type` field.
    pub const TYPE: &'static str = "Flight";

    fn type_tag() -> String {
        Self::TYPE.to_string()
    }
}

fn optional_id(id: Option<u64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

impl Record for Booking {
    const KIND: EntityKind = EntityKind::Booking;

    const FIELDS: &'static [&'static str] = &[
        field::BOOKING_ID,
        field::CLIENT_ID,
        field::AIRLINE_ID,
        field::FLIGHT_ID,
        field::DATE,
        field::START_CITY,
        field::END_CITY,
        field::TYPE,
    ];

    const DISPLAY_ONLY: &'static [&'static str] = &[field::BOOKING_ID, field::TYPE];

    fn id(&self) -> u64 {
        self.booking_id
    }

    fn search_key(&self) -> u64 {
        self.client_id
    }

    fn from_fields(id: u64, fields: &FieldValues) -> Result<Self> {
        Ok(Self {
            booking_id: id,
            client_id: fields.required_id(field::CLIENT_ID)?,
            airline_id: fields.id(field::AIRLINE_ID)?,
            flight_id: fields.id(field::FLIGHT_ID)?,
            date: fields.text(field::DATE),
            start_city: fields.text(field::START_CITY),
            end_city: fields.text(field::END_CITY),
            record_type: Self::type_tag(),
        })
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::new()
            .with(field::BOOKING_ID, self.booking_id.to_string())
            .with(field::CLIENT_ID, self.client_id.to_string())
            .with(field::AIRLINE_ID, optional_id(self.airline_id))
            .with(field::FLIGHT_ID, optional_id(self.flight_id))
            .with(field::DATE, self.date.as_str())
            .with(field::START_CITY, self.start_city.as_str())
            .with(field::END_CITY, self.end_city.as_str())
            .with(field::TYPE, self.record_type.as_str())
    }

    fn label(&self) -> String {
        format!(
            "booking {} for client {} ({} to {})",
            self.booking_id, self.client_id, self.start_city, self.end_city
        )
    }
}

/// A booking joined with the names it refers to.
///
/// Dangling references resolve to empty names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingView {
    /// The stored booking.
    #[serde(flatten)]
    pub booking: Booking,
    /// `Name` of the referenced client.
    #[serde(rename = "Client")]
    pub client_name: String,
    /// `Company Name` of the referenced airline.
    #[serde(rename = "Airline")]
    pub airline_name: String,
}

impl BookingView {
    /// Column order for joined booking rows.
    pub const FIELDS: &'static [&'static str] = &[
        field::BOOKING_ID,
        field::CLIENT_ID,
        field::CLIENT,
        field::AIRLINE_ID,
        field::AIRLINE,
        field::FLIGHT_ID,
        field::DATE,
        field::START_CITY,
        field::END_CITY,
        field::TYPE,
    ];

    /// Every booking field plus the joined names.
    #[must_use]
    pub fn to_fields(&self) -> FieldValues {
        self.booking
            .to_fields()
            .with(field::CLIENT, self.client_name.as_str())
            .with(field::AIRLINE, self.airline_name.as_str())
    }
}
