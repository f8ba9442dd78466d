use serde::{Deserialize, Serialize};

use super::{field, EntityKind, FieldValues, Record};
use crate::error::Result;

/// An agency client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique sequential ID.
    #[serde(rename = "ID")]
    pub id: u64,
    /// Always `"Client"`.
    #[serde(rename = "Type", default = "Client::type_tag")]
    pub record_type: String,
    /// Full name.
    #[serde(rename = "Name")]
    pub name: String,
    /// First address line.
    #[serde(rename = "Address Line 1")]
    pub address_line_1: String,
    /// Second address line.
    #[serde(rename = "Address Line 2", default)]
    pub address_line_2: String,
    /// Third address line.
    #[serde(rename = "Address Line 3", default)]
    pub address_line_3: String,
    /// City.
    #[serde(rename = "City")]
    pub city: String,
    /// State or region.
    #[serde(rename = "State", default)]
    pub state: String,
    /// Postal code.
    #[serde(rename = "Zip Code")]
    pub zip_code: String,
    /// Country.
    #[serde(rename = "Country")]
    pub country: String,
    /// Phone number.
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
}

impl Client {
    /// Value of the `Type` field.
    pub const TYPE: &'static str = "Client";

    fn type_tag() -> String {
        Self::TYPE.to_string()
    }
}

impl Record for Client {
    const KIND: EntityKind = EntityKind::Client;

    const FIELDS: &'static [&'static str] = &[
        field::ID,
        field::TYPE,
        field::NAME,
        field::ADDRESS_LINE_1,
        field::ADDRESS_LINE_2,
        field::ADDRESS_LINE_3,
        field::CITY,
        field::STATE,
        field::ZIP_CODE,
        field::COUNTRY,
        field::PHONE_NUMBER,
    ];

    const DISPLAY_ONLY: &'static [&'static str] = &[field::ID, field::TYPE];

    fn id(&self) -> u64 {
        self.id
    }

    fn from_fields(id: u64, fields: &FieldValues) -> Result<Self> {
        Ok(Self {
            id,
            record_type: Self::type_tag(),
            name: fields.required(field::NAME)?,
            address_line_1: fields.required(field::ADDRESS_LINE_1)?,
            address_line_2: fields.text(field::ADDRESS_LINE_2),
            address_line_3: fields.text(field::ADDRESS_LINE_3),
            city: fields.required(field::CITY)?,
            state: fields.text(field::STATE),
            zip_code: fields.required(field::ZIP_CODE)?,
            country: fields.required(field::COUNTRY)?,
            phone_number: fields.required(field::PHONE_NUMBER)?,
        })
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::new()
            .with(field::ID, self.id.to_string())
            .with(field::TYPE, self.record_type.as_str())
            .with(field::NAME, self.name.as_str())
            .with(field::ADDRESS_LINE_1, self.address_line_1.as_str())
            .with(field::ADDRESS_LINE_2, self.address_line_2.as_str())
            .with(field::ADDRESS_LINE_3, self.address_line_3.as_str())
            .with(field::CITY, self.city.as_str())
            .with(field::STATE, self.state.as_str())
            .with(field::ZIP_CODE, self.zip_code.as_str())
            .with(field::COUNTRY, self.country.as_str())
            .with(field::PHONE_NUMBER, self.phone_number.as_str())
    }

    fn label(&self) -> String {
        format!("client {} ({})", self.id, self.name)
    }
}
