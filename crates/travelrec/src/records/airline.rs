use serde::{Deserialize, Serialize};

use super::{field, EntityKind, FieldValues, Record};
use crate::error::Result;

/// An airline company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    /// Unique sequential ID.
    #[serde(rename = "ID")]
    pub id: u64,
    /// Always `"Airline"`.
    #[serde(rename = "Type", default = "Airline::type_tag")]
    pub record_type: String,
    /// Company name.
    #[serde(rename = "Company Name")]
    pub company_name: String,
}

impl Airline {
    /// Value of the `Type` field.
    pub const TYPE: &'static str = "Airline";

    fn type_tag() -> String {
        Self::TYPE.to_string()
    }
}

impl Record for Airline {
    const KIND: EntityKind = EntityKind::Airline;
    const FIELDS: &'static [&'static str] = &[field::ID, field::TYPE, field::COMPANY_NAME];
    const DISPLAY_ONLY: &'static [&'static str] = &[field::ID, field::TYPE];

    fn id(&self) -> u64 {
        self.id
    }

    fn from_fields(id: u64, fields: &FieldValues) -> Result<Self> {
        Ok(Self {
            id,
            record_type: Self::type_tag(),
            company_name: fields.required(field::COMPANY_NAME)?,
        })
    }

    fn to_fields(&self) -> FieldValues {
        FieldValues::new()
            .with(field::ID, self.id.to_string())
            .with(field::TYPE, self.record_type.as_str())
            .with(field::COMPANY_NAME, self.company_name.as_str())
    }

    fn label(&self) -> String {
        format!("airline {} ({})", self.id, self.company_name)
    }
}
