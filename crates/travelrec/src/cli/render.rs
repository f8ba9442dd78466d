//! Text and JSON rendering of record rows.

use crate::error::Result;
use crate::records::{
    is_id_field, Airline, AvailableFlight, BookingView, Client, EntityKind, FieldValues, Record,
};

use super::OutputFormat;

/// Column order used when showing records of the given kind.
#[must_use]
pub fn columns(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Client => Client::FIELDS,
        EntityKind::Airline => Airline::FIELDS,
        EntityKind::AvailableFlight => AvailableFlight::FIELDS,
        EntityKind::Booking => BookingView::FIELDS,
    }
}

/// Formats rows for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    id_width: usize,
}

impl Renderer {
    /// Create a renderer padding IDs to `id_width` digits.
    #[must_use]
    pub fn new(id_width: usize) -> Self {
        Self { id_width }
    }

    /// Zero-pad an ID.
    #[must_use]
    pub fn id(&self, id: u64) -> String {
        format!("{id:0width$}", width = self.id_width)
    }

    /// Display form of one value: integer `*ID` values are zero-padded,
    /// everything else is shown as stored.
    #[must_use]
    pub fn cell(&self, name: &str, value: &str) -> String {
        if is_id_field(name) {
            if let Ok(id) = value.parse::<u64>() {
                return self.id(id);
            }
        }
        value.to_string()
    }

    /// Render rows in the requested format.
    ///
    /// JSON output keeps the stored values unpadded.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(
        &self,
        format: OutputFormat,
        columns: &[&str],
        rows: &[FieldValues],
    ) -> Result<String> {
        match format {
            OutputFormat::Plain => Ok(self.plain(columns, rows)),
            OutputFormat::Table => Ok(self.table(columns, rows)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        }
    }

    fn plain(&self, columns: &[&str], rows: &[FieldValues]) -> String {
        let label_width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0) + 1;
        rows.iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|name| {
                        let label = format!("{name}:");
                        let value = self.cell(name, &row.text(name));
                        format!("{label:<label_width$} {value}").trim_end().to_string()
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn table(&self, columns: &[&str], rows: &[FieldValues]) -> String {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|name| self.cell(name, &row.text(name)))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |values: &[String]| {
            values
                .iter()
                .zip(&widths)
                .map(|(value, &width)| format!("{value:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let header: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut out = vec![line(header.as_slice()), line(rule.as_slice())];
        out.extend(cells.iter().map(|row| line(row.as_slice())));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airline_rows() -> Vec<FieldValues> {
        vec![
            FieldValues::new()
                .with("ID", "1")
                .with("Type", "Airline")
                .with("Company Name", "Delta"),
            FieldValues::new()
                .with("ID", "12")
                .with("Type", "Airline")
                .with("Company Name", "KLM"),
        ]
    }

    #[test]
    fn test_id_padding() {
        let renderer = Renderer::new(9);
        assert_eq!(renderer.id(1), "000000001");
        assert_eq!(renderer.id(1_234_567_890), "1234567890");
        assert_eq!(Renderer::new(3).id(7), "007");
    }

    #[test]
    fn test_cell_pads_only_integer_ids() {
        let renderer = Renderer::new(4);
        assert_eq!(renderer.cell("Client_ID", "5"), "0005");
        assert_eq!(renderer.cell("Airline_ID", ""), "");
        assert_eq!(renderer.cell("Zip Code", "42"), "42");
        assert_eq!(renderer.cell("Client", "Jane"), "Jane");
    }

    #[test]
    fn test_table() {
        let out = Renderer::new(3)
            .render(OutputFormat::Table, Airline::FIELDS, &airline_rows())
            .unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "ID   Type     Company Name");
        assert_eq!(lines[1], "---  -------  ------------");
        assert_eq!(lines[2], "001  Airline  Delta");
        assert_eq!(lines[3], "012  Airline  KLM");
    }

    #[test]
    fn test_plain() {
        let out = Renderer::new(3)
            .render(OutputFormat::Plain, Airline::FIELDS, &airline_rows()[..1])
            .unwrap();
        assert_eq!(
            out,
            "ID:           001\nType:         Airline\nCompany Name: Delta"
        );
    }

    #[test]
    fn test_json_keeps_raw_values() {
        let out = Renderer::new(9)
            .render(OutputFormat::Json, Airline::FIELDS, &airline_rows())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["ID"], "1");
        assert_eq!(value[1]["Company Name"], "KLM");
    }

    #[test]
    fn test_booking_columns_include_names() {
        let cols = columns(EntityKind::Booking);
        assert!(cols.contains(&"Client"));
        assert!(cols.contains(&"Airline"));
        assert_eq!(columns(EntityKind::Client)[0], "ID");
    }
}
