//! One in-memory collection backed by one JSON file.

use std::path::{Path, PathBuf};

use tracing::info;

use super::json::{load_records, save_records};
use crate::error::{Error, Result};
use crate::records::{check_writable, id_matches, FieldValues, Record};

/// A list of records in insertion order, mirrored to a JSON file.
///
/// Every mutating call rewrites the whole file.
#[derive(Debug)]
pub struct Collection<R> {
    path: PathBuf,
    records: Vec<R>,
}

impl<R: Record> Collection<R> {
    /// Load the collection from `path`, writing an empty array there if the
    /// file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = load_records(&path)?;
        let collection = Self { path, records };
        if !collection.path.exists() {
            collection.persist()?;
        }
        Ok(collection)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The ID the next created record will get: one more than the highest
    /// ID present, or 1 when empty.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the highest ID is already `u64::MAX`.
    pub fn next_id(&self) -> Result<u64> {
        self.records
            .iter()
            .map(Record::id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| Error::internal(format!("no {} IDs left", R::KIND)))
    }

    /// Find a record by its ID as typed by the user.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| id_matches(r.id(), id))
    }

    /// Find a record by its numeric ID.
    #[must_use]
    pub fn get_by_id(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Copies of the records matching `filter` on their search key.
    ///
    /// A blank filter returns every record.
    #[must_use]
    pub fn search(&self, filter: &str) -> Vec<R> {
        if filter.trim().is_empty() {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|r| id_matches(r.search_key(), filter))
            .cloned()
            .collect()
    }

    /// Validate `fields`, append a new record and persist.
    ///
    /// Returns the assigned ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error (and writes nothing) if a field is
    /// rejected, an internal error if IDs are exhausted, or an I/O error if
    /// the file cannot be written. The collection is unchanged on error.
    pub fn insert(&mut self, fields: &FieldValues) -> Result<u64> {
        check_writable::<R>(fields)?;
        let id = self.next_id()?;
        let record = R::from_fields(id, fields)?;

        let mut records = self.records.clone();
        records.push(record);
        self.commit(records)?;
        info!("Created {} {}", R::KIND, id);
        Ok(id)
    }

    /// Overlay `changes` on the record with the given ID and persist.
    ///
    /// The updated record is fully validated before it replaces the stored
    /// one, so a rejected change leaves the collection untouched.
    ///
    /// Returns the numeric ID of the updated record.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record has that ID, a validation
    /// error if a change is rejected, or an I/O error on write failure.
    pub fn update(&mut self, id: &str, changes: &FieldValues) -> Result<u64> {
        let position = self
            .records
            .iter()
            .position(|r| id_matches(r.id(), id))
            .ok_or_else(|| Error::not_found(R::KIND, id.trim()))?;
        check_writable::<R>(changes)?;

        let current = &self.records[position];
        let mut merged = current.to_fields();
        merged.merge(changes);
        let updated = R::from_fields(current.id(), &merged)?;
        let record_id = updated.id();

        let mut records = self.records.clone();
        records[position] = updated;
        self.commit(records)?;
        info!("Updated {} {}", R::KIND, record_id);
        Ok(record_id)
    }

    /// Remove the record with the given ID and persist.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no record has that ID, or an I/O error
    /// on write failure.
    pub fn remove(&mut self, id: u64) -> Result<R> {
        let position = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Error::not_found(R::KIND, id.to_string()))?;
        let mut records = self.records.clone();
        let removed = records.remove(position);
        self.commit(records)?;
        info!("Deleted {} {}", R::KIND, id);
        Ok(removed)
    }

    /// Remove every record matching `predicate` and persist, even when
    /// nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an I/O error on write failure, leaving the collection intact.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&R) -> bool) -> Result<Vec<R>> {
        let (removed, kept): (Vec<R>, Vec<R>) =
            self.records.iter().cloned().partition(|r| predicate(r));
        self.commit(kept)?;
        Ok(removed)
    }

    /// Write `records` to disk, then adopt them. Memory is left alone if the
    /// write fails.
    fn commit(&mut self, records: Vec<R>) -> Result<()> {
        save_records(&self.path, &records)?;
        self.records = records;
        Ok(())
    }

    /// Rewrite the backing file from memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn persist(&self) -> Result<()> {
        save_records(&self.path, &self.records)
    }
}
