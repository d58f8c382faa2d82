//! In-memory record set acting as the data-fetch collaborator.
//!
//! Records are a JSON array, assumed ordered by the key field. Offset pages
//! slice the array; cursor pages locate the record named by the cursor's
//! key and read forward or backward from it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::debug;

use folio_core::cursor::{Cursor, CursorSchema, FieldRule};
use folio_core::{
    Connection, CursorPaginator, Edge, OffsetPaginator, PageDirection, PageInput, PagingOptions,
};
use folio_core::{ConnectionArgs, PaginationResult};

/// Ordered records plus the field used as cursor key.
#[derive(Debug, Clone)]
pub struct RecordSet {
    records: Vec<Value>,
    key: String,
}

impl RecordSet {
    /// Load a JSON array of objects from `path`.
    pub fn load(path: &Path, key: impl Into<String>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read records from {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {} as JSON", path.display()))?;

        let Value::Array(records) = value else {
            bail!("{} must contain a JSON array of records", path.display());
        };

        let set = Self::from_records(records, key)?;
        debug!(records = set.len(), key = %set.key, "Loaded records");
        Ok(set)
    }

    /// Build a record set, checking every record carries the key field.
    pub fn from_records(records: Vec<Value>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if let Some(index) = records.iter().position(|r| r.get(&key).is_none()) {
            bail!("Record #{} has no \"{}\" field", index, key);
        }
        Ok(Self { records, key })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Schema used to validate cursors issued for this record set.
    pub fn cursor_schema(&self) -> CursorSchema {
        CursorSchema::new().field(FieldRule::string(self.key.as_str()).required())
    }

    pub fn cursor_paginator(
        &self,
        args: &ConnectionArgs,
        options: &PagingOptions,
    ) -> PaginationResult<CursorPaginator> {
        let schema = self.cursor_schema();
        CursorPaginator::from_args_with(args, options, |s| {
            Cursor::from_string_with_schema(s, &schema)
        })
    }

    /// Fetch the page addressed by an offset paginator.
    pub fn offset_page(&self, paginator: &OffsetPaginator) -> Connection<Edge<Value>> {
        let start = usize::try_from(paginator.start_offset())
            .unwrap_or(usize::MAX)
            .min(self.len());
        let end = start
            .saturating_add(paginator.edges_per_page() as usize)
            .min(self.len());

        let batch = self.records[start..end].to_vec();
        paginator.build(PageInput::from_nodes(batch).total_edges(self.len() as u64))
    }

    /// Fetch the page addressed by a cursor paginator.
    ///
    /// Fails when a cursor names a key that is not in the record set.
    pub fn cursor_page(&self, paginator: &CursorPaginator) -> Result<Connection<Edge<Value>>> {
        let lower = match paginator.after_cursor() {
            Some(cursor) => self.position(cursor)? + 1,
            None => 0,
        };
        let upper = match paginator.before_cursor() {
            Some(cursor) => self.position(cursor)?,
            None => self.len(),
        }
        .max(lower);

        let size = paginator.edges_per_page() as usize;
        let (start, end) = match paginator.direction() {
            PageDirection::Forward => (lower, upper.min(lower.saturating_add(size))),
            PageDirection::Backward => (upper.saturating_sub(size).max(lower), upper),
        };

        let batch = self.records[start..end].to_vec();
        let input = PageInput::from_nodes(batch)
            .total_edges(self.len() as u64)
            .has_next_page(end < self.len())
            .has_previous_page(start > 0);

        Ok(paginator.build(input, |record: &Value, _| {
            Cursor::new([(self.key.as_str(), self.key_of(record))])
        }))
    }

    fn position(&self, cursor: &Cursor) -> Result<usize> {
        let wanted = cursor
            .parameters()
            .get_str(&self.key)
            .with_context(|| format!("Cursor has no \"{}\" value", self.key))?;

        self.records
            .iter()
            .position(|record| self.key_of(record) == wanted)
            .with_context(|| format!("No record with {} = {:?}", self.key, wanted))
    }

    fn key_of(&self, record: &Value) -> String {
        match record.get(&self.key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}
