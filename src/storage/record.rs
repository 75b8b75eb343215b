use super::engine::{RecordStore, Row};
use super::Table;
use crate::core::{CinemaError, Result};

/// A typed entity stored as one row of a table.
pub trait Record: Sized {
    const TABLE: Table;

    /// Human-readable entity kind for messages ("movie", "showtime", ...).
    const KIND: &'static str;

    fn from_fields(fields: &[String]) -> Result<Self>;

    fn to_fields(&self) -> Row;

    fn id(&self) -> &str;
}

/// Reads field `index` or fails with a message naming the column.
pub(crate) fn field<'a>(fields: &'a [String], table: Table, index: usize) -> Result<&'a str> {
    fields.get(index).map(String::as_str).ok_or_else(|| {
        CinemaError::InvalidInput(format!(
            "missing column '{}'",
            table.header().get(index).copied().unwrap_or("?")
        ))
    })
}

/// Typed access on top of any [`RecordStore`].
pub trait RecordStoreExt: RecordStore {
    fn load_all<R: Record>(&self) -> Result<Vec<R>> {
        parse_rows(self.read_all_rows(R::TABLE)?)
    }

    /// Same as [`load_all`](Self::load_all) but a missing table yields no records.
    fn load_all_or_empty<R: Record>(&self) -> Result<Vec<R>> {
        parse_rows(self.read_rows_or_empty(R::TABLE)?)
    }

    /// Looks a record up by id. A missing table holds no records.
    fn find<R: Record>(&self, id: &str) -> Result<Option<R>> {
        match self.find_row_by_id(R::TABLE, id) {
            Ok(Some(row)) => R::from_fields(&row).map(Some),
            Ok(None) => Ok(None),
            Err(err) if err.is_missing_file() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Like [`find`](Self::find) but a missing record is a `NotFound` error.
    fn get<R: Record>(&self, id: &str) -> Result<R> {
        self.find(id)?
            .ok_or_else(|| CinemaError::not_found(R::KIND, id))
    }

    fn insert<R: Record>(&mut self, record: &R) -> Result<()> {
        self.append_row(R::TABLE, &record.to_fields())
    }

    /// Replaces the row carrying the same id.
    fn replace<R: Record>(&mut self, record: &R) -> Result<()> {
        let mut rows = self.read_all_rows(R::TABLE)?;
        let slot = rows
            .iter_mut()
            .find(|row| row.first().map(String::as_str) == Some(record.id()))
            .ok_or_else(|| CinemaError::not_found(R::KIND, record.id()))?;
        *slot = record.to_fields();
        self.rewrite(R::TABLE, &rows)
    }

    fn remove<R: Record>(&mut self, id: &str) -> Result<()> {
        self.delete_by_id(R::TABLE, id).map_err(|err| match err {
            CinemaError::NotFound { .. } => CinemaError::not_found(R::KIND, id),
            err if err.is_missing_file() => CinemaError::not_found(R::KIND, id),
            other => other,
        })
    }

    fn save_all<R: Record>(&mut self, records: &[R]) -> Result<()> {
        let rows: Vec<Row> = records.iter().map(Record::to_fields).collect();
        self.rewrite(R::TABLE, &rows)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}

fn parse_rows<R: Record>(rows: Vec<Row>) -> Result<Vec<R>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            R::from_fields(row).map_err(|err| CinemaError::Corrupt {
                table: R::TABLE.name(),
                row: index + 1,
                reason: err.to_string(),
            })
        })
        .collect()
}
