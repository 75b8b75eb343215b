use super::Table;
use crate::core::{CinemaError, Result};
use log::warn;

/// One data row as an ordered list of unquoted field values.
pub type Row = Vec<String>;

/// Record store contract - allows pluggable storage backends.
///
/// Rows never include the header line. The first field of a row is its id for
/// every table except `Table::Maintenance`, which is keyed by
/// (auditorium, equipment) and rewritten wholesale.
pub trait RecordStore {
    /// Column names from the header line
    fn read_header(&self, table: Table) -> Result<Vec<String>>;

    /// All data rows in file order
    fn read_all_rows(&self, table: Table) -> Result<Vec<Row>>;

    /// Append one row at the end of the table
    fn append_row(&mut self, table: Table, row: &[String]) -> Result<()>;

    /// Replace every data row, keeping the header
    fn rewrite(&mut self, table: Table, rows: &[Row]) -> Result<()>;

    /// Current value of a named id counter, if one was ever written
    fn read_counter(&self, name: &str) -> Result<Option<u32>>;

    fn write_counter(&mut self, name: &str, value: u32) -> Result<()>;

    fn find_row_by_id(&self, table: Table, id: &str) -> Result<Option<Row>> {
        Ok(self
            .read_all_rows(table)?
            .into_iter()
            .find(|row| row.first().map(String::as_str) == Some(id)))
    }

    /// Rows of `table`, or nothing when its file does not exist yet.
    fn read_rows_or_empty(&self, table: Table) -> Result<Vec<Row>> {
        match self.read_all_rows(table) {
            Ok(rows) => Ok(rows),
            Err(err) if err.is_missing_file() => {
                warn!("{} is missing, treating it as empty", table.file_name());
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    fn update_field(&mut self, table: Table, id: &str, field_index: usize, value: &str) -> Result<()> {
        let width = table.header().len();
        if field_index >= width {
            return Err(CinemaError::InvalidInput(format!(
                "{} has no field #{}",
                table.name(),
                field_index
            )));
        }

        let mut rows = self.read_all_rows(table)?;
        let row = rows
            .iter_mut()
            .find(|row| row.first().map(String::as_str) == Some(id))
            .ok_or_else(|| CinemaError::not_found(table.name(), id))?;
        if row.len() < width {
            row.resize(width, String::new());
        }
        row[field_index] = value.trim().to_string();
        self.rewrite(table, &rows)
    }

    fn delete_by_id(&mut self, table: Table, id: &str) -> Result<()> {
        let rows = self.read_all_rows(table)?;
        let before = rows.len();
        let kept: Vec<Row> = rows
            .into_iter()
            .filter(|row| row.first().map(String::as_str) != Some(id))
            .collect();
        if kept.len() == before {
            return Err(CinemaError::not_found(table.name(), id));
        }
        self.rewrite(table, &kept)
    }
}
