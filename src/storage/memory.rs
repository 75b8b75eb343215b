use super::engine::{RecordStore, Row};
use super::Table;
use crate::core::Result;
use std::collections::HashMap;

/// Volatile store with the same contract as the file store. Every table
/// starts empty.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: HashMap<Table, Vec<Row>>,
    counters: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, table: Table, rows: Vec<Row>) -> Self {
        self.tables.insert(table, rows);
        self
    }
}

impl RecordStore for MemoryStore {
    fn read_header(&self, table: Table) -> Result<Vec<String>> {
        Ok(table.header().iter().map(|c| c.to_string()).collect())
    }

    fn read_all_rows(&self, table: Table) -> Result<Vec<Row>> {
        Ok(self.tables.get(&table).cloned().unwrap_or_default())
    }

    fn append_row(&mut self, table: Table, row: &[String]) -> Result<()> {
        self.tables
            .entry(table)
            .or_default()
            .push(row.iter().map(|f| f.trim().to_string()).collect());
        Ok(())
    }

    fn rewrite(&mut self, table: Table, rows: &[Row]) -> Result<()> {
        self.tables.insert(table, rows.to_vec());
        Ok(())
    }

    fn read_counter(&self, name: &str) -> Result<Option<u32>> {
        Ok(self.counters.get(name).copied())
    }

    fn write_counter(&mut self, name: &str, value: u32) -> Result<()> {
        self.counters.insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CinemaError;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_update_field_and_delete() {
        let mut store = MemoryStore::new().with_rows(
            Table::Auditoriums,
            vec![row(&["AUD01", "Standard", "120", "10", "12", "15.00"])],
        );

        store.update_field(Table::Auditoriums, "AUD01", 5, "18.50").unwrap();
        let found = store.find_row_by_id(Table::Auditoriums, "AUD01").unwrap().unwrap();
        assert_eq!(found[5], "18.50");

        let err = store.update_field(Table::Auditoriums, "AUD09", 5, "1").unwrap_err();
        assert!(matches!(err, CinemaError::NotFound { .. }));

        store.delete_by_id(Table::Auditoriums, "AUD01").unwrap();
        assert!(store.read_all_rows(Table::Auditoriums).unwrap().is_empty());
        assert!(store.delete_by_id(Table::Auditoriums, "AUD01").is_err());
    }

    #[test]
    fn test_update_field_rejects_unknown_column() {
        let mut store = MemoryStore::new()
            .with_rows(Table::Customers, vec![row(&["C0001", "Ana", "60123", "a@b.c", "x"])]);
        let err = store.update_field(Table::Customers, "C0001", 9, "x").unwrap_err();
        assert!(matches!(err, CinemaError::InvalidInput(_)));
    }
}
