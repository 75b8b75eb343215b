//! Flat-file backend: one text file per table inside a data directory.

use super::codec::{format_row, split_line};
use super::engine::{RecordStore, Row};
use super::Table;
use crate::core::{CinemaError, Result};
use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates when needed) the data directory.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| CinemaError::store_io(&data_dir, e))?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_of(&self, table: Table) -> PathBuf {
        self.data_dir.join(table.file_name())
    }

    fn counter_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("COUNTER_{}_id.txt", name))
    }

    /// Creates every missing table file with just its header line.
    pub fn ensure_tables(&self) -> Result<Vec<Table>> {
        let mut created = Vec::new();
        for table in Table::ALL {
            let path = self.path_of(table);
            if !path.exists() {
                self.write_atomically(&path, &format!("{}\n", table.header_line()))?;
                info!("Created {}", path.display());
                created.push(table);
            }
        }
        Ok(created)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| CinemaError::store_io(path, e))
    }

    /// Writes through a temp file in the same directory, then renames over the target.
    fn write_atomically(&self, path: &Path, content: &str) -> Result<()> {
        let mut temp = NamedTempFile::new_in(&self.data_dir)
            .map_err(|e| CinemaError::store_io(&self.data_dir, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| CinemaError::store_io(temp.path(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| CinemaError::store_io(temp.path(), e))?;
        temp.persist(path)
            .map_err(|e| CinemaError::store_io(path, e.error))?;
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn read_header(&self, table: Table) -> Result<Vec<String>> {
        let text = self.read_text(&self.path_of(table))?;
        Ok(text.lines().next().map(split_line).unwrap_or_default())
    }

    fn read_all_rows(&self, table: Table) -> Result<Vec<Row>> {
        let path = self.path_of(table);
        let text = self.read_text(&path)?;
        let rows: Vec<Row> = text
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(split_line)
            .collect();
        debug!("Read {} row(s) from {}", rows.len(), path.display());
        Ok(rows)
    }

    fn append_row(&mut self, table: Table, row: &[String]) -> Result<()> {
        let path = self.path_of(table);
        let line = format_row(row);

        if !path.exists() {
            return self.write_atomically(&path, &format!("{}\n{}\n", table.header_line(), line));
        }

        let needs_newline = {
            let existing = self.read_text(&path)?;
            !existing.is_empty() && !existing.ends_with('\n')
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| CinemaError::store_io(&path, e))?;
        let mut buf = String::new();
        if needs_newline {
            buf.push('\n');
        }
        buf.push_str(&line);
        buf.push('\n');
        file.write_all(buf.as_bytes())
            .map_err(|e| CinemaError::store_io(&path, e))?;
        debug!("Appended to {}: {}", path.display(), line);
        Ok(())
    }

    fn rewrite(&mut self, table: Table, rows: &[Row]) -> Result<()> {
        let path = self.path_of(table);
        // Keep the on-disk header when there is one.
        let header = match self.read_text(&path) {
            Ok(text) => text
                .lines()
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| table.header_line()),
            Err(err) if err.is_missing_file() => table.header_line(),
            Err(err) => return Err(err),
        };

        let mut content = header;
        content.push('\n');
        for row in rows {
            content.push_str(&format_row(row));
            content.push('\n');
        }
        self.write_atomically(&path, &content)?;
        debug!("Rewrote {} with {} row(s)", path.display(), rows.len());
        Ok(())
    }

    fn read_counter(&self, name: &str) -> Result<Option<u32>> {
        let path = self.counter_path(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CinemaError::store_io(&path, e)),
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        text.parse().map(Some).map_err(|_| {
            CinemaError::Format(format!("counter file {} holds '{}'", path.display(), text))
        })
    }

    fn write_counter(&mut self, name: &str, value: u32) -> Result<()> {
        let path = self.counter_path(name);
        self.write_atomically(&path, &value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(fields: &[&str]) -> Row {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_append_creates_table_with_header() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();

        store
            .append_row(Table::Customers, &row(&["C0001", "Ana Lim", "60123", "a@b.c", "h"]))
            .unwrap();

        let text = fs::read_to_string(store.path_of(Table::Customers)).unwrap();
        assert_eq!(
            text,
            "customer_id, name, phone, email, password\nC0001, \"Ana Lim\", 60123, a@b.c, h\n"
        );
    }

    #[test]
    fn test_append_repairs_missing_trailing_newline() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        fs::write(store.path_of(Table::Auditoriums), Table::Auditoriums.header_line()).unwrap();

        store
            .append_row(Table::Auditoriums, &row(&["AUD01", "IMAX", "100", "10", "10", "20.00"]))
            .unwrap();

        let rows = store.read_all_rows(Table::Auditoriums).unwrap();
        assert_eq!(rows, vec![row(&["AUD01", "IMAX", "100", "10", "10", "20.00"])]);
    }

    #[test]
    fn test_missing_table_is_io_error_or_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        let err = store.read_all_rows(Table::Maintenance).unwrap_err();
        assert!(err.is_missing_file());
        assert!(store.read_rows_or_empty(Table::Maintenance).unwrap().is_empty());
    }

    #[test]
    fn test_update_field_keeps_quoted_neighbours() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        store
            .append_row(
                Table::Discounts,
                &row(&["D01", "Student Saver", "percentage", "", "0.10", "Students, seniors and OKU"]),
            )
            .unwrap();

        store.update_field(Table::Discounts, "D01", 4, "0.20").unwrap();

        let found = store.find_row_by_id(Table::Discounts, "D01").unwrap().unwrap();
        assert_eq!(found[1], "Student Saver");
        assert_eq!(found[4], "0.20");
        assert_eq!(found[5], "Students, seniors and OKU");
    }

    #[test]
    fn test_rewrite_keeps_header_and_blank_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        let path = store.path_of(Table::Bookings);
        fs::write(&path, "BOOKING_ID, SHOWTIME_ID\nB0001, ST0001\n\nB0002, ST0002\n").unwrap();

        assert_eq!(store.read_all_rows(Table::Bookings).unwrap().len(), 2);
        store.delete_by_id(Table::Bookings, "B0001").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "BOOKING_ID, SHOWTIME_ID\nB0002, ST0002\n");
    }

    #[test]
    fn test_counter_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.read_counter("movie").unwrap(), None);
        store.write_counter("movie", 7).unwrap();
        assert_eq!(store.read_counter("movie").unwrap(), Some(7));
        assert!(temp_dir.path().join("COUNTER_movie_id.txt").exists());
    }

    #[test]
    fn test_ensure_tables_only_creates_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();
        fs::write(store.path_of(Table::Movies), "custom header\n").unwrap();

        let created = store.ensure_tables().unwrap();
        assert_eq!(created.len(), Table::ALL.len() - 1);
        assert!(!created.contains(&Table::Movies));
        assert_eq!(
            fs::read_to_string(store.path_of(Table::Movies)).unwrap(),
            "custom header\n"
        );
    }
}
