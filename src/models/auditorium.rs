use super::parse_count;
use crate::core::{CinemaError, Result, format_price, parse_price};
use crate::storage::record::field;
use crate::storage::{Record, Row, Table};

/// Highest row letter a layout can use.
const MAX_ROWS: u32 = 26;

#[derive(Debug, Clone, PartialEq)]
pub struct Auditorium {
    pub id: String,
    /// Hall type shown to operators, eg. `IMAX` or `Standard`.
    pub kind: String,
    pub capacity: u32,
    pub rows: u32,
    pub columns: u32,
    pub normal_price: f64,
}

impl Auditorium {
    /// Seat ids in row-major order: `A01`, `A02`, ..., `B01`, ...
    pub fn seat_ids(&self) -> Vec<String> {
        (0..self.rows.min(MAX_ROWS))
            .flat_map(|row| (1..=self.columns).map(move |col| seat_id(row, col)))
            .collect()
    }

    pub fn has_seat(&self, seat: &str) -> bool {
        parse_seat(seat).is_some_and(|(row, col)| row < self.rows && col >= 1 && col <= self.columns)
    }

    /// Rows of seat ids, for rendering a seat map.
    pub fn seat_rows(&self) -> Vec<Vec<String>> {
        (0..self.rows.min(MAX_ROWS))
            .map(|row| (1..=self.columns).map(|col| seat_id(row, col)).collect())
            .collect()
    }
}

fn seat_id(row: u32, col: u32) -> String {
    let letter = char::from(b'A' + row as u8);
    format!("{}{:02}", letter, col)
}

fn parse_seat(seat: &str) -> Option<(u32, u32)> {
    let seat = seat.trim().to_ascii_uppercase();
    let mut chars = seat.chars();
    let letter = chars.next().filter(char::is_ascii_uppercase)?;
    let col: u32 = chars.as_str().parse().ok()?;
    Some((u32::from(letter) - u32::from('A'), col))
}

/// Canonical form of operator-typed seat text (`a1` becomes `A01`).
pub fn normalize_seat(seat: &str) -> Result<String> {
    parse_seat(seat)
        .filter(|(row, _)| *row < MAX_ROWS)
        .map(|(row, col)| seat_id(row, col))
        .ok_or_else(|| CinemaError::Format(format!("'{}' is not a seat like A01", seat.trim())))
}

impl Record for Auditorium {
    const TABLE: Table = Table::Auditoriums;
    const KIND: &'static str = "auditorium";

    fn from_fields(fields: &[String]) -> Result<Self> {
        let get = |i| field(fields, Self::TABLE, i);
        Ok(Self {
            id: get(0)?.to_string(),
            kind: get(1)?.to_string(),
            capacity: parse_count(get(2)?, "capacity")?,
            rows: parse_count(get(3)?, "rows")?,
            columns: parse_count(get(4)?, "columns")?,
            normal_price: parse_price(get(5)?)?,
        })
    }

    fn to_fields(&self) -> Row {
        vec![
            self.id.clone(),
            self.kind.clone(),
            self.capacity.to_string(),
            self.rows.to_string(),
            self.columns.to_string(),
            format_price(self.normal_price),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}
