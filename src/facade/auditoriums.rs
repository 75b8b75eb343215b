use super::Cinema;
use crate::core::{CinemaError, Result, round_cents};
use crate::models::{Auditorium, Booking, Showtime};
use crate::storage::{RecordStore, RecordStoreExt};
use log::info;
use std::collections::BTreeSet;
use std::fmt;

/// Seat occupancy for one showtime.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatMap {
    pub showtime_id: String,
    pub auditorium: Auditorium,
    pub taken: BTreeSet<String>,
}

impl SeatMap {
    pub fn is_taken(&self, seat: &str) -> bool {
        self.taken.contains(seat)
    }

    pub fn free_seats(&self) -> usize {
        self.auditorium
            .seat_ids()
            .iter()
            .filter(|seat| !self.taken.contains(*seat))
            .count()
    }
}

impl fmt::Display for SeatMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.auditorium.seat_rows() {
            let Some(first) = row.first() else { continue };
            write!(f, "{} ", &first[..1])?;
            for seat in &row {
                f.write_str(if self.is_taken(seat) { "[X]" } else { "[ ]" })?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 1..=self.auditorium.columns {
            write!(f, "{:^3}", col)?;
        }
        writeln!(f)
    }
}

impl<S: RecordStore> Cinema<S> {
    pub fn list_auditoriums(&self) -> Result<Vec<Auditorium>> {
        self.store.load_all_or_empty()
    }

    pub fn auditorium(&self, id: &str) -> Result<Auditorium> {
        self.store.get(id)
    }

    /// Sets the normal ticket price of an auditorium. Existing showtimes keep
    /// the price they were created with.
    pub fn update_auditorium_price(&mut self, id: &str, price: f64) -> Result<Auditorium> {
        if !price.is_finite() || price < 0.0 {
            return Err(CinemaError::InvalidInput(format!(
                "price must be a non-negative amount, got {}",
                price
            )));
        }
        let mut auditorium: Auditorium = self.store.get(id)?;
        auditorium.normal_price = round_cents(price);
        self.store.replace(&auditorium)?;
        info!("Auditorium {} price set to {:.2}", auditorium.id, auditorium.normal_price);
        Ok(auditorium)
    }

    /// Adds a default-layout row for every configured auditorium that has none.
    pub fn seed_auditoriums(&mut self) -> Result<usize> {
        let existing = self.list_auditoriums()?;
        let mut seeded = 0;
        for id in self.config.scheduling.auditorium_ids.clone() {
            if existing.iter().any(|a| a.id == id) {
                continue;
            }
            let auditorium = Auditorium {
                id,
                kind: "Standard".to_string(),
                capacity: self.config.default_rows * self.config.default_columns,
                rows: self.config.default_rows,
                columns: self.config.default_columns,
                normal_price: self.config.default_price,
            };
            self.store.insert(&auditorium)?;
            seeded += 1;
        }
        Ok(seeded)
    }

    /// Seats of the showtime's auditorium with the ones already booked.
    pub fn seat_map(&self, showtime_id: &str) -> Result<SeatMap> {
        let showtime: Showtime = self.store.get(showtime_id)?;
        let auditorium: Auditorium = self.store.get(&showtime.auditorium_id)?;
        let taken = self
            .store
            .load_all_or_empty::<Booking>()?
            .into_iter()
            .filter(|b| b.showtime_id == showtime.id)
            .flat_map(|b| b.seats)
            .collect();
        Ok(SeatMap {
            showtime_id: showtime.id,
            auditorium,
            taken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::testing::cinema;

    #[test]
    fn test_seeded_auditoriums_follow_config() {
        let mut cinema = cinema();
        let auditoriums = cinema.list_auditoriums().unwrap();
        assert_eq!(auditoriums.len(), 8);
        assert_eq!(auditoriums[0].id, "AUD01");
        assert_eq!(auditoriums[0].capacity, 96);
        assert_eq!(cinema.seed_auditoriums().unwrap(), 0);
    }

    #[test]
    fn test_update_price() {
        let mut cinema = cinema();
        let updated = cinema.update_auditorium_price("AUD02", 18.456).unwrap();
        assert_eq!(updated.normal_price, 18.46);
        assert_eq!(cinema.auditorium("AUD02").unwrap().normal_price, 18.46);
        assert!(cinema.update_auditorium_price("AUD02", -1.0).is_err());
        assert!(matches!(
            cinema.update_auditorium_price("AUD42", 10.0),
            Err(CinemaError::NotFound { kind: "auditorium", .. })
        ));
    }

    #[test]
    fn test_seat_map_rendering() {
        let map = SeatMap {
            showtime_id: "ST0001".into(),
            auditorium: Auditorium {
                id: "AUD01".into(),
                kind: "Standard".into(),
                capacity: 4,
                rows: 2,
                columns: 2,
                normal_price: 10.0,
            },
            taken: ["A02".to_string()].into_iter().collect(),
        };
        assert_eq!(map.free_seats(), 3);
        let text = map.to_string();
        assert!(text.starts_with("A [ ][X]\nB [ ][ ]\n"));
    }
}
