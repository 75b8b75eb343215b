//! `Cinema`: the role operations over a record store.
//!
//! Each operation reads a fresh snapshot of the tables it needs, validates,
//! and persists with a single append or full-table rewrite. Operations that
//! compare against the current time take `now` from the caller.

mod auditoriums;
mod bookings;
mod customers;
mod discounts;
mod maintenance;
mod movies;
mod reports;
mod showtimes;

pub use auditoriums::SeatMap;
pub use bookings::BookingRequest;
pub use customers::{CustomerUpdate, NewCustomer, UpdateOutcome};
pub use discounts::DiscountChange;
pub use movies::NewMovie;
pub use reports::{BookingReportLine, RevenueSummary, ShowtimeListing};
pub use showtimes::ShowtimePlan;

use crate::config::CinemaConfig;
use crate::core::Result;
use crate::storage::{FileStore, RecordStore, Table};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::info;

pub struct Cinema<S: RecordStore = FileStore> {
    store: S,
    config: CinemaConfig,
}

impl Cinema<FileStore> {
    /// Opens the data directory named by the configuration.
    pub fn open(config: CinemaConfig) -> Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        Self::with_store(store, config)
    }

    /// Creates missing table files and seeds missing auditoriums.
    ///
    /// Returns the tables that had to be created.
    pub fn initialize(&mut self) -> Result<Vec<Table>> {
        let created = self.store.ensure_tables()?;
        let seeded = self.seed_auditoriums()?;
        info!(
            "Initialized {}: {} table(s) created, {} auditorium(s) seeded",
            self.store.data_dir().display(),
            created.len(),
            seeded
        );
        Ok(created)
    }
}

impl<S: RecordStore> Cinema<S> {
    pub fn with_store(store: S, config: CinemaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &CinemaConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// True when `date` lies entirely after `now`.
pub(crate) fn is_future_date(date: NaiveDate, now: NaiveDateTime) -> bool {
    date.and_time(NaiveTime::MIN) > now
}

/// True once the day of `date` has begun.
pub(crate) fn has_started(date: NaiveDate, now: NaiveDateTime) -> bool {
    date.and_time(NaiveTime::MIN) < now
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::time::{parse_date, parse_time};
    use crate::storage::MemoryStore;

    pub fn cinema() -> Cinema<MemoryStore> {
        let config = CinemaConfig::default().password_cost(4);
        let mut cinema = Cinema::with_store(MemoryStore::new(), config).unwrap();
        cinema.seed_auditoriums().unwrap();
        cinema
    }

    pub fn at(date: &str, hhmm: &str) -> NaiveDateTime {
        parse_date(date).unwrap().and_time(parse_time(hhmm).unwrap())
    }
}
