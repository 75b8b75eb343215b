use super::{Cinema, has_started, is_future_date};
use crate::core::time::{format_date, format_time};
use crate::core::{CinemaError, Result, Slot};
use crate::models::{Auditorium, DiscountPolicy, MaintenanceRecord, Movie, Showtime};
use crate::scheduler::{Availability, check_availability};
use crate::storage::{IdKind, RecordStore, RecordStoreExt, next_id};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::info;

/// A proposed slot together with the auditoriums free for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowtimePlan {
    pub movie: Movie,
    pub slot: Slot,
    pub availability: Availability,
    /// Showtime being rescheduled, if any
    pub showtime_id: Option<String>,
}

impl ShowtimePlan {
    pub fn available(&self) -> &[String] {
        &self.availability.available
    }
}

impl<S: RecordStore> Cinema<S> {
    pub fn list_showtimes(&self) -> Result<Vec<Showtime>> {
        self.store.load_all_or_empty()
    }

    pub fn showtime(&self, id: &str) -> Result<Showtime> {
        self.store.get(id)
    }

    /// Runs the scheduler for a new showtime of `movie_id`.
    ///
    /// Fails with `NoAvailability` when every auditorium is taken.
    pub fn plan_showtime(
        &self,
        movie_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        now: NaiveDateTime,
    ) -> Result<ShowtimePlan> {
        check_future_date(date, now)?;
        let movie: Movie = self.store.get(movie_id)?;
        self.plan(movie, date, start_time, None)
    }

    /// Runs the scheduler for moving an existing showtime to a new date or time.
    pub fn plan_reschedule(
        &self,
        showtime_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        now: NaiveDateTime,
    ) -> Result<ShowtimePlan> {
        let showtime = self.editable_showtime(showtime_id, now)?;
        check_future_date(date, now)?;
        let movie: Movie = self.store.get(&showtime.movie_id)?;
        self.plan(movie, date, start_time, Some(showtime.id))
    }

    /// Persists a showtime in one of the plan's auditoriums.
    ///
    /// Availability is checked again against the current tables. The normal
    /// price comes from the auditorium; a discount applies only to
    /// discount-eligible movies.
    pub fn add_showtime(
        &mut self,
        plan: &ShowtimePlan,
        auditorium_id: &str,
        discount_id: Option<&str>,
    ) -> Result<Showtime> {
        let fresh = self.plan(plan.movie.clone(), plan.slot.date(), plan.slot.start_time(), None)?;
        ensure_available(&fresh, auditorium_id)?;

        let auditorium: Auditorium = self.store.get(auditorium_id)?;
        let discount = self.discount_for(&plan.movie, discount_id)?;
        let showtime = Showtime {
            id: next_id(&mut self.store, IdKind::Showtime)?,
            movie_id: plan.movie.id.clone(),
            auditorium_id: auditorium.id.clone(),
            date: fresh.slot.date(),
            start_time: fresh.slot.start_time(),
            end_time: fresh.slot.end_time(),
            normal_price: auditorium.normal_price,
            discounted_price: discount.as_ref().map(|d| d.apply(auditorium.normal_price)),
            discount_id: discount.map(|d| d.id),
        };
        self.store.insert(&showtime)?;
        info!(
            "Showtime {} for {} at {} {} in {} added",
            showtime.id,
            showtime.movie_id,
            format_time(showtime.start_time),
            format_date(showtime.date),
            showtime.auditorium_id
        );
        Ok(showtime)
    }

    /// Moves a showtime to a new date, start time and auditorium.
    ///
    /// End time and prices are recomputed; the showtime never conflicts with
    /// its own previous slot.
    pub fn reschedule_showtime(
        &mut self,
        showtime_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        auditorium_id: &str,
        now: NaiveDateTime,
    ) -> Result<Showtime> {
        let plan = self.plan_reschedule(showtime_id, date, start_time, now)?;
        ensure_available(&plan, auditorium_id)?;

        let mut showtime: Showtime = self.store.get(showtime_id)?;
        let auditorium: Auditorium = self.store.get(auditorium_id)?;
        showtime.auditorium_id = auditorium.id.clone();
        showtime.date = plan.slot.date();
        showtime.start_time = plan.slot.start_time();
        showtime.end_time = plan.slot.end_time();
        showtime.normal_price = auditorium.normal_price;
        self.refresh_discount(&mut showtime)?;

        self.store.replace(&showtime)?;
        info!(
            "Showtime {} moved to {} {} in {}",
            showtime.id,
            format_date(showtime.date),
            format_time(showtime.start_time),
            showtime.auditorium_id
        );
        Ok(showtime)
    }

    /// Swaps the movie of a showtime, keeping date, start time and auditorium.
    ///
    /// The new running time must still fit in the auditorium. A discount is
    /// dropped when the new movie is not eligible for one.
    pub fn change_showtime_movie(
        &mut self,
        showtime_id: &str,
        movie_id: &str,
        now: NaiveDateTime,
    ) -> Result<Showtime> {
        let mut showtime = self.editable_showtime(showtime_id, now)?;
        let movie: Movie = self.store.get(movie_id)?;
        let plan = self.plan(movie, showtime.date, showtime.start_time, Some(showtime.id.clone()))?;
        ensure_available(&plan, &showtime.auditorium_id)?;

        showtime.movie_id = plan.movie.id.clone();
        showtime.end_time = plan.slot.end_time();
        if !plan.movie.discount_eligible {
            showtime.discount_id = None;
        }
        self.refresh_discount(&mut showtime)?;

        self.store.replace(&showtime)?;
        info!("Showtime {} now shows {}", showtime.id, showtime.movie_id);
        Ok(showtime)
    }

    /// Sets or clears the discount policy of a showtime.
    pub fn change_showtime_discount(
        &mut self,
        showtime_id: &str,
        discount_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Showtime> {
        let mut showtime = self.editable_showtime(showtime_id, now)?;
        let movie: Movie = self.store.get(&showtime.movie_id)?;
        let discount = self.discount_for(&movie, discount_id)?;
        showtime.discounted_price = discount.as_ref().map(|d| d.apply(showtime.normal_price));
        showtime.discount_id = discount.map(|d| d.id);

        self.store.replace(&showtime)?;
        info!(
            "Showtime {} discount set to {}",
            showtime.id,
            showtime.discount_id.as_deref().unwrap_or("none")
        );
        Ok(showtime)
    }

    pub fn remove_showtime(&mut self, id: &str) -> Result<()> {
        self.store.remove::<Showtime>(id)?;
        info!("Showtime {} removed", id);
        Ok(())
    }

    fn plan(
        &self,
        movie: Movie,
        date: NaiveDate,
        start_time: NaiveTime,
        showtime_id: Option<String>,
    ) -> Result<ShowtimePlan> {
        let slot = Slot::for_runtime(date, start_time, i64::from(movie.running_time));
        let showtimes: Vec<Showtime> = self.store.load_all_or_empty()?;
        let maintenance: Vec<MaintenanceRecord> = self.store.load_all_or_empty()?;
        let availability = check_availability(
            &slot,
            showtime_id.as_deref(),
            &showtimes,
            &maintenance,
            &self.config.scheduling,
        );
        if availability.is_empty() {
            return Err(CinemaError::NoAvailability {
                date: format_date(date),
                start: format_time(start_time),
            });
        }
        Ok(ShowtimePlan {
            movie,
            slot,
            availability,
            showtime_id,
        })
    }

    fn editable_showtime(&self, id: &str, now: NaiveDateTime) -> Result<Showtime> {
        let showtime: Showtime = self.store.get(id)?;
        if has_started(showtime.date, now) {
            return Err(CinemaError::InvalidInput(format!(
                "showtime {} on {} is in the past and cannot be updated",
                showtime.id,
                format_date(showtime.date)
            )));
        }
        Ok(showtime)
    }

    fn discount_for(&self, movie: &Movie, discount_id: Option<&str>) -> Result<Option<DiscountPolicy>> {
        let Some(discount_id) = discount_id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Ok(None);
        };
        if !movie.discount_eligible {
            return Err(CinemaError::InvalidInput(format!(
                "movie {} is not eligible for discounts",
                movie.id
            )));
        }
        self.store.get(discount_id).map(Some)
    }

    /// Recomputes the discounted price from the showtime's discount policy.
    fn refresh_discount(&self, showtime: &mut Showtime) -> Result<()> {
        showtime.discounted_price = match &showtime.discount_id {
            Some(discount_id) => {
                let policy: DiscountPolicy = self.store.get(discount_id)?;
                Some(policy.apply(showtime.normal_price))
            }
            None => None,
        };
        Ok(())
    }
}

fn check_future_date(date: NaiveDate, now: NaiveDateTime) -> Result<()> {
    if !is_future_date(date, now) {
        return Err(CinemaError::InvalidInput(format!(
            "showtime date {} must be after today",
            format_date(date)
        )));
    }
    Ok(())
}

fn ensure_available(plan: &ShowtimePlan, auditorium_id: &str) -> Result<()> {
    if plan.availability.is_available(auditorium_id) {
        return Ok(());
    }
    let reason = plan
        .availability
        .blocked
        .iter()
        .find(|b| b.auditorium_id == auditorium_id)
        .map(|b| b.reason.to_string())
        .unwrap_or_else(|| "not a schedulable auditorium".to_string());
    Err(CinemaError::InvalidInput(format!(
        "auditorium {} is not available: {}",
        auditorium_id, reason
    )))
}
