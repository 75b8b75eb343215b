use super::Cinema;
use crate::core::{Result, round_cents};
use crate::models::{Auditorium, Booking, DiscountPolicy, Movie, Showtime};
use crate::storage::{RecordStore, RecordStoreExt};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

/// A booking joined with what it is for.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReportLine {
    pub booking: Booking,
    pub movie_id: Option<String>,
    pub movie_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueSummary {
    pub normal: f64,
    pub discounted: f64,
    pub total: f64,
}

/// A showtime as customers see it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowtimeListing {
    pub showtime: Showtime,
    pub movie_name: Option<String>,
    pub auditorium_kind: Option<String>,
    pub discount_name: Option<String>,
}

fn by_id<R, K: Fn(&R) -> &str>(records: Vec<R>, key: K) -> HashMap<String, R> {
    records.into_iter().map(|r| (key(&r).to_string(), r)).collect()
}

impl<S: RecordStore> Cinema<S> {
    /// Every booking with its movie, date and start time. Bookings whose
    /// showtime or movie is gone are kept with the missing parts empty.
    pub fn booking_report(&self, movie_id: Option<&str>) -> Result<Vec<BookingReportLine>> {
        let showtimes = by_id(self.store.load_all_or_empty::<Showtime>()?, |s| s.id.as_str());
        let movies = by_id(self.store.load_all_or_empty::<Movie>()?, |m| m.id.as_str());

        let lines = self
            .store
            .load_all_or_empty::<Booking>()?
            .into_iter()
            .map(|booking| {
                let showtime = showtimes.get(&booking.showtime_id);
                let movie = showtime.and_then(|s| movies.get(&s.movie_id));
                BookingReportLine {
                    movie_id: showtime.map(|s| s.movie_id.clone()),
                    movie_name: movie.map(|m| m.name.clone()),
                    date: showtime.map(|s| s.date),
                    start_time: showtime.map(|s| s.start_time),
                    booking,
                }
            })
            .filter(|line| movie_id.is_none_or(|id| line.movie_id.as_deref() == Some(id)))
            .collect();
        Ok(lines)
    }

    /// Ticket revenue split by price class. Bookings of deleted showtimes count zero.
    pub fn revenue_summary(&self) -> Result<RevenueSummary> {
        let showtimes = by_id(self.store.load_all_or_empty::<Showtime>()?, |s| s.id.as_str());
        let mut summary = RevenueSummary::default();
        for booking in self.store.load_all_or_empty::<Booking>()? {
            let Some(showtime) = showtimes.get(&booking.showtime_id) else {
                continue;
            };
            summary.normal += f64::from(booking.normal_tickets) * showtime.normal_price;
            summary.discounted +=
                f64::from(booking.discounted_tickets) * showtime.discounted_price.unwrap_or(0.0);
        }
        summary.normal = round_cents(summary.normal);
        summary.discounted = round_cents(summary.discounted);
        summary.total = round_cents(summary.normal + summary.discounted);
        Ok(summary)
    }

    pub fn showtime_listings(&self) -> Result<Vec<ShowtimeListing>> {
        let movies = by_id(self.store.load_all_or_empty::<Movie>()?, |m| m.id.as_str());
        let auditoriums = by_id(self.store.load_all_or_empty::<Auditorium>()?, |a| a.id.as_str());
        let discounts = by_id(self.store.load_all_or_empty::<DiscountPolicy>()?, |d| d.id.as_str());

        Ok(self
            .list_showtimes()?
            .into_iter()
            .map(|showtime| ShowtimeListing {
                movie_name: movies.get(&showtime.movie_id).map(|m| m.name.clone()),
                auditorium_kind: auditoriums.get(&showtime.auditorium_id).map(|a| a.kind.clone()),
                discount_name: showtime
                    .discount_id
                    .as_ref()
                    .and_then(|id| discounts.get(id))
                    .map(|d| d.name.clone()),
                showtime,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::facade::bookings::tests::{booked_setup, request};
    use crate::facade::testing::at;

    #[test]
    fn test_report_and_revenue() {
        let mut cinema = booked_setup();
        let now = at("02-06-2030", "1200");
        cinema.book_tickets(request(&["A01", "A02"], 1, 1), now).unwrap();
        cinema.book_tickets(request(&["B01"], 1, 0), now).unwrap();

        let report = cinema.booking_report(None).unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].movie_name.as_deref(), Some("Feature"));
        assert!(cinema.booking_report(Some("M0404")).unwrap().is_empty());
        assert_eq!(cinema.booking_report(Some("M0001")).unwrap().len(), 2);

        let summary = cinema.revenue_summary().unwrap();
        assert_eq!(summary.normal, 30.0);
        assert_eq!(summary.discounted, 12.0);
        assert_eq!(summary.total, 42.0);

        cinema.remove_showtime("ST0001").unwrap();
        assert_eq!(cinema.revenue_summary().unwrap().total, 0.0);
        let orphaned = cinema.booking_report(None).unwrap();
        assert_eq!(orphaned.len(), 2);
        assert_eq!(orphaned[0].movie_name, None);
    }

    #[test]
    fn test_showtime_listings_join_names() {
        let cinema = booked_setup();
        let listings = cinema.showtime_listings().unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].movie_name.as_deref(), Some("Feature"));
        assert_eq!(listings[0].auditorium_kind.as_deref(), Some("Standard"));
        assert_eq!(listings[0].discount_name.as_deref(), Some("Flat"));
    }
}
