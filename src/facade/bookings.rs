use super::Cinema;
use crate::core::{CinemaError, Result, round_cents};
use crate::models::auditorium::normalize_seat;
use crate::models::{Booking, Customer, Showtime};
use crate::storage::{IdKind, RecordStore, RecordStoreExt, next_id};
use chrono::NaiveDateTime;
use log::info;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub showtime_id: String,
    pub customer_id: String,
    pub seats: Vec<String>,
    pub normal_tickets: u32,
    pub discounted_tickets: u32,
}

impl<S: RecordStore> Cinema<S> {
    pub fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.store.load_all_or_empty()
    }

    pub fn booking(&self, id: &str) -> Result<Booking> {
        self.store.get(id)
    }

    pub fn bookings_for_customer(&self, customer_id: &str) -> Result<Vec<Booking>> {
        Ok(self
            .list_bookings()?
            .into_iter()
            .filter(|b| b.customer_id == customer_id)
            .collect())
    }

    /// Books seats for a showtime that has not started yet.
    ///
    /// Seats must exist in the auditorium and be free; one seat per ticket.
    pub fn book_tickets(&mut self, request: BookingRequest, now: NaiveDateTime) -> Result<Booking> {
        let showtime: Showtime = self.store.get(&request.showtime_id)?;
        let _customer: Customer = self.store.get(&request.customer_id)?;
        if showtime.slot().start <= now {
            return Err(CinemaError::InvalidInput(format!(
                "showtime {} has already started",
                showtime.id
            )));
        }

        let tickets = request
            .normal_tickets
            .checked_add(request.discounted_tickets)
            .ok_or_else(|| CinemaError::InvalidInput("too many tickets requested".into()))?;
        if tickets == 0 {
            return Err(CinemaError::InvalidInput("at least one ticket is required".into()));
        }
        let discounted_price = match (request.discounted_tickets, showtime.discount_ticket_price()) {
            (0, _) => 0.0,
            (_, Some(price)) => price,
            (_, None) => {
                return Err(CinemaError::InvalidInput(format!(
                    "showtime {} has no discounted tickets",
                    showtime.id
                )));
            }
        };

        let seats = request
            .seats
            .iter()
            .map(|seat| normalize_seat(seat))
            .collect::<Result<Vec<_>>>()?;
        let unique: BTreeSet<&String> = seats.iter().collect();
        if unique.len() != seats.len() {
            return Err(CinemaError::InvalidInput("a seat is listed twice".into()));
        }
        if seats.len() != tickets as usize {
            return Err(CinemaError::InvalidInput(format!(
                "{} seat(s) chosen for {} ticket(s)",
                seats.len(),
                tickets
            )));
        }

        let map = self.seat_map(&showtime.id)?;
        for seat in &seats {
            if !map.auditorium.has_seat(seat) {
                return Err(CinemaError::InvalidInput(format!(
                    "seat {} does not exist in {}",
                    seat, map.auditorium.id
                )));
            }
            if map.is_taken(seat) {
                return Err(CinemaError::InvalidInput(format!("seat {} is already booked", seat)));
            }
        }

        let total_price = round_cents(
            f64::from(request.normal_tickets) * showtime.normal_price
                + f64::from(request.discounted_tickets) * discounted_price,
        );
        let booking = Booking {
            id: next_id(&mut self.store, IdKind::Booking)?,
            showtime_id: showtime.id,
            customer_id: request.customer_id,
            seats,
            normal_tickets: request.normal_tickets,
            discounted_tickets: request.discounted_tickets,
            total_price,
        };
        self.store.insert(&booking)?;
        info!(
            "Booking {} for {}: {} seat(s), total {:.2}",
            booking.id,
            booking.showtime_id,
            booking.seats.len(),
            booking.total_price
        );
        Ok(booking)
    }

    /// Cancels a booking. With `owner` set, only that customer's booking can go.
    pub fn cancel_booking(&mut self, booking_id: &str, owner: Option<&str>) -> Result<Booking> {
        let booking: Booking = self.store.get(booking_id)?;
        if owner.is_some_and(|owner| booking.customer_id != owner) {
            return Err(CinemaError::not_found("booking", booking_id));
        }
        self.store.remove::<Booking>(booking_id)?;
        info!("Booking {} cancelled", booking_id);
        Ok(booking)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::time::{parse_date, parse_time};
    use crate::facade::customers::tests::register;
    use crate::facade::movies::tests::new_movie;
    use crate::facade::testing::{at, cinema};
    use crate::models::DiscountKind;
    use crate::storage::MemoryStore;

    /// A cinema with one discounted showtime (ST0001, AUD01, 15.00 / 12.00)
    /// on 05-06-2030 at 1000 and one registered customer (C0001).
    pub fn booked_setup() -> Cinema<MemoryStore> {
        let mut cinema = cinema();
        let movie = cinema.add_movie(new_movie("Feature", 110, true)).unwrap();
        let policy = cinema.add_discount("Flat", DiscountKind::fixed(3.0).unwrap(), "").unwrap();
        let plan = cinema
            .plan_showtime(
                &movie.id,
                parse_date("05-06-2030").unwrap(),
                parse_time("1000").unwrap(),
                at("01-06-2030", "0900"),
            )
            .unwrap();
        cinema.add_showtime(&plan, "AUD01", Some(&policy.id)).unwrap();
        register(&mut cinema, "Ana Lim");
        cinema
    }

    pub fn request(seats: &[&str], normal: u32, discounted: u32) -> BookingRequest {
        BookingRequest {
            showtime_id: "ST0001".into(),
            customer_id: "C0001".into(),
            seats: seats.iter().map(|s| s.to_string()).collect(),
            normal_tickets: normal,
            discounted_tickets: discounted,
        }
    }

    #[test]
    fn test_book_tickets_prices_and_seats() {
        let mut cinema = booked_setup();
        let now = at("02-06-2030", "1200");
        let booking = cinema.book_tickets(request(&["a1", "A02", "B03"], 2, 1), now).unwrap();
        assert_eq!(booking.id, "B0001");
        assert_eq!(booking.seats, vec!["A01", "A02", "B03"]);
        assert_eq!(booking.total_price, 42.0);

        let map = cinema.seat_map("ST0001").unwrap();
        assert!(map.is_taken("B03"));
        assert_eq!(map.free_seats(), 96 - 3);
    }

    #[test]
    fn test_book_tickets_rejections() {
        let mut cinema = booked_setup();
        let now = at("02-06-2030", "1200");
        cinema.book_tickets(request(&["A01"], 1, 0), now).unwrap();

        let rejected = [
            request(&["A01"], 1, 0),
            request(&["A02", "A02"], 2, 0),
            request(&["A02"], 2, 0),
            request(&["Z01"], 1, 0),
            request(&["A99"], 1, 0),
            request(&[], 0, 0),
            request(&["A02"], u32::MAX, 1),
        ];
        for req in rejected {
            assert!(
                matches!(cinema.book_tickets(req.clone(), now), Err(CinemaError::InvalidInput(_))),
                "{:?} should be rejected",
                req
            );
        }

        let mut unknown = request(&["A05"], 1, 0);
        unknown.customer_id = "C0404".into();
        assert!(matches!(cinema.book_tickets(unknown, now), Err(CinemaError::NotFound { .. })));

        let late = at("05-06-2030", "1000");
        assert!(cinema.book_tickets(request(&["A05"], 1, 0), late).is_err());
        assert_eq!(cinema.list_bookings().unwrap().len(), 1);
    }

    #[test]
    fn test_cancel_checks_owner() {
        let mut cinema = booked_setup();
        let now = at("02-06-2030", "1200");
        let booking = cinema.book_tickets(request(&["C01", "C02"], 2, 0), now).unwrap();

        assert!(cinema.cancel_booking(&booking.id, Some("C0002")).is_err());
        let cancelled = cinema.cancel_booking(&booking.id, Some("C0001")).unwrap();
        assert_eq!(cancelled.seats.len(), 2);
        assert!(cinema.bookings_for_customer("C0001").unwrap().is_empty());
        assert!(!cinema.seat_map("ST0001").unwrap().is_taken("C01"));
    }
}
