//! Ticketing clerk menu, plus the booking steps shared with customers.

use super::app::{App, split_input};
use super::ui;
use cinemadb::facade::BookingRequest;
use cinemadb::{CinemaError, RecordStore};
use std::io::{self, BufRead, Write};

const ACTIONS: [&str; 7] = [
    "View movies",
    "View showtimes",
    "View auditoriums",
    "View bookings",
    "Book tickets",
    "Cancel booking",
    "Back",
];

impl<S: RecordStore, R: BufRead, W: Write> App<S, R, W> {
    pub(super) fn clerk_menu(&mut self) -> io::Result<()> {
        self.action_menu("Ticketing Clerk", &ACTIONS, false, |app, choice| match choice {
            0 => app.view_movies(),
            1 => app.view_showtimes(),
            2 => app.view_auditoriums(),
            3 => app.view_bookings(),
            4 => {
                let customer_id = app.prompt.id("Enter customer ID: ")?;
                if app.attempt(app.cinema.customer(&customer_id))?.is_none() {
                    return Ok(());
                }
                app.book_for(&customer_id)
            }
            _ => app.cancel_for(None),
        })
    }

    fn view_bookings(&mut self) -> io::Result<()> {
        let Some(bookings) = self.attempt(self.cinema.list_bookings())? else {
            return Ok(());
        };
        let currency = self.currency();
        self.show_all(
            "Bookings",
            bookings.iter().map(|b| ui::booking_line(b, &currency)).collect(),
        )
    }

    /// Seat selection and ticket counts for one booking. Rejected requests
    /// can be corrected and resubmitted.
    pub(super) fn book_for(&mut self, customer_id: &str) -> io::Result<()> {
        let showtime_id = self.prompt.id("Enter showtime ID: ")?;
        let Some(showtime) = self.attempt(self.cinema.showtime(&showtime_id))? else {
            return Ok(());
        };
        let currency = self.currency();
        self.prompt.say(ui::showtime_line(&showtime, &currency))?;

        loop {
            let Some(seat_map) = self.attempt(self.cinema.seat_map(&showtime_id))? else {
                return Ok(());
            };
            self.prompt.say(&seat_map)?;
            self.prompt.say(format!("{} seats free.", seat_map.free_seats()))?;

            let normal_tickets = self.prompt.number::<u32>("Number of normal tickets: ")?;
            let discounted_tickets = if showtime.discounted_price.is_some() {
                self.prompt.number::<u32>("Number of discounted tickets: ")?
            } else {
                0
            };
            let seats = split_input(&self.prompt.line("Enter seats (eg. A01,A02): ")?);
            let request = BookingRequest {
                showtime_id: showtime_id.clone(),
                customer_id: customer_id.to_string(),
                seats,
                normal_tickets,
                discounted_tickets,
            };
            if !self.prompt.yes_no("Confirm booking? [Y/N]: ")? {
                return Ok(());
            }

            let now = self.now();
            match self.cinema.book_tickets(request, now) {
                Ok(booking) => {
                    self.prompt.success(format!("Booking {} confirmed.", booking.id))?;
                    return self.prompt.say(ui::booking_line(&booking, &currency));
                }
                Err(err @ CinemaError::InvalidInput(_)) => {
                    self.prompt.report(&err)?;
                    if !self.try_again()? {
                        return Ok(());
                    }
                }
                Err(err) => return self.prompt.report(&err),
            }
        }
    }

    /// Cancels a booking; with an owner, only that customer's bookings qualify.
    pub(super) fn cancel_for(&mut self, owner: Option<&str>) -> io::Result<()> {
        let id = self.prompt.id("Enter booking ID: ")?;
        let result = self.cinema.cancel_booking(&id, owner);
        if let Some(booking) = self.attempt(result)? {
            self.prompt.success(format!("Booking {} cancelled.", booking.id))?;
        }
        Ok(())
    }
}
