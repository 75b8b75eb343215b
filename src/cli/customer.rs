//! Customer menu: registration, login and the logged-in session.

use super::app::App;
use super::ui;
use cinemadb::RecordStore;
use cinemadb::facade::{CustomerUpdate, NewCustomer};
use cinemadb::models::Customer;
use std::io::{self, BufRead, Write};

const ACTIONS: [&str; 3] = ["Register", "Login", "Back"];

const SESSION_ACTIONS: [&str; 6] = [
    "View showtimes",
    "Book tickets",
    "Cancel booking",
    "Booking history",
    "Update details",
    "Logout",
];

fn blank_as_none(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

impl<S: RecordStore, R: BufRead, W: Write> App<S, R, W> {
    pub(super) fn customer_menu(&mut self) -> io::Result<()> {
        self.action_menu("Customer", &ACTIONS, false, |app, choice| match choice {
            0 => app.register(),
            _ => match app.login()? {
                Some(customer) => app.session(customer),
                None => Ok(()),
            },
        })
    }

    fn register(&mut self) -> io::Result<()> {
        loop {
            let new = NewCustomer {
                name: self.prompt.required("Enter name: ")?,
                phone: self.prompt.required("Enter phone number (eg. 60123456789): ")?,
                email: self.prompt.required("Enter email: ")?,
                password: self.prompt.required("Enter password: ")?,
                confirm_password: self.prompt.required("Confirm password: ")?,
            };
            let result = self.cinema.register_customer(new);
            match self.attempt(result)? {
                Some(customer) => {
                    return self.prompt.success(format!(
                        "Registered. Your customer ID is {}.",
                        customer.id
                    ));
                }
                None if self.try_again()? => continue,
                None => return Ok(()),
            }
        }
    }

    fn login(&mut self) -> io::Result<Option<Customer>> {
        loop {
            let id = self.prompt.id("Enter customer ID: ")?;
            let password = self.prompt.required("Enter password: ")?;
            if let Some(customer) = self.attempt(self.cinema.login(&id, &password))? {
                self.prompt.success(format!("Welcome, {}.", customer.name))?;
                return Ok(Some(customer));
            }
            if !self.try_again()? {
                return Ok(None);
            }
        }
    }

    fn session(&mut self, mut customer: Customer) -> io::Result<()> {
        let title = format!("Customer {} ({})", customer.name, customer.id);
        self.action_menu(&title, &SESSION_ACTIONS, false, |app, choice| match choice {
            0 => app.view_showtimes(),
            1 => app.book_for(&customer.id),
            2 => app.cancel_for(Some(&customer.id)),
            3 => app.booking_history(&customer.id),
            _ => {
                if let Some(updated) = app.update_details(&customer.id)? {
                    customer = updated;
                }
                Ok(())
            }
        })
    }

    fn booking_history(&mut self, customer_id: &str) -> io::Result<()> {
        let Some(bookings) = self.attempt(self.cinema.bookings_for_customer(customer_id))? else {
            return Ok(());
        };
        let currency = self.currency();
        self.show_all(
            "Booking history",
            bookings.iter().map(|b| ui::booking_line(b, &currency)).collect(),
        )
    }

    fn update_details(&mut self, customer_id: &str) -> io::Result<Option<Customer>> {
        self.prompt.say("Leave a field blank to keep its current value.")?;
        let name = blank_as_none(self.prompt.line("New name: ")?);
        let phone = blank_as_none(self.prompt.line("New phone number: ")?);
        let email = blank_as_none(self.prompt.line("New email: ")?);
        let password = if self.prompt.yes_no("Change password? [Y/N]: ")? {
            let password = self.prompt.required("New password: ")?;
            let confirmation = self.prompt.required("Confirm new password: ")?;
            Some((password, confirmation))
        } else {
            None
        };

        let update = CustomerUpdate {
            name,
            phone,
            email,
            password,
        };
        let result = self.cinema.update_customer(customer_id, update);
        let Some(outcome) = self.attempt(result)? else {
            return Ok(None);
        };
        for field in &outcome.ignored {
            self.prompt.error(format!("Invalid {}; the current value was kept.", field))?;
        }
        self.prompt.success("Details updated.")?;
        Ok(Some(outcome.customer))
    }
}
