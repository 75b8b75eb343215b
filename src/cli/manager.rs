//! Cinema manager menu: movies, showtimes, discounts, auditorium prices and reports.

use super::app::{App, split_input};
use super::ui;
use cinemadb::core::parse_price;
use cinemadb::core::time::{format_date, format_time, parse_date, parse_time};
use cinemadb::facade::{DiscountChange, NewMovie, ShowtimePlan};
use cinemadb::models::{Classification, DiscountKind, MovieField};
use cinemadb::{CinemaError, RecordStore};
use std::io::{self, BufRead, Write};

const ACTIONS: [&str; 17] = [
    "View movies",
    "Add movie",
    "Update movie",
    "Remove movie",
    "View showtimes",
    "Add showtime",
    "Update showtime",
    "Remove showtime",
    "View discount policies",
    "Add discount policy",
    "Update discount policy",
    "Remove discount policy",
    "View auditoriums",
    "Update auditorium price",
    "Booking report",
    "Revenue summary",
    "Back",
];

const SHOWTIME_FIELDS: [&str; 5] = ["Movie", "Auditorium", "Date", "Start time", "Discount policy"];
const DISCOUNT_FIELDS: [&str; 3] = ["Name", "Type and value", "Policy text"];
const DISCOUNT_TYPES: [&str; 2] = ["Fixed amount", "Percentage"];

impl<S: RecordStore, R: BufRead, W: Write> App<S, R, W> {
    pub(super) fn manager_menu(&mut self) -> io::Result<()> {
        self.action_menu("Cinema Manager", &ACTIONS, true, |app, choice| match choice {
            0 => app.view_movies(),
            1 => app.add_movie(),
            2 => app.update_movie(),
            3 => app.remove_movie(),
            4 => app.view_showtimes(),
            5 => app.add_showtime(),
            6 => app.update_showtime(),
            7 => app.remove_showtime(),
            8 => app.view_discounts(),
            9 => app.add_discount(),
            10 => app.update_discount(),
            11 => app.remove_discount(),
            12 => app.view_auditoriums(),
            13 => app.update_auditorium_price(),
            14 => app.booking_report(),
            _ => app.revenue_summary(),
        })
    }

    pub(super) fn view_movies(&mut self) -> io::Result<()> {
        let Some(movies) = self.attempt(self.cinema.list_movies())? else {
            return Ok(());
        };
        self.show_all("Movies", movies.iter().map(ui::movie_line).collect())
    }

    fn add_movie(&mut self) -> io::Result<()> {
        let range = self.cinema.config().running_time_range();
        let name = self.prompt.required("Enter movie name: ")?;
        let release_date = self.prompt.ask("Enter release date (DD-MM-YYYY): ", parse_date)?;
        let running_time = self.ask_running_time(range)?;
        let genres = split_input(&self.prompt.line("Enter genres (separate with commas): ")?);
        let classification = self.ask_classification()?;
        let spoken_language = self.prompt.required("Enter spoken language: ")?;
        let subtitle_languages =
            split_input(&self.prompt.line("Enter subtitle languages (separate with commas): ")?);
        let directors = split_input(&self.prompt.line("Enter directors (separate with commas): ")?);
        let cast = split_input(&self.prompt.line("Enter cast (separate with commas): ")?);
        let description = self.prompt.line("Enter description: ")?;
        let discount_eligible = self.prompt.yes_no("Eligible for discount? [Y/N]: ")?;

        let new = NewMovie {
            name,
            release_date,
            running_time,
            genres,
            classification,
            spoken_language,
            subtitle_languages,
            directors,
            cast,
            description,
            discount_eligible,
        };
        if !self.prompt.yes_no("Confirm and add movie? [Y/N]: ")? {
            return Ok(());
        }
        let result = self.cinema.add_movie(new);
        if let Some(movie) = self.attempt(result)? {
            self.prompt.success(format!("Movie {} added.", movie.id))?;
        }
        Ok(())
    }

    fn update_movie(&mut self) -> io::Result<()> {
        let id = self.prompt.id("Enter movie ID: ")?;
        let Some(movie) = self.attempt(self.cinema.movie(&id))? else {
            return Ok(());
        };
        for line in ui::movie_details(&movie) {
            self.prompt.say(line)?;
        }
        let field = self.prompt.choose("Select field to update: ", &MovieField::LABELS)?;
        let change = match field {
            0 => MovieField::Name(self.prompt.required("Enter new movie name: ")?),
            1 => MovieField::ReleaseDate(self.prompt.ask("Enter new release date (DD-MM-YYYY): ", parse_date)?),
            2 => {
                let range = self.cinema.config().running_time_range();
                MovieField::RunningTime(self.ask_running_time(range)?)
            }
            3 => MovieField::Genres(split_input(&self.prompt.line("Enter genres (separate with commas): ")?)),
            4 => MovieField::Classification(self.ask_classification()?),
            5 => MovieField::SpokenLanguage(self.prompt.required("Enter spoken language: ")?),
            6 => MovieField::SubtitleLanguages(split_input(
                &self.prompt.line("Enter subtitle languages (separate with commas): ")?,
            )),
            7 => MovieField::Directors(split_input(&self.prompt.line("Enter directors (separate with commas): ")?)),
            8 => MovieField::Cast(split_input(&self.prompt.line("Enter cast (separate with commas): ")?)),
            9 => MovieField::Description(self.prompt.line("Enter description: ")?),
            _ => MovieField::DiscountEligible(self.prompt.yes_no("Eligible for discount? [Y/N]: ")?),
        };
        let result = self.cinema.update_movie(&id, change);
        if let Some(movie) = self.attempt(result)? {
            self.prompt.success(format!("Movie {} updated.", movie.id))?;
        }
        Ok(())
    }

    fn remove_movie(&mut self) -> io::Result<()> {
        let id = self.prompt.id("Enter movie ID: ")?;
        let Some(movie) = self.attempt(self.cinema.movie(&id))? else {
            return Ok(());
        };
        if !self.prompt.yes_no(&format!("Remove {} ({})? [Y/N]: ", movie.id, movie.name))? {
            return Ok(());
        }
        let result = self.cinema.remove_movie(&id);
        if self.attempt(result)?.is_some() {
            self.prompt.success(format!("Movie {} removed.", id))?;
        }
        Ok(())
    }

    pub(super) fn view_showtimes(&mut self) -> io::Result<()> {
        let Some(listings) = self.attempt(self.cinema.showtime_listings())? else {
            return Ok(());
        };
        let currency = self.currency();
        self.show_all(
            "Showtimes",
            listings.iter().map(|l| ui::listing_line(l, &currency)).collect(),
        )
    }

    fn add_showtime(&mut self) -> io::Result<()> {
        let movie_id = loop {
            let id = self.prompt.id("Enter movie ID: ")?;
            if self.attempt(self.cinema.movie(&id))?.is_some() {
                break id;
            }
            if !self.try_again()? {
                return Ok(());
            }
        };

        let Some(plan) = self.plan_until_available(|app| {
            let date = app.prompt.ask("Enter date (DD-MM-YYYY): ", parse_date)?;
            let start = app.prompt.ask("Enter start time (HHMM): ", parse_time)?;
            let now = app.now();
            Ok(app.cinema.plan_showtime(&movie_id, date, start, now))
        })?
        else {
            return Ok(());
        };
        let auditorium = self.choose_auditorium(&plan)?;

        loop {
            let discount = if plan.movie.discount_eligible {
                self.ask_discount_id()?
            } else {
                None
            };
            self.say_plan(&plan, &auditorium)?;
            if !self.prompt.yes_no("Confirm and add movie showtime? [Y/N]: ")? {
                return Ok(());
            }
            match self.cinema.add_showtime(&plan, &auditorium, discount.as_deref()) {
                Ok(showtime) => {
                    return self.prompt.success(format!("Showtime {} added.", showtime.id));
                }
                Err(err @ CinemaError::NotFound { .. }) if discount.is_some() => {
                    self.prompt.report(&err)?;
                }
                Err(err) => return self.prompt.report(&err),
            }
        }
    }

    fn update_showtime(&mut self) -> io::Result<()> {
        let id = self.prompt.id("Enter showtime ID: ")?;
        let Some(showtime) = self.attempt(self.cinema.showtime(&id))? else {
            return Ok(());
        };
        let currency = self.currency();
        self.prompt.say(ui::showtime_line(&showtime, &currency))?;
        let field = self.prompt.choose("Select field to update: ", &SHOWTIME_FIELDS)?;
        let now = self.now();

        let result = match field {
            0 => {
                let movie_id = self.prompt.id("Enter new movie ID: ")?;
                self.cinema.change_showtime_movie(&id, &movie_id, now)
            }
            4 => {
                let discount = self.ask_discount_id()?;
                self.cinema.change_showtime_discount(&id, discount.as_deref(), now)
            }
            _ => {
                let Some(plan) = self.plan_until_available(|app| {
                    let date = if field == 2 {
                        app.prompt.ask("Enter new date (DD-MM-YYYY): ", parse_date)?
                    } else {
                        showtime.date
                    };
                    let start = if field == 3 {
                        app.prompt.ask("Enter new start time (HHMM): ", parse_time)?
                    } else {
                        showtime.start_time
                    };
                    let now = app.now();
                    Ok(app.cinema.plan_reschedule(&id, date, start, now))
                })?
                else {
                    return Ok(());
                };
                let auditorium = self.choose_auditorium(&plan)?;
                self.cinema.reschedule_showtime(
                    &id,
                    plan.slot.date(),
                    plan.slot.start_time(),
                    &auditorium,
                    now,
                )
            }
        };
        if let Some(showtime) = self.attempt(result)? {
            self.prompt.success("Showtime updated.")?;
            self.prompt.say(ui::showtime_line(&showtime, &currency))?;
        }
        Ok(())
    }

    fn remove_showtime(&mut self) -> io::Result<()> {
        let id = self.prompt.id("Enter showtime ID: ")?;
        let result = self.cinema.remove_showtime(&id);
        if self.attempt(result)?.is_some() {
            self.prompt.success(format!("Showtime {} removed.", id))?;
        }
        Ok(())
    }

    fn view_discounts(&mut self) -> io::Result<()> {
        let Some(policies) = self.attempt(self.cinema.list_discounts())? else {
            return Ok(());
        };
        self.show_all("Discount policies", policies.iter().map(ui::discount_line).collect())
    }

    fn add_discount(&mut self) -> io::Result<()> {
        let name = self.prompt.required("Enter discount name: ")?;
        let kind = self.ask_discount_kind()?;
        let policy_text = self.prompt.line("Enter policy description: ")?;
        let result = self.cinema.add_discount(&name, kind, &policy_text);
        if let Some(policy) = self.attempt(result)? {
            self.prompt.success(format!("Discount policy {} added.", policy.id))?;
        }
        Ok(())
    }

    fn update_discount(&mut self) -> io::Result<()> {
        let id = self.prompt.id("Enter discount ID: ")?;
        let Some(policy) = self.attempt(self.cinema.discount(&id))? else {
            return Ok(());
        };
        self.prompt.say(ui::discount_line(&policy))?;
        let change = match self.prompt.choose("Select field to update: ", &DISCOUNT_FIELDS)? {
            0 => DiscountChange::Name(self.prompt.required("Enter new name: ")?),
            1 => DiscountChange::Kind(self.ask_discount_kind()?),
            _ => DiscountChange::PolicyText(self.prompt.line("Enter policy description: ")?),
        };
        let result = self.cinema.update_discount(&id, change);
        if let Some(policy) = self.attempt(result)? {
            self.prompt.success("Discount policy updated.")?;
            self.prompt.say(ui::discount_line(&policy))?;
        }
        Ok(())
    }

    fn remove_discount(&mut self) -> io::Result<()> {
        let id = self.prompt.id("Enter discount ID: ")?;
        let result = self.cinema.remove_discount(&id);
        if self.attempt(result)?.is_some() {
            self.prompt.success(format!("Discount policy {} removed.", id))?;
        }
        Ok(())
    }

    pub(super) fn view_auditoriums(&mut self) -> io::Result<()> {
        let Some(auditoriums) = self.attempt(self.cinema.list_auditoriums())? else {
            return Ok(());
        };
        let currency = self.currency();
        self.show_all(
            "Auditoriums",
            auditoriums.iter().map(|a| ui::auditorium_line(a, &currency)).collect(),
        )
    }

    fn update_auditorium_price(&mut self) -> io::Result<()> {
        let id = self.prompt.id("Enter auditorium ID: ")?;
        let price = self.prompt.ask("Enter new normal ticket price: ", parse_price)?;
        let result = self.cinema.update_auditorium_price(&id, price);
        if let Some(auditorium) = self.attempt(result)? {
            let currency = self.currency();
            self.prompt.success("Price updated.")?;
            self.prompt.say(ui::auditorium_line(&auditorium, &currency))?;
        }
        Ok(())
    }

    fn booking_report(&mut self) -> io::Result<()> {
        let movie = self.prompt.line("Filter by movie ID (blank for all): ")?;
        let movie = (!movie.is_empty()).then(|| movie.to_uppercase());
        let Some(lines) = self.attempt(self.cinema.booking_report(movie.as_deref()))? else {
            return Ok(());
        };
        let currency = self.currency();
        self.show_all(
            "Booking report",
            lines.iter().map(|l| ui::report_line(l, &currency)).collect(),
        )
    }

    fn revenue_summary(&mut self) -> io::Result<()> {
        let Some(summary) = self.attempt(self.cinema.revenue_summary())? else {
            return Ok(());
        };
        let currency = self.currency();
        self.show_all("Revenue summary", ui::revenue_lines(&summary, &currency))
    }

    fn ask_running_time(&mut self, range: std::ops::RangeInclusive<u32>) -> io::Result<u32> {
        let label = format!(
            "Enter running time in minutes ({}-{}): ",
            range.start(),
            range.end()
        );
        self.prompt.ask(&label, |text| match text.parse::<u32>() {
            Ok(minutes) if range.contains(&minutes) => Ok(minutes),
            _ => Err(CinemaError::InvalidInput(format!(
                "running time must be a whole number between {} and {}",
                range.start(),
                range.end()
            ))),
        })
    }

    fn ask_classification(&mut self) -> io::Result<Classification> {
        let index = self.prompt.choose("Select classification: ", &Classification::ALL)?;
        Ok(Classification::ALL[index])
    }

    fn ask_discount_kind(&mut self) -> io::Result<DiscountKind> {
        match self.prompt.choose("Select discount type: ", &DISCOUNT_TYPES)? {
            0 => self.prompt.ask("Enter fixed amount: ", |text| {
                DiscountKind::fixed(parse_price(text)?)
            }),
            _ => self.prompt.ask("Enter rate (0 to 1, eg. 0.20): ", |text| {
                let rate = text
                    .parse::<f64>()
                    .map_err(|_| CinemaError::Format(format!("'{}' is not a valid rate", text)))?;
                DiscountKind::percentage(rate)
            }),
        }
    }

    fn ask_discount_id(&mut self) -> io::Result<Option<String>> {
        let id = self.prompt.line("Enter discount ID (blank for none): ")?;
        Ok((!id.is_empty()).then(|| id.to_uppercase()))
    }

    /// Repeats `plan` while the chosen slot is unavailable or in the past and
    /// the operator wants another try.
    fn plan_until_available(
        &mut self,
        mut plan: impl FnMut(&mut Self) -> io::Result<cinemadb::Result<ShowtimePlan>>,
    ) -> io::Result<Option<ShowtimePlan>> {
        loop {
            match plan(self)? {
                Ok(plan) => return Ok(Some(plan)),
                Err(err @ (CinemaError::NoAvailability { .. } | CinemaError::InvalidInput(_))) => {
                    self.prompt.report(&err)?;
                    if !self.prompt.yes_no("Change date/time? [Y/N]: ")? {
                        return Ok(None);
                    }
                }
                Err(err) => {
                    self.prompt.report(&err)?;
                    return Ok(None);
                }
            }
        }
    }

    fn choose_auditorium(&mut self, plan: &ShowtimePlan) -> io::Result<String> {
        for blocked in &plan.availability.blocked {
            self.prompt.say(format!("{} unavailable: {}", blocked.auditorium_id, blocked.reason))?;
        }
        let available = plan.available();
        let index = self.prompt.choose("Select auditorium: ", available)?;
        Ok(available[index].clone())
    }

    fn say_plan(&mut self, plan: &ShowtimePlan, auditorium: &str) -> io::Result<()> {
        self.prompt.say(format!(
            "{} ({}) in {} on {} from {} to {}",
            plan.movie.name,
            plan.movie.id,
            auditorium,
            format_date(plan.slot.date()),
            format_time(plan.slot.start_time()),
            format_time(plan.slot.end_time())
        ))
    }
}
