//! Text renderings of records for the menus.

use cinemadb::core::time::{format_date, format_repair_timestamp, format_time};
use cinemadb::core::{format_price, join_list};
use cinemadb::facade::{BookingReportLine, RevenueSummary, ShowtimeListing};
use cinemadb::models::{Auditorium, Booking, DiscountPolicy, MaintenanceRecord, Movie, Showtime};

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn movie_line(movie: &Movie) -> String {
    format!(
        "{} | {} | {} | {} min | {} | {} | discount: {}",
        movie.id,
        movie.name,
        format_date(movie.release_date),
        movie.running_time,
        join_list(&movie.genres),
        movie.classification,
        if movie.discount_eligible { "Y" } else { "N" }
    )
}

pub fn movie_details(movie: &Movie) -> Vec<String> {
    vec![
        format!("Movie ID: {}", movie.id),
        format!("Movie name: {}", movie.name),
        format!("Release date: {}", format_date(movie.release_date)),
        format!("Running time: {} minutes", movie.running_time),
        format!("Genres: {}", or_na(Some(join_list(&movie.genres)))),
        format!("Classification: {}", movie.classification),
        format!("Spoken language: {}", movie.spoken_language),
        format!("Subtitle languages: {}", or_na(Some(join_list(&movie.subtitle_languages)))),
        format!("Directors: {}", or_na(Some(join_list(&movie.directors)))),
        format!("Cast: {}", or_na(Some(join_list(&movie.cast)))),
        format!("Description: {}", or_na(Some(movie.description.clone()))),
        format!("Eligible for discount: {}", if movie.discount_eligible { "Y" } else { "N" }),
    ]
}

pub fn showtime_line(showtime: &Showtime, currency: &str) -> String {
    format!(
        "{} | {} | {} | {} {}-{} | {} {} | discounted: {} | discount: {}",
        showtime.id,
        showtime.movie_id,
        showtime.auditorium_id,
        format_date(showtime.date),
        format_time(showtime.start_time),
        format_time(showtime.end_time),
        currency,
        format_price(showtime.normal_price),
        or_na(showtime.discounted_price.map(|p| format!("{} {}", currency, format_price(p)))),
        or_na(showtime.discount_id.clone())
    )
}

pub fn listing_line(listing: &ShowtimeListing, currency: &str) -> String {
    let showtime = &listing.showtime;
    format!(
        "{} | {} | {} ({}) | {} {}-{} | {} {} | discounted: {} ({})",
        showtime.id,
        or_na(listing.movie_name.clone()),
        showtime.auditorium_id,
        or_na(listing.auditorium_kind.clone()),
        format_date(showtime.date),
        format_time(showtime.start_time),
        format_time(showtime.end_time),
        currency,
        format_price(showtime.normal_price),
        or_na(showtime.discounted_price.map(format_price)),
        or_na(listing.discount_name.clone())
    )
}

pub fn discount_line(policy: &DiscountPolicy) -> String {
    format!(
        "{} | {} | {} | {}",
        policy.id,
        policy.name,
        policy.kind,
        or_na(Some(policy.policy_text.clone()))
    )
}

pub fn auditorium_line(auditorium: &Auditorium, currency: &str) -> String {
    format!(
        "{} | {} | {} seats ({} x {}) | {} {}",
        auditorium.id,
        auditorium.kind,
        auditorium.capacity,
        auditorium.rows,
        auditorium.columns,
        currency,
        format_price(auditorium.normal_price)
    )
}

pub fn booking_line(booking: &Booking, currency: &str) -> String {
    format!(
        "{} | showtime {} | customer {} | seats {} | tickets {} normal, {} discounted | {} {}",
        booking.id,
        booking.showtime_id,
        booking.customer_id,
        join_list(&booking.seats),
        booking.normal_tickets,
        booking.discounted_tickets,
        currency,
        format_price(booking.total_price)
    )
}

pub fn report_line(line: &BookingReportLine, currency: &str) -> String {
    format!(
        "{} | {} | {} {} | seats {} | {} {}",
        line.booking.id,
        or_na(line.movie_name.clone()),
        or_na(line.date.map(format_date)),
        or_na(line.start_time.map(format_time)),
        join_list(&line.booking.seats),
        currency,
        format_price(line.booking.total_price)
    )
}

pub fn revenue_lines(summary: &RevenueSummary, currency: &str) -> Vec<String> {
    vec![
        format!("Normal tickets: {} {}", currency, format_price(summary.normal)),
        format!("Discounted tickets: {} {}", currency, format_price(summary.discounted)),
        format!("Total revenue: {} {}", currency, format_price(summary.total)),
    ]
}

pub fn equipment_line(record: &MaintenanceRecord) -> String {
    match (record.is_under_maintenance(), record.repair_start, record.repair_done) {
        (true, Some(start), Some(done)) => format!(
            "{}: {} ({} to {})",
            record.equipment,
            record.status,
            format_repair_timestamp(start),
            format_repair_timestamp(done)
        ),
        _ => format!("{}: {}", record.equipment, record.status),
    }
}
