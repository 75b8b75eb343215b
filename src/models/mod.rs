pub mod auditorium;
pub mod booking;
pub mod customer;
pub mod discount;
pub mod maintenance;
pub mod movie;
pub mod showtime;

pub use auditorium::Auditorium;
pub use booking::Booking;
pub use customer::Customer;
pub use discount::{DiscountKind, DiscountPolicy};
pub use maintenance::{Equipment, EquipmentStatus, MaintenanceRecord};
pub use movie::{Classification, Movie, MovieField};
pub use showtime::Showtime;

use crate::core::{CinemaError, Result};

pub(crate) fn parse_yes_no(text: &str) -> Result<bool> {
    match text.trim().to_ascii_uppercase().as_str() {
        "Y" => Ok(true),
        "N" => Ok(false),
        other => Err(CinemaError::Format(format!("expected Y or N, got '{}'", other))),
    }
}

pub(crate) fn yes_no(flag: bool) -> String {
    if flag { "Y" } else { "N" }.to_string()
}

pub(crate) fn parse_count(text: &str, what: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| CinemaError::Format(format!("{} must be a whole number, got '{}'", what, text.trim())))
}

pub(crate) fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}
