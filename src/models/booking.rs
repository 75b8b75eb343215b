use super::parse_count;
use crate::core::{CinemaError, Result, format_price, join_list, parse_price, split_list};
use crate::storage::record::field;
use crate::storage::{Record, Row, Table};

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub showtime_id: String,
    pub customer_id: String,
    pub seats: Vec<String>,
    pub normal_tickets: u32,
    pub discounted_tickets: u32,
    pub total_price: f64,
}

impl Booking {
    pub fn ticket_count(&self) -> u32 {
        self.normal_tickets + self.discounted_tickets
    }
}

/// Ticket counts are stored as `normal|discounted`.
fn parse_tickets(text: &str) -> Result<(u32, u32)> {
    match split_list(text).as_slice() {
        [normal] => Ok((parse_count(normal, "ticket count")?, 0)),
        [normal, discounted] => Ok((
            parse_count(normal, "ticket count")?,
            parse_count(discounted, "ticket count")?,
        )),
        _ => Err(CinemaError::Format(format!(
            "'{}' is not a ticket count like 2|1",
            text
        ))),
    }
}

impl Record for Booking {
    const TABLE: Table = Table::Bookings;
    const KIND: &'static str = "booking";

    fn from_fields(fields: &[String]) -> Result<Self> {
        let get = |i| field(fields, Self::TABLE, i);
        let (normal_tickets, discounted_tickets) = parse_tickets(get(4)?)?;
        Ok(Self {
            id: get(0)?.to_string(),
            showtime_id: get(1)?.to_string(),
            customer_id: get(2)?.to_string(),
            seats: split_list(get(3)?),
            normal_tickets,
            discounted_tickets,
            total_price: parse_price(get(5)?)?,
        })
    }

    fn to_fields(&self) -> Row {
        vec![
            self.id.clone(),
            self.showtime_id.clone(),
            self.customer_id.clone(),
            join_list(&self.seats),
            format!("{}|{}", self.normal_tickets, self.discounted_tickets),
            format_price(self.total_price),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}
