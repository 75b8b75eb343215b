use super::optional;
use crate::core::time::{format_date, format_time, parse_date, parse_time};
use crate::core::{Result, Slot, format_price, parse_price};
use crate::storage::record::field;
use crate::storage::{Record, Row, Table};
use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, PartialEq)]
pub struct Showtime {
    pub id: String,
    pub movie_id: String,
    pub auditorium_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub normal_price: f64,
    pub discounted_price: Option<f64>,
    pub discount_id: Option<String>,
}

impl Showtime {
    pub fn slot(&self) -> Slot {
        Slot::from_stored(self.date, self.start_time, self.end_time)
    }

    /// Price charged for a discounted ticket; falls back to the normal price.
    pub fn discount_ticket_price(&self) -> Option<f64> {
        self.discounted_price.filter(|price| *price > 0.0)
    }
}

impl Record for Showtime {
    const TABLE: Table = Table::Showtimes;
    const KIND: &'static str = "showtime";

    fn from_fields(fields: &[String]) -> Result<Self> {
        let get = |i| field(fields, Self::TABLE, i);
        let discounted_price = match optional(get(7)?) {
            Some(text) => Some(parse_price(&text)?),
            None => None,
        };
        Ok(Self {
            id: get(0)?.to_string(),
            movie_id: get(1)?.to_string(),
            auditorium_id: get(2)?.to_string(),
            date: parse_date(get(3)?)?,
            start_time: parse_time(get(4)?)?,
            end_time: parse_time(get(5)?)?,
            normal_price: parse_price(get(6)?)?,
            discounted_price,
            // Rows written before discounts were tracked stop at eight columns.
            discount_id: fields.get(8).and_then(|f| optional(f)),
        })
    }

    fn to_fields(&self) -> Row {
        vec![
            self.id.clone(),
            self.movie_id.clone(),
            self.auditorium_id.clone(),
            format_date(self.date),
            format_time(self.start_time),
            format_time(self.end_time),
            format_price(self.normal_price),
            self.discounted_price.map(format_price).unwrap_or_default(),
            self.discount_id.clone().unwrap_or_default(),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}
