use super::engine::RecordStore;
use super::Table;
use crate::core::Result;
use log::debug;

/// Entities that receive generated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Movie,
    Showtime,
    Discount,
    Customer,
    Booking,
}

impl IdKind {
    pub fn counter_name(self) -> &'static str {
        match self {
            IdKind::Movie => "movie",
            IdKind::Showtime => "showtime",
            IdKind::Discount => "discount",
            IdKind::Customer => "customer",
            IdKind::Booking => "booking",
        }
    }

    pub fn table(self) -> Table {
        match self {
            IdKind::Movie => Table::Movies,
            IdKind::Showtime => Table::Showtimes,
            IdKind::Discount => Table::Discounts,
            IdKind::Customer => Table::Customers,
            IdKind::Booking => Table::Bookings,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            IdKind::Movie => "M",
            IdKind::Showtime => "ST",
            IdKind::Discount => "D",
            IdKind::Customer => "C",
            IdKind::Booking => "B",
        }
    }

    fn width(self) -> usize {
        match self {
            IdKind::Discount => 2,
            _ => 4,
        }
    }

    pub fn format(self, number: u32) -> String {
        format!("{}{:0width$}", self.prefix(), number, width = self.width())
    }

    pub fn parse_number(self, id: &str) -> Option<u32> {
        id.strip_prefix(self.prefix())?.parse().ok()
    }
}

/// Hands out the next id for `kind` and advances its counter.
///
/// Without a counter file the sequence resumes after the highest id already
/// present in the owning table.
pub fn next_id<S: RecordStore + ?Sized>(store: &mut S, kind: IdKind) -> Result<String> {
    let number = match store.read_counter(kind.counter_name())? {
        Some(number) => number,
        None => {
            let highest = store
                .read_rows_or_empty(kind.table())?
                .iter()
                .filter_map(|row| row.first().and_then(|id| kind.parse_number(id)))
                .max()
                .unwrap_or(0);
            highest + 1
        }
    };
    store.write_counter(kind.counter_name(), number + 1)?;
    let id = kind.format(number);
    debug!("Issued {} id {}", kind.counter_name(), id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_id_formats() {
        assert_eq!(IdKind::Movie.format(1), "M0001");
        assert_eq!(IdKind::Showtime.format(42), "ST0042");
        assert_eq!(IdKind::Discount.format(3), "D03");
        assert_eq!(IdKind::Booking.parse_number("B0012"), Some(12));
        assert_eq!(IdKind::Showtime.parse_number("M0012"), None);
    }

    #[test]
    fn test_next_id_resumes_after_existing_rows() {
        let mut store = MemoryStore::new().with_rows(
            Table::Movies,
            vec![vec!["M0007".to_string()], vec!["M0003".to_string()]],
        );
        assert_eq!(next_id(&mut store, IdKind::Movie).unwrap(), "M0008");
        assert_eq!(next_id(&mut store, IdKind::Movie).unwrap(), "M0009");
        assert_eq!(next_id(&mut store, IdKind::Discount).unwrap(), "D01");
    }
}
