pub mod error;
pub mod time;
pub mod types;

pub use error::{CinemaError, Result};
pub use time::Slot;
pub use types::{format_price, parse_price, round_cents, split_list, join_list};
