use super::{CinemaError, Result};

/// Separator for list-valued fields (genres, seats, ticket counts).
pub const LIST_SEPARATOR: char = '|';

/// Rounds to two decimal places, half away from zero.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn format_price(amount: f64) -> String {
    format!("{:.2}", round_cents(amount))
}

pub fn parse_price(text: &str) -> Result<f64> {
    let text = text.trim();
    let value: f64 = text
        .parse()
        .map_err(|_| CinemaError::Format(format!("'{}' is not a price (eg. 12.50)", text)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CinemaError::InvalidInput(format!(
            "price must be a non-negative amount, got '{}'",
            text
        )));
    }
    Ok(round_cents(value))
}

/// Splits a `|`-joined field, dropping empty items.
pub fn split_list(field: &str) -> Vec<String> {
    field
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .collect::<Vec<_>>()
        .join(&LIST_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price("12.5").unwrap(), 12.5);
        assert_eq!(parse_price(" 9.999 ").unwrap(), 10.0);
        assert!(matches!(parse_price("abc"), Err(CinemaError::Format(_))));
        assert!(matches!(parse_price("-1"), Err(CinemaError::InvalidInput(_))));
    }

    #[test]
    fn test_list_helpers() {
        assert_eq!(split_list("Action| Drama |"), vec!["Action", "Drama"]);
        assert!(split_list("").is_empty());
        assert_eq!(join_list(&["A01", "A02"]), "A01|A02");
    }
}
