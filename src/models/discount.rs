use super::optional;
use crate::core::{CinemaError, Result, format_price, parse_price, round_cents};
use crate::storage::record::field;
use crate::storage::{Record, Row, Table};
use std::fmt;

/// How a discount policy reduces the normal price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscountKind {
    /// Flat amount taken off the normal price.
    Fixed { amount: f64 },
    /// Fraction (0..1) taken off the normal price.
    Percentage { rate: f64 },
}

impl DiscountKind {
    pub fn fixed(amount: f64) -> Result<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CinemaError::InvalidInput(format!(
                "discount amount must not be negative, got {}",
                amount
            )));
        }
        Ok(DiscountKind::Fixed { amount: round_cents(amount) })
    }

    pub fn percentage(rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(CinemaError::InvalidInput(format!(
                "discount rate must be between 0 and 1, got {}",
                rate
            )));
        }
        Ok(DiscountKind::Percentage { rate })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DiscountKind::Fixed { .. } => "fixed",
            DiscountKind::Percentage { .. } => "percentage",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Fixed { amount } => write!(f, "fixed {:.2} off", amount),
            DiscountKind::Percentage { rate } => write!(f, "{:.0}% off", rate * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPolicy {
    pub id: String,
    pub name: String,
    pub kind: DiscountKind,
    /// Free text; may contain commas.
    pub policy_text: String,
}

impl DiscountPolicy {
    /// Discounted price for `normal_price`, rounded to cents and never below zero.
    pub fn apply(&self, normal_price: f64) -> f64 {
        let discounted = match self.kind {
            DiscountKind::Fixed { amount } => normal_price - amount,
            DiscountKind::Percentage { rate } => normal_price * (1.0 - rate),
        };
        round_cents(discounted.max(0.0))
    }
}

impl Record for DiscountPolicy {
    const TABLE: Table = Table::Discounts;
    const KIND: &'static str = "discount";

    fn from_fields(fields: &[String]) -> Result<Self> {
        let get = |i| field(fields, Self::TABLE, i);
        let kind = match get(2)?.trim() {
            "fixed" => {
                let amount = optional(get(3)?)
                    .ok_or_else(|| CinemaError::Format("fixed discount without an amount".into()))?;
                DiscountKind::fixed(parse_price(&amount)?)?
            }
            "percentage" => {
                let rate = optional(get(4)?)
                    .ok_or_else(|| CinemaError::Format("percentage discount without a rate".into()))?;
                let rate: f64 = rate
                    .parse()
                    .map_err(|_| CinemaError::Format(format!("invalid discount rate '{}'", rate)))?;
                DiscountKind::percentage(rate)?
            }
            other => {
                return Err(CinemaError::Format(format!("unknown discount type '{}'", other)));
            }
        };
        Ok(Self {
            id: get(0)?.to_string(),
            name: get(1)?.to_string(),
            kind,
            policy_text: get(5)?.to_string(),
        })
    }

    fn to_fields(&self) -> Row {
        let (amount, rate) = match self.kind {
            DiscountKind::Fixed { amount } => (format_price(amount), String::new()),
            DiscountKind::Percentage { rate } => (String::new(), format!("{:.2}", rate)),
        };
        vec![
            self.id.clone(),
            self.name.clone(),
            self.kind.type_name().to_string(),
            amount,
            rate,
            self.policy_text.clone(),
        ]
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::codec::{format_row, split_line};

    fn policy(kind: DiscountKind) -> DiscountPolicy {
        DiscountPolicy {
            id: "D01".into(),
            name: "Student Saver".into(),
            kind,
            policy_text: "Students, seniors and OKU with valid cards".into(),
        }
    }

    #[test]
    fn test_apply_fixed_and_percentage() {
        assert_eq!(policy(DiscountKind::fixed(3.0).unwrap()).apply(15.0), 12.0);
        assert_eq!(policy(DiscountKind::percentage(0.1).unwrap()).apply(15.0), 13.5);
        assert_eq!(policy(DiscountKind::percentage(0.333).unwrap()).apply(10.0), 6.67);
    }

    #[test]
    fn test_apply_never_goes_negative() {
        assert_eq!(policy(DiscountKind::fixed(25.0).unwrap()).apply(12.0), 0.0);
    }

    #[test]
    fn test_rate_out_of_range_is_rejected() {
        assert!(DiscountKind::percentage(1.5).is_err());
        assert!(DiscountKind::fixed(-1.0).is_err());
    }

    #[test]
    fn test_policy_text_with_commas_survives_codec() {
        let original = policy(DiscountKind::percentage(0.2).unwrap());
        let line = format_row(&original.to_fields());
        let back = DiscountPolicy::from_fields(&split_line(&line)).unwrap();
        assert_eq!(back.policy_text, original.policy_text);
        assert_eq!(back, original);
    }

    #[test]
    fn test_fixed_row_layout() {
        let fields = policy(DiscountKind::fixed(2.5).unwrap()).to_fields();
        assert_eq!(fields[2], "fixed");
        assert_eq!(fields[3], "2.50");
        assert_eq!(fields[4], "");
    }
}
