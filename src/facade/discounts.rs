use super::Cinema;
use crate::core::{CinemaError, Result};
use crate::models::{DiscountKind, DiscountPolicy, Showtime};
use crate::storage::{IdKind, RecordStore, RecordStoreExt, next_id};
use log::info;

#[derive(Debug, Clone, PartialEq)]
pub enum DiscountChange {
    Name(String),
    Kind(DiscountKind),
    PolicyText(String),
}

impl<S: RecordStore> Cinema<S> {
    pub fn list_discounts(&self) -> Result<Vec<DiscountPolicy>> {
        self.store.load_all_or_empty()
    }

    pub fn discount(&self, id: &str) -> Result<DiscountPolicy> {
        self.store.get(id)
    }

    pub fn add_discount(&mut self, name: &str, kind: DiscountKind, policy_text: &str) -> Result<DiscountPolicy> {
        check_discount_name(name)?;
        let policy = DiscountPolicy {
            id: next_id(&mut self.store, IdKind::Discount)?,
            name: name.trim().to_string(),
            kind,
            policy_text: policy_text.trim().to_string(),
        };
        self.store.insert(&policy)?;
        info!("Discount {} ({}) created", policy.id, policy.name);
        Ok(policy)
    }

    /// Changes one attribute of a policy. A new type or value reprices every
    /// showtime that uses the policy.
    pub fn update_discount(&mut self, id: &str, change: DiscountChange) -> Result<DiscountPolicy> {
        let mut policy: DiscountPolicy = self.store.get(id)?;
        let reprice = matches!(change, DiscountChange::Kind(_));
        match change {
            DiscountChange::Name(name) => {
                check_discount_name(&name)?;
                policy.name = name.trim().to_string();
            }
            DiscountChange::Kind(kind) => policy.kind = kind,
            DiscountChange::PolicyText(text) => policy.policy_text = text.trim().to_string(),
        }
        self.store.replace(&policy)?;

        if reprice {
            let mut showtimes: Vec<Showtime> = self.store.load_all_or_empty()?;
            let mut repriced = 0;
            for showtime in showtimes.iter_mut().filter(|s| s.discount_id.as_deref() == Some(id)) {
                showtime.discounted_price = Some(policy.apply(showtime.normal_price));
                repriced += 1;
            }
            if repriced > 0 {
                self.store.save_all(&showtimes)?;
            }
            info!("Discount {} updated, {} showtime(s) repriced", policy.id, repriced);
        } else {
            info!("Discount {} updated", policy.id);
        }
        Ok(policy)
    }

    /// Deletes a policy and detaches it from the showtimes that used it.
    pub fn remove_discount(&mut self, id: &str) -> Result<()> {
        self.store.remove::<DiscountPolicy>(id)?;

        let mut showtimes: Vec<Showtime> = self.store.load_all_or_empty()?;
        let mut detached = 0;
        for showtime in showtimes.iter_mut().filter(|s| s.discount_id.as_deref() == Some(id)) {
            showtime.discount_id = None;
            showtime.discounted_price = None;
            detached += 1;
        }
        if detached > 0 {
            self.store.save_all(&showtimes)?;
        }
        info!("Discount {} removed, detached from {} showtime(s)", id, detached);
        Ok(())
    }

    /// Discounted price of `normal_price` under policy `discount_id`.
    pub fn calculate_discount(&self, discount_id: &str, normal_price: f64) -> Result<f64> {
        let policy: DiscountPolicy = self.store.get(discount_id)?;
        Ok(policy.apply(normal_price))
    }
}

fn check_discount_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CinemaError::InvalidInput("discount policy must have a name".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::{parse_date, parse_time};
    use crate::facade::movies::tests::new_movie;
    use crate::facade::testing::{at, cinema};

    #[test]
    fn test_add_and_calculate() {
        let mut cinema = cinema();
        let fixed = cinema.add_discount("Flat", DiscountKind::fixed(3.0).unwrap(), "").unwrap();
        let rate = cinema
            .add_discount("Student", DiscountKind::percentage(0.25).unwrap(), "Students, with ID")
            .unwrap();
        assert_eq!(fixed.id, "D01");
        assert_eq!(rate.id, "D02");
        assert_eq!(cinema.calculate_discount("D01", 15.0).unwrap(), 12.0);
        assert_eq!(cinema.calculate_discount("D02", 15.0).unwrap(), 11.25);
        assert_eq!(cinema.discount("D02").unwrap().policy_text, "Students, with ID");
        assert!(cinema.add_discount(" ", DiscountKind::fixed(1.0).unwrap(), "").is_err());
    }

    #[test]
    fn test_kind_change_reprices_and_removal_detaches() {
        let mut cinema = cinema();
        let movie = cinema.add_movie(new_movie("Feature", 100, true)).unwrap();
        let policy = cinema.add_discount("Flat", DiscountKind::fixed(3.0).unwrap(), "").unwrap();
        let plan = cinema
            .plan_showtime(
                &movie.id,
                parse_date("05-06-2030").unwrap(),
                parse_time("1000").unwrap(),
                at("01-06-2030", "0900"),
            )
            .unwrap();
        let showtime = cinema.add_showtime(&plan, "AUD01", Some(&policy.id)).unwrap();
        assert_eq!(showtime.discounted_price, Some(12.0));

        cinema
            .update_discount(&policy.id, DiscountChange::Kind(DiscountKind::percentage(0.5).unwrap()))
            .unwrap();
        assert_eq!(cinema.showtime(&showtime.id).unwrap().discounted_price, Some(7.5));

        cinema.remove_discount(&policy.id).unwrap();
        let detached = cinema.showtime(&showtime.id).unwrap();
        assert_eq!(detached.discount_id, None);
        assert_eq!(detached.discounted_price, None);
        assert!(matches!(
            cinema.remove_discount(&policy.id),
            Err(CinemaError::NotFound { kind: "discount", .. })
        ));
    }
}
