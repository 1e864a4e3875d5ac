use crate::api::config_dto::PricingDto;
use crate::error::{Error, Result};

/// Optional discount applied once a booking reaches a minimum group size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupDiscount {
    pub min_participants: u32,
    pub percent: f64,
}

/// Computes the price of a validated reservation:
/// `base_price x duration/60 x participants`, optionally discounted for groups.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingPolicy {
    pub group_discount: Option<GroupDiscount>,
}

impl PricingPolicy {
    pub fn from_dto(dto: PricingDto) -> Result<Self> {
        let group_discount = match dto.group_discount {
            Some(discount) => {
                if !(0.0..=100.0).contains(&discount.percent) {
                    return Err(Error::ConfigError(format!("Group discount percent {} must lie within 0..=100.", discount.percent)));
                }

                Some(GroupDiscount { min_participants: discount.min_participants, percent: discount.percent })
            }
            None => None,
        };

        Ok(PricingPolicy { group_discount })
    }

    pub fn price(&self, base_price: f64, duration_minutes: i64, participants: u32) -> f64 {
        let mut price = base_price * (duration_minutes as f64 / 60.0) * participants as f64;

        if let Some(discount) = self.group_discount {
            if participants >= discount.min_participants {
                price *= 1.0 - discount.percent / 100.0;
            }
        }

        // Round to cents
        (price * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_scales_with_duration_and_participants() {
        let policy = PricingPolicy::default();

        assert_eq!(policy.price(25.0, 60, 1), 25.0);
        assert_eq!(policy.price(25.0, 90, 2), 75.0);
        assert_eq!(policy.price(40.0, 30, 1), 20.0);
    }

    #[test]
    fn group_discount_applies_from_the_threshold_on() {
        let policy = PricingPolicy { group_discount: Some(GroupDiscount { min_participants: 4, percent: 10.0 }) };

        assert_eq!(policy.price(25.0, 60, 3), 75.0);
        assert_eq!(policy.price(25.0, 60, 4), 90.0);
    }
}
