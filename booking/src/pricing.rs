//! Ticket pricing.
//!
//! Teen and child tickets are the screening's base price minus a flat
//! discount. A discounted unit price never drops below zero.

use crate::types::{Money, Screening, TicketCounts, TicketType};
use serde::{Deserialize, Serialize};

/// Default flat discount for teen tickets
pub const DEFAULT_TEEN_DISCOUNT: Money = Money::new(2_000);

/// Default flat discount for child tickets
pub const DEFAULT_CHILD_DISCOUNT: Money = Money::new(6_000);

/// Flat per-ticket discounts applied to a screening's base price
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Subtracted from the base price for each teen ticket
    pub teen_discount: Money,
    /// Subtracted from the base price for each child ticket
    pub child_discount: Money,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            teen_discount: DEFAULT_TEEN_DISCOUNT,
            child_discount: DEFAULT_CHILD_DISCOUNT,
        }
    }
}

/// One line of a price breakdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    /// Ticket category
    pub ticket_type: TicketType,
    /// Number of tickets
    pub count: u32,
    /// Price of a single ticket
    pub unit_price: Money,
    /// `unit_price * count`
    pub subtotal: Money,
}

impl PricingRules {
    /// Creates rules with explicit discounts
    #[must_use]
    pub const fn new(teen_discount: Money, child_discount: Money) -> Self {
        Self {
            teen_discount,
            child_discount,
        }
    }

    /// Price of one ticket of `ticket_type` given the base price
    #[must_use]
    pub const fn unit_price(&self, base: Money, ticket_type: TicketType) -> Money {
        match ticket_type {
            TicketType::Adult => base,
            TicketType::Teen => base.saturating_sub(self.teen_discount),
            TicketType::Child => base.saturating_sub(self.child_discount),
        }
    }

    /// Total for the given counts at a base price
    ///
    /// `adult * base + teen * (base - teen_discount) + child * (base - child_discount)`
    #[must_use]
    pub fn total(&self, base: Money, counts: &TicketCounts) -> Money {
        self.breakdown(base, counts)
            .iter()
            .fold(Money::ZERO, |total, line| total.saturating_add(line.subtotal))
    }

    /// Total for an optional screening; zero when none is selected
    #[must_use]
    pub fn quote(&self, screening: Option<&Screening>, counts: &TicketCounts) -> Money {
        screening.map_or(Money::ZERO, |screening| self.total(screening.price, counts))
    }

    /// Per-type lines, one for each ticket type, in display order
    #[must_use]
    pub fn breakdown(&self, base: Money, counts: &TicketCounts) -> [PriceLine; 3] {
        TicketType::ALL.map(|ticket_type| {
            let unit_price = self.unit_price(base, ticket_type);
            let count = counts.get(ticket_type);
            PriceLine {
                ticket_type,
                count,
                unit_price,
                subtotal: unit_price.saturating_mul(count),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MovieId, ScreeningId, TheaterId};
    use chrono::{TimeZone, Utc};

    fn screening(price: u64) -> Screening {
        Screening {
            id: ScreeningId::new(1),
            movie_id: MovieId::new(1),
            theater_id: TheaterId::new(1),
            screen_name: "1".to_string(),
            starts_at: Utc.with_ymd_and_hms(2025, 3, 1, 19, 30, 0).unwrap(),
            price: Money::new(price),
            total_seats: 100,
            available_seats: 100,
        }
    }

    #[test]
    fn mixed_tickets_at_14000() {
        let rules = PricingRules::default();
        let total = rules.total(Money::new(14_000), &TicketCounts::new(2, 1, 1));
        assert_eq!(total, Money::new(48_000));
    }

    #[test]
    fn quote_without_screening_is_zero() {
        let rules = PricingRules::default();
        assert_eq!(rules.quote(None, &TicketCounts::new(3, 2, 1)), Money::ZERO);
        assert_eq!(
            rules.quote(Some(&screening(10_000)), &TicketCounts::new(1, 0, 0)),
            Money::new(10_000)
        );
    }

    #[test]
    fn discounted_unit_price_floors_at_zero() {
        let rules = PricingRules::default();
        let base = Money::new(5_000);

        assert_eq!(rules.unit_price(base, TicketType::Teen), Money::new(3_000));
        assert_eq!(rules.unit_price(base, TicketType::Child), Money::ZERO);
        assert_eq!(rules.total(base, &TicketCounts::new(1, 1, 4)), Money::new(8_000));
    }

    #[test]
    fn breakdown_lists_every_type() {
        let rules = PricingRules::new(Money::new(1_000), Money::new(3_000));
        let lines = rules.breakdown(Money::new(9_000), &TicketCounts::new(0, 2, 1));

        assert_eq!(lines[0].ticket_type, TicketType::Adult);
        assert_eq!(lines[0].subtotal, Money::ZERO);
        assert_eq!(lines[1].unit_price, Money::new(8_000));
        assert_eq!(lines[1].subtotal, Money::new(16_000));
        assert_eq!(lines[2].subtotal, Money::new(6_000));
    }
}
