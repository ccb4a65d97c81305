//! Numeric policy for the hard checks. Thresholds are business policy and are kept as
//! literal tables rather than derived from a formula.

use serde::Serialize;

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Scales both ends by a sibling quantity, e.g. a per-square-foot band times the area.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }
}

/// Bedroom bucket used by the built-up area tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BedroomTier {
    UpToOne,
    Two,
    Three,
    Four,
    Five,
    Six,
    MoreThanSix,
}

impl BedroomTier {
    fn of(bedrooms: u8) -> Self {
        match bedrooms {
            0 | 1 => BedroomTier::UpToOne,
            2 => BedroomTier::Two,
            3 => BedroomTier::Three,
            4 => BedroomTier::Four,
            5 => BedroomTier::Five,
            6 => BedroomTier::Six,
            _ => BedroomTier::MoreThanSix,
        }
    }
}

/// `(tier, apartment-like bounds, independent-house-like bounds)` in square feet.
const BUILT_UP_AREA_TIERS: [(BedroomTier, Bounds, Bounds); 7] = [
    (
        BedroomTier::UpToOne,
        Bounds::new(150.0, 1_500.0),
        Bounds::new(150.0, 2_000.0),
    ),
    (
        BedroomTier::Two,
        Bounds::new(400.0, 3_000.0),
        Bounds::new(400.0, 4_000.0),
    ),
    (
        BedroomTier::Three,
        Bounds::new(600.0, 5_200.0),
        Bounds::new(600.0, 5_000.0),
    ),
    (
        BedroomTier::Four,
        Bounds::new(1_000.0, 7_000.0),
        Bounds::new(1_000.0, 7_500.0),
    ),
    (
        BedroomTier::Five,
        Bounds::new(1_500.0, 9_000.0),
        Bounds::new(1_500.0, 9_500.0),
    ),
    (
        BedroomTier::Six,
        Bounds::new(2_000.0, 10_000.0),
        Bounds::new(2_000.0, 11_000.0),
    ),
    (
        BedroomTier::MoreThanSix,
        Bounds::new(2_500.0, 15_000.0),
        Bounds::new(2_500.0, 15_000.0),
    ),
];

/// Accepted built-up area; `None` when the bedroom count is unknown.
pub fn built_up_area_bounds(independent_house_like: bool, bedrooms: Option<u8>) -> Option<Bounds> {
    let tier = BedroomTier::of(bedrooms?);
    BUILT_UP_AREA_TIERS
        .iter()
        .find(|(candidate, _, _)| *candidate == tier)
        .map(|(_, apartment, house)| if independent_house_like { *house } else { *apartment })
}

/// Absolute sale price band, used when no area is known.
pub const PRICE_ABSOLUTE: Bounds = Bounds::new(100_000.0, 990_000_000.0);
/// Sale price per square foot of built-up area.
pub const PRICE_PER_BUILT_UP_UNIT: Bounds = Bounds::new(20.0, 20_000.0);
/// Sale price per unit of plot area.
pub const PRICE_PER_PLOT_UNIT: Bounds = Bounds::new(100.0, 100_000.0);

pub const RENT_ABSOLUTE: Bounds = Bounds::new(1_500.0, 2_000_000.0);
pub const RENT_PER_BUILT_UP_UNIT: Bounds = Bounds::new(4.0, 400.0);

pub const SECURITY_DEPOSIT: Bounds = Bounds::new(0.0, 5_000_000.0);
pub const MAINTENANCE: Bounds = Bounds::new(0.0, 500_000.0);
pub const AGE_OF_PROPERTY: Bounds = Bounds::new(0.0, 99.0);
pub const PLOT_DIMENSION: Bounds = Bounds::new(1.0, 10_000.0);
/// Road widths in this band, or at least `FACING_ROAD_WIDE_FROM`, only raise a warning.
/// Fractional widths between the two bands (4.5, 500.5) pass silently.
pub const FACING_ROAD_NARROW: Bounds = Bounds::new(0.0, 4.0);
pub const FACING_ROAD_WIDE_FROM: f64 = 501.0;

pub const RENT_BROKERAGE: Bounds = Bounds::new(100.0, 2_000_000.0);
pub const BUY_BROKERAGE: Bounds = Bounds::new(100.0, 990_000_000.0);
/// Rent brokerage at or below this share of rent reads as low.
pub const RENT_BROKERAGE_LOW_RATIO: f64 = 0.5;
/// Sale brokerage at or below this share of price reads as low.
pub const BUY_BROKERAGE_LOW_RATIO: f64 = 0.005;
/// Sale brokerage above this share of price reads as high.
pub const BUY_BROKERAGE_HIGH_RATIO: f64 = 0.15;
/// Maintenance above this share of rent raises a warning.
pub const MAINTENANCE_RENT_RATIO: f64 = 0.5;

/// Plot area may deviate this much from `length * width`.
pub const PLOT_DIMENSION_TOLERANCE: f64 = 0.4;
/// Upper plot area bound when no dimensions were entered.
pub const PLOT_AREA_WITHOUT_DIMENSIONS: f64 = 250_000.0;

/// Extra bathrooms/balconies allowed on top of the bedroom count.
pub const EXTRA_ROOMS_OVER_BEDROOMS: i64 = 3;
/// Extra parking slots allowed on top of the bedroom count.
pub const EXTRA_PARKING_OVER_BEDROOMS: i64 = 2;

pub const PG_MONEY: Bounds = Bounds::new(0.0, 5_000_000.0);
pub const PG_ELECTRICITY: Bounds = Bounds::new(0.0, 10_000.0);
pub const PG_MAX_BEDS: f64 = 2_000.0;
pub const PG_MAX_NOTICE_DAYS: f64 = 120.0;
pub const PG_MAX_LOCK_IN_DAYS: f64 = 365.0;
pub const PG_ADDITIONAL_INFO_MAX_CHARS: usize = 1_500;

/// Availability further out than this many months raises a warning.
pub const AVAILABILITY_WINDOW_MONTHS: u32 = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apartment_and_house_tiers_differ_where_policy_says_so() {
        assert_eq!(
            built_up_area_bounds(false, Some(3)),
            Some(Bounds::new(600.0, 5_200.0))
        );
        assert_eq!(
            built_up_area_bounds(true, Some(3)),
            Some(Bounds::new(600.0, 5_000.0))
        );
    }

    #[test]
    fn studio_and_one_bedroom_share_a_tier() {
        assert_eq!(built_up_area_bounds(false, Some(0)), built_up_area_bounds(false, Some(1)));
    }

    #[test]
    fn large_homes_fall_into_the_top_tier() {
        assert_eq!(
            built_up_area_bounds(true, Some(9)),
            Some(Bounds::new(2_500.0, 15_000.0))
        );
    }

    #[test]
    fn unknown_bedrooms_have_no_bound() {
        assert_eq!(built_up_area_bounds(false, None), None);
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = Bounds::new(400.0, 3_000.0);
        assert!(bounds.contains(400.0));
        assert!(bounds.contains(3_000.0));
        assert!(!bounds.contains(399.0));
        assert!(!bounds.contains(3_001.0));
    }
}
