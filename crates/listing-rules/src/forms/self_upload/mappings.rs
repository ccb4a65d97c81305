//! Id tables shared with the listings backend.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds;

/// Unit a plot area is entered in. Ids match `area_unit_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SquareFeet,
    SquareYard,
    SquareMeter,
}

impl AreaUnit {
    /// Unit assumed when the listing has not picked one yet.
    pub const DEFAULT: AreaUnit = AreaUnit::SquareYard;

    pub const ALL: [AreaUnit; 3] = [
        AreaUnit::SquareFeet,
        AreaUnit::SquareYard,
        AreaUnit::SquareMeter,
    ];

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            2 => Some(AreaUnit::SquareFeet),
            3 => Some(AreaUnit::SquareYard),
            4 => Some(AreaUnit::SquareMeter),
            _ => None,
        }
    }

    pub const fn id(self) -> i64 {
        match self {
            AreaUnit::SquareFeet => 2,
            AreaUnit::SquareYard => 3,
            AreaUnit::SquareMeter => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AreaUnit::SquareFeet => "Sq. ft.",
            AreaUnit::SquareYard => "Sq. Yards",
            AreaUnit::SquareMeter => "Sq. m.",
        }
    }

    /// Linear unit used for plot length, width and road width.
    pub const fn dimension(self) -> &'static str {
        match self {
            AreaUnit::SquareFeet => "ft",
            AreaUnit::SquareYard => "yards",
            AreaUnit::SquareMeter => "m",
        }
    }

    /// Accepted plot area for the unit.
    pub const fn plot_area_bounds(self) -> Bounds {
        match self {
            AreaUnit::SquareFeet => Bounds::new(150.0, 20_000.0),
            AreaUnit::SquareYard => Bounds::new(50.0, 5_000.0),
            AreaUnit::SquareMeter => Bounds::new(50.0, 4_000.0),
        }
    }

    /// Smallest plot the dimension consistency check accepts.
    pub const fn minimum_plot_area(self) -> f64 {
        match self {
            AreaUnit::SquareYard => 5.0,
            AreaUnit::SquareFeet | AreaUnit::SquareMeter => 45.0,
        }
    }
}

/// `(apartment_type_id, label, bedrooms)`.
pub const APARTMENT_TYPES: &[(i64, &str, u8)] = &[
    (1, "1 RK", 0),
    (2, "1 BHK", 1),
    (3, "2 BHK", 2),
    (4, "3 BHK", 3),
    (5, "4 BHK", 4),
    (6, "5 BHK", 5),
    (7, "6 BHK", 6),
    (8, "6+ BHK", 7),
];

pub fn bedroom_count(apartment_type_id: Option<i64>) -> Option<u8> {
    let id = apartment_type_id?;
    APARTMENT_TYPES
        .iter()
        .find(|(candidate, _, _)| *candidate == id)
        .map(|(_, _, bedrooms)| *bedrooms)
}

/// `(property_type_id, label)`.
pub const PROPERTY_TYPES: &[(i64, &str)] = &[
    (1, "Apartment"),
    (2, "Independent House"),
    (3, "Villa"),
    (4, "Independent Floor"),
    (5, "Plot"),
];

const INDEPENDENT_HOUSE: i64 = 2;
const VILLA: i64 = 3;

/// Independent houses and villas get the wider built-up area tiers.
pub fn is_independent_house_like(property_type_id: Option<i64>) -> bool {
    matches!(property_type_id, Some(INDEPENDENT_HOUSE) | Some(VILLA))
}

pub const FURNISH_TYPES: &[(i64, &str)] = &[
    (1, "Fully Furnished"),
    (2, "Semi Furnished"),
    (3, "Unfurnished"),
];

/// PG house rule key to the `restrictions[].id` it is stored under.
pub const PG_RESTRICTIONS: &[(&str, i64)] = &[
    ("is_non_veg_allowed", 1),
    ("is_opposite_sex_allowed", 2),
    ("timing_restriction", 3),
    ("last_entry_time", 4),
    ("are_visitors_allowed", 5),
    ("is_guardian_allowed", 6),
    ("is_drinking_allowed", 7),
    ("is_smoking_allowed", 8),
];

pub fn restriction_id(rule_key: &str) -> Option<i64> {
    PG_RESTRICTIONS
        .iter()
        .find(|(key, _)| *key == rule_key)
        .map(|(_, id)| *id)
}

/// PG room amenity that reveals the bathroom style question.
pub const ATTACHED_BATHROOM_AMENITY: i64 = 78;
