use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::locator::Step;

/// Listing category the wizard is collecting details for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[default]
    Buy,
    Rent,
    Pg,
}

impl Service {
    pub const fn label(self) -> &'static str {
        match self {
            Service::Buy => "buy",
            Service::Rent => "rent",
            Service::Pg => "pg",
        }
    }
}

/// Key of a selectable option. Radio and checkbox fields mix integer ids, booleans and
/// plain strings (e.g. entry times).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionKey {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<i64> for OptionKey {
    fn from(value: i64) -> Self {
        OptionKey::Int(value)
    }
}

impl From<bool> for OptionKey {
    fn from(value: bool) -> Self {
        OptionKey::Bool(value)
    }
}

impl From<&str> for OptionKey {
    fn from(value: &str) -> Self {
        OptionKey::Text(value.to_string())
    }
}

/// Current value of a single field as seen by validators and helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Text(String),
    List(Vec<OptionKey>),
}

impl FieldValue {
    /// Numeric reading of the value; text is parsed the way a number input would be.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) if value.is_finite() => Some(*value),
            FieldValue::Text(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(value) => Some(*value),
            FieldValue::Text(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionKey]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Empty text and empty selections count as "not answered".
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::List(values) => values.is_empty(),
            _ => false,
        }
    }
}

fn number(value: Option<f64>) -> Option<FieldValue> {
    value.map(FieldValue::Number)
}

fn integer(value: Option<i64>) -> Option<FieldValue> {
    value.map(|value| FieldValue::Number(value as f64))
}

fn flag(value: Option<bool>) -> Option<FieldValue> {
    value.map(FieldValue::Bool)
}

fn text(value: &Option<String>) -> Option<FieldValue> {
    value.clone().map(FieldValue::Text)
}

fn ids(values: &[i64]) -> Option<FieldValue> {
    Some(FieldValue::List(
        values.iter().copied().map(OptionKey::Int).collect(),
    ))
}

/// Immutable master-data snapshot handed to every field function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub service: Service,
    /// The controller's notion of "today", used by date checks.
    pub as_of: NaiveDate,
    #[serde(default)]
    pub basic: BasicDetails,
}

impl ListingSnapshot {
    pub fn new(service: Service, as_of: NaiveDate) -> Self {
        Self {
            service,
            as_of,
            basic: BasicDetails::default(),
        }
    }

    /// Resolves a `selfUpload.basic.*` locator; `offerings[]` selects `group_index`.
    pub fn value_at(&self, path: &str, group_index: Option<usize>) -> Option<FieldValue> {
        let steps = super::locator::steps(path);
        match steps.as_slice() {
            [Step::Field("selfUpload"), Step::Field("basic"), rest @ ..] => {
                self.basic.lookup(rest, group_index)
            }
            _ => None,
        }
    }

    pub fn offering(&self, group_index: Option<usize>) -> Option<&PgOffering> {
        group_index.and_then(|index| self.basic.offerings.get(index))
    }
}

/// Values of the `basic` section of the wizard, shared by buy, rent and PG listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicDetails {
    pub apartment_type_id: Option<i64>,
    pub property_type_id: Option<i64>,
    pub furnish_type_id: Option<i64>,

    pub price: Option<f64>,
    pub rent: Option<f64>,
    pub security_deposit: Option<f64>,
    pub available_from: Option<NaiveDate>,
    pub maintenance_charges_buy: Option<f64>,
    pub maintenance_charges_rent: Option<f64>,
    pub age_of_property: Option<f64>,

    pub built_up_area: Option<f64>,
    pub plot_area: Option<f64>,
    pub area_unit_id: Option<i64>,
    pub plot_length: Option<f64>,
    pub plot_width: Option<f64>,
    pub facing_road_width: Option<f64>,

    pub total_bathroom_count: Option<i64>,
    pub total_balcony_count: Option<i64>,
    pub covered_parking_count: Option<i64>,
    pub open_parking_count: Option<i64>,

    pub is_rent_brokerage_chargeable: Option<bool>,
    pub is_buy_brokerage_chargeable: Option<bool>,
    pub is_rent_brokerage_negotiable: Option<bool>,
    pub is_buy_brokerage_negotiable: Option<bool>,
    pub rent_brokerage: Option<f64>,
    pub buy_brokerage: Option<f64>,

    pub pg_name: Option<String>,
    pub total_beds: Option<FieldValue>,
    pub available_for: Vec<i64>,
    pub suitable_entity_type_ids: Vec<i64>,
    pub meals_available: Option<bool>,
    pub meal_type_ids: Vec<i64>,
    pub meal_cuisine_ids: Vec<i64>,
    pub notice_period_in_days: Option<FieldValue>,
    pub lock_in_period: Option<FieldValue>,
    pub common_area_type_ids: Vec<i64>,
    pub property_manager_type_id: Option<i64>,
    pub manager_on_property: Option<bool>,

    pub is_non_veg_allowed: Option<bool>,
    pub is_opposite_sex_allowed: Option<bool>,
    pub timing_restriction: Option<bool>,
    pub last_entry_time: Option<String>,
    pub are_visitors_allowed: Option<bool>,
    pub is_guardian_allowed: Option<bool>,
    pub is_drinking_allowed: Option<bool>,
    pub is_smoking_allowed: Option<bool>,

    pub one_time_move_in_charges: Option<f64>,
    pub meal_charges: Option<f64>,
    pub electricity_charges: Option<f64>,
    pub additional_information: Option<String>,

    pub offerings: Vec<PgOffering>,
}

impl BasicDetails {
    pub(crate) fn lookup(&self, steps: &[Step<'_>], group_index: Option<usize>) -> Option<FieldValue> {
        match steps {
            [Step::Field("offerings"), Step::Group, rest @ ..] => group_index
                .and_then(|index| self.offerings.get(index))
                .and_then(|offering| offering.lookup(rest)),
            [Step::Field("offerings"), Step::Index(index), rest @ ..] => {
                self.offerings.get(*index).and_then(|offering| offering.lookup(rest))
            }
            [Step::Field(key)] => self.field(key),
            _ => None,
        }
    }

    /// Value of a top-level field by key. Unknown keys resolve to `None`.
    pub fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "apartment_type_id" => integer(self.apartment_type_id),
            "property_type_id" => integer(self.property_type_id),
            "furnish_type_id" => integer(self.furnish_type_id),
            "price" => number(self.price),
            "rent" => number(self.rent),
            "security_deposit" => number(self.security_deposit),
            "available_from" => self.available_from.map(FieldValue::Date),
            "maintenance_charges_buy" => number(self.maintenance_charges_buy),
            "maintenance_charges_rent" => number(self.maintenance_charges_rent),
            "age_of_property" => number(self.age_of_property),
            "built_up_area" => number(self.built_up_area),
            "plot_area" => number(self.plot_area),
            "area_unit_id" => integer(self.area_unit_id),
            "plot_length" => number(self.plot_length),
            "plot_width" => number(self.plot_width),
            "facing_road_width" => number(self.facing_road_width),
            "total_bathroom_count" => integer(self.total_bathroom_count),
            "total_balcony_count" => integer(self.total_balcony_count),
            "covered_parking_count" => integer(self.covered_parking_count),
            "open_parking_count" => integer(self.open_parking_count),
            "is_rent_brokerage_chargeable" => flag(self.is_rent_brokerage_chargeable),
            "is_buy_brokerage_chargeable" => flag(self.is_buy_brokerage_chargeable),
            "is_rent_brokerage_negotiable" => flag(self.is_rent_brokerage_negotiable),
            "is_buy_brokerage_negotiable" => flag(self.is_buy_brokerage_negotiable),
            "rent_brokerage" => number(self.rent_brokerage),
            "buy_brokerage" => number(self.buy_brokerage),
            "pg_name" => text(&self.pg_name),
            "total_beds" => self.total_beds.clone(),
            "available_for" => ids(&self.available_for),
            "suitable_entity_type_ids" => ids(&self.suitable_entity_type_ids),
            "meals_available" => flag(self.meals_available),
            "meal_type_ids" => ids(&self.meal_type_ids),
            "meal_cuisine_ids" => ids(&self.meal_cuisine_ids),
            "notice_period_in_days" => self.notice_period_in_days.clone(),
            "lock_in_period" => self.lock_in_period.clone(),
            "common_area_type_ids" => ids(&self.common_area_type_ids),
            "property_manager_type_id" => integer(self.property_manager_type_id),
            "manager_on_property" => flag(self.manager_on_property),
            "is_non_veg_allowed" => flag(self.is_non_veg_allowed),
            "is_opposite_sex_allowed" => flag(self.is_opposite_sex_allowed),
            "timing_restriction" => flag(self.timing_restriction),
            "last_entry_time" => text(&self.last_entry_time),
            "are_visitors_allowed" => flag(self.are_visitors_allowed),
            "is_guardian_allowed" => flag(self.is_guardian_allowed),
            "is_drinking_allowed" => flag(self.is_drinking_allowed),
            "is_smoking_allowed" => flag(self.is_smoking_allowed),
            "one_time_move_in_charges" => number(self.one_time_move_in_charges),
            "meal_charges" => number(self.meal_charges),
            "electricity_charges" => number(self.electricity_charges),
            "additional_information" => text(&self.additional_information),
            _ => None,
        }
    }
}

/// One PG room group ("offering"); room-level fields are answered once per group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PgOffering {
    pub occupancy_type_id: Option<i64>,
    pub total_beds: Option<f64>,
    pub monthly_rent: Option<f64>,
    pub security_deposit: Option<f64>,
    pub amenity_ids: Vec<i64>,
    pub offering_details: OfferingDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferingDetails {
    pub toilet_type_id: Option<i64>,
}

impl PgOffering {
    pub fn has_amenity(&self, amenity_id: i64) -> bool {
        self.amenity_ids.contains(&amenity_id)
    }

    fn lookup(&self, steps: &[Step<'_>]) -> Option<FieldValue> {
        match steps {
            [Step::Field("offering_details"), Step::Field("toilet_type_id")] => {
                integer(self.offering_details.toilet_type_id)
            }
            [Step::Field("occupancy_type_id")] => integer(self.occupancy_type_id),
            [Step::Field("total_beds")] => number(self.total_beds),
            [Step::Field("monthly_rent")] => number(self.monthly_rent),
            [Step::Field("security_deposit")] => number(self.security_deposit),
            [Step::Field("amenity_ids")] => ids(&self.amenity_ids),
            _ => None,
        }
    }
}
