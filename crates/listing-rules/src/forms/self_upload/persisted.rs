use serde::{Deserialize, Serialize};

use super::domain::{BasicDetails, FieldValue, OptionKey};
use super::locator::{self, Step};

/// Stored listing as returned by the listings backend. Shape differs from the live
/// edit snapshot: pricing lives under `user_flats`, PG rules under `restrictions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedListing {
    pub flat_details: PersistedFlatDetails,
    pub user_flats: Vec<PersistedUserFlat>,
    pub available_for: Vec<i64>,
    pub suitable_entity_type_ids: Vec<i64>,
    pub total_bathroom_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedFlatDetails {
    #[serde(flatten)]
    pub details: BasicDetails,
    pub restrictions: Vec<Restriction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedUserFlat {
    pub user_flat_details: BasicDetails,
}

/// A stored PG house rule, keyed by rule id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restriction {
    pub id: i64,
    #[serde(default)]
    pub value: Option<FieldValue>,
}

impl PersistedListing {
    /// Resolves a persisted-record locator; any missing segment yields `None`.
    pub fn value_at(&self, path: &str) -> Option<FieldValue> {
        let steps = locator::steps(path);
        match steps.as_slice() {
            [Step::Field("flat_details"), rest @ ..] => self.flat_details.details.lookup(rest, None),
            [Step::Field("user_flats"), Step::Index(index), Step::Field("user_flat_details"), rest @ ..] => {
                self.user_flats
                    .get(*index)
                    .and_then(|flat| flat.user_flat_details.lookup(rest, None))
            }
            [Step::Field("available_for")] => id_list(&self.available_for),
            [Step::Field("suitable_entity_type_ids")] => id_list(&self.suitable_entity_type_ids),
            [Step::Field("total_bathroom_count")] => self
                .total_bathroom_count
                .map(|count| FieldValue::Number(count as f64)),
            _ => None,
        }
    }

    pub fn restriction(&self, rule_id: i64) -> Option<FieldValue> {
        self.flat_details
            .restrictions
            .iter()
            .find(|restriction| restriction.id == rule_id)
            .and_then(|restriction| restriction.value.clone())
    }
}

fn id_list(values: &[i64]) -> Option<FieldValue> {
    Some(FieldValue::List(
        values.iter().copied().map(OptionKey::Int).collect(),
    ))
}
