use super::common::*;
use crate::forms::self_upload::descriptor::FormSection;
use crate::forms::self_upload::domain::{FieldValue, OptionKey, Service};
use crate::forms::self_upload::engine;
use crate::forms::self_upload::persisted::{PersistedListing, Restriction};

fn stored_listing() -> PersistedListing {
    serde_json::from_value(serde_json::json!({
        "flat_details": {
            "built_up_area": 1150,
            "furnish_type_id": 2,
            "timing_restriction": true,
            "last_entry_time": "10:30 pm",
            "meal_cuisine_ids": [],
            "notice_period_in_days": 30,
            "restrictions": [
                { "id": 1, "value": true },
                { "id": 5, "value": false },
                { "id": 3, "value": false }
            ]
        },
        "user_flats": [
            { "user_flat_details": { "rent": 32000, "security_deposit": 64000 } }
        ],
        "available_for": [1],
        "total_bathroom_count": 2
    }))
    .expect("stored listing")
}

#[test]
fn reads_the_stored_locator() {
    let record = stored_listing();

    let rent = basic_field("rent", Service::Rent);
    assert_eq!(engine::populate(&rent, &record), Some(FieldValue::Number(32_000.0)));

    let area = basic_field("built_up_area", Service::Rent);
    assert_eq!(engine::populate(&area, &record), Some(FieldValue::Number(1_150.0)));

    let bathrooms = basic_field("total_bathroom_count", Service::Rent);
    assert_eq!(engine::populate(&bathrooms, &record), Some(FieldValue::Number(2.0)));
}

#[test]
fn missing_paths_populate_nothing() {
    let empty = PersistedListing::default();
    for descriptor in registry().section_fields(FormSection::Basic, &broker(Service::Buy)) {
        assert_eq!(engine::populate(&descriptor, &empty), None, "{}", descriptor.key);
    }
}

#[test]
fn house_rules_come_from_restrictions_by_id() {
    let record = stored_listing();
    let pg = params(Service::Pg);

    let non_veg = field(FormSection::PgDetails, "is_non_veg_allowed", &pg);
    assert_eq!(engine::populate(&non_veg, &record), Some(FieldValue::Bool(true)));

    let visitors = field(FormSection::PgDetails, "are_visitors_allowed", &pg);
    assert_eq!(engine::populate(&visitors, &record), Some(FieldValue::Bool(false)));

    let smoking = field(FormSection::PgDetails, "is_smoking_allowed", &pg);
    assert_eq!(engine::populate(&smoking, &record), None);
}

#[test]
fn timing_rules_read_flat_details_directly() {
    let record = stored_listing();
    let pg = params(Service::Pg);

    let timing = field(FormSection::PgDetails, "timing_restriction", &pg);
    assert_eq!(engine::populate(&timing, &record), Some(FieldValue::Bool(true)));

    let last_entry = field(FormSection::PgDetails, "last_entry_time", &pg);
    assert_eq!(
        engine::populate(&last_entry, &record),
        Some(FieldValue::Text("10:30 pm".to_string()))
    );
}

#[test]
fn empty_cuisines_are_not_prefilled() {
    let speciality = field(FormSection::PgDetails, "meal_cuisine_ids", &params(Service::Pg));
    assert_eq!(engine::populate(&speciality, &stored_listing()), None);

    let mut record = stored_listing();
    record.flat_details.details.meal_cuisine_ids = vec![2, 4];
    assert_eq!(
        engine::populate(&speciality, &record),
        Some(FieldValue::List(vec![OptionKey::Int(2), OptionKey::Int(4)]))
    );
}

#[test]
fn negotiable_tick_box_is_never_prefilled() {
    let negotiable = field(
        FormSection::Basic,
        "brokerage_negotiable",
        &broker(Service::Rent),
    );
    let mut record = stored_listing();
    record.user_flats[0].user_flat_details.is_rent_brokerage_negotiable = Some(true);

    assert_eq!(engine::populate(&negotiable, &record), None);
}

#[test]
fn populate_is_idempotent() {
    let record = stored_listing();
    let registry = registry();

    let first = registry.populate(FormSection::PgDetails, &params(Service::Pg), &record);
    let second = registry.populate(FormSection::PgDetails, &params(Service::Pg), &record);

    assert_eq!(first, second);
    assert_eq!(
        first.get("available_for"),
        Some(&FieldValue::List(vec![OptionKey::Int(1)]))
    );
    assert_eq!(
        first.get("notice_period_in_days"),
        Some(&FieldValue::Number(30.0))
    );
    assert!(!first.keys().any(|key| key.starts_with("heading_")));
}

#[test]
fn restriction_values_may_be_absent() {
    let mut record = PersistedListing::default();
    record.flat_details.restrictions.push(Restriction { id: 2, value: None });

    let opposite_sex = field(
        FormSection::PgDetails,
        "is_opposite_sex_allowed",
        &params(Service::Pg),
    );
    assert_eq!(engine::populate(&opposite_sex, &record), None);
}
