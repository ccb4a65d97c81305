use super::common::*;
use crate::forms::self_upload::descriptor::FormSection;
use crate::forms::self_upload::domain::{FieldValue, OptionKey, Service};
use crate::forms::self_upload::engine;
use crate::forms::self_upload::mappings::ATTACHED_BATHROOM_AMENITY;
use crate::forms::self_upload::outcome::{FieldResult, TrackingFlags};

#[test]
fn bathroom_style_follows_the_attached_bathroom_amenity() {
    let field = field(
        FormSection::PgRooms,
        "offering_details.toilet_type_id",
        &params(Service::Pg),
    );
    let listing = snapshot(Service::Pg, |basic| {
        basic.offerings = vec![room(&[74, ATTACHED_BATHROOM_AMENITY]), room(&[74, 76])];
    });

    let attached = engine::context(&field, &listing, Some(0), TrackingFlags::default());
    assert!(engine::is_visible(&field, &attached));
    assert_eq!(engine::validate(&field, &attached).result, FieldResult::Incomplete);

    let shared = engine::context(&field, &listing, Some(1), TrackingFlags::default());
    assert!(!engine::is_visible(&field, &shared));
    assert_eq!(engine::validate(&field, &shared).result, FieldResult::Valid);
    assert_eq!(engine::answer(&field, &shared), Some(FieldValue::Number(1.0)));
    assert!(engine::is_answered(&field, &shared));
}

#[test]
fn bathroom_style_reads_the_nested_offering_value() {
    let field = field(
        FormSection::PgRooms,
        "offering_details.toilet_type_id",
        &params(Service::Pg),
    );
    let mut offering = room(&[ATTACHED_BATHROOM_AMENITY]);
    offering.offering_details.toilet_type_id = Some(2);
    let listing = snapshot(Service::Pg, |basic| basic.offerings = vec![offering]);

    let ctx = engine::context(&field, &listing, Some(0), TrackingFlags::default());
    assert_eq!(engine::validate(&field, &ctx).result, FieldResult::Valid);
    assert_eq!(engine::answer(&field, &ctx), Some(FieldValue::Number(2.0)));
}

#[test]
fn brokerage_amount_shows_only_when_charged_for_the_current_service() {
    let field = field(FormSection::Basic, "rent_brokerage", &broker(Service::Rent));

    let charged = snapshot(Service::Rent, |basic| {
        basic.is_rent_brokerage_chargeable = Some(true);
    });
    let other_service = snapshot(Service::Rent, |basic| {
        basic.is_buy_brokerage_chargeable = Some(true);
    });

    let ctx = engine::context(&field, &charged, None, TrackingFlags::default());
    assert!(engine::is_visible(&field, &ctx));
    let ctx = engine::context(&field, &other_service, None, TrackingFlags::default());
    assert!(!engine::is_visible(&field, &ctx));
}

#[test]
fn hidden_fields_skip_their_checks() {
    let field = field(FormSection::Basic, "buy_brokerage", &broker(Service::Buy));
    let listing = snapshot(Service::Buy, |basic| {
        basic.is_buy_brokerage_chargeable = Some(false);
        basic.buy_brokerage = Some(5.0);
    });

    assert_valid(result(&field, &listing));
}

#[test]
fn negotiable_tick_box_answers_from_its_first_key() {
    let field = field(
        FormSection::Basic,
        "brokerage_negotiable",
        &broker(Service::Rent),
    );
    assert_eq!(field.key, "is_rent_brokerage_negotiable");

    let listing = snapshot(Service::Rent, |basic| {
        basic.is_rent_brokerage_chargeable = Some(true);
    });
    let mut ctx = engine::context(&field, &listing, None, TrackingFlags::default());

    ctx.value = Some(FieldValue::List(vec![OptionKey::Bool(true)]));
    assert_eq!(engine::answer(&field, &ctx), Some(FieldValue::Bool(true)));

    ctx.value = Some(FieldValue::List(Vec::new()));
    assert_eq!(engine::answer(&field, &ctx), Some(FieldValue::Bool(false)));
    assert!(engine::is_answered(&field, &ctx));
}

#[test]
fn meal_questions_follow_meals_available() {
    let pg = params(Service::Pg);
    let offerings = field(FormSection::PgDetails, "meal_type_ids", &pg);
    let speciality = field(FormSection::PgDetails, "meal_cuisine_ids", &pg);

    let no_meals = snapshot(Service::Pg, |basic| {
        basic.meals_available = Some(false);
        basic.meal_type_ids = vec![0, 2];
    });
    let ctx = engine::context(&offerings, &no_meals, None, TrackingFlags::default());
    assert!(!engine::is_visible(&offerings, &ctx));
    assert_eq!(engine::answer(&offerings, &ctx), None);
    assert_eq!(engine::validate(&offerings, &ctx).result, FieldResult::Valid);

    let meals = snapshot(Service::Pg, |basic| basic.meals_available = Some(true));
    let ctx = engine::context(&offerings, &meals, None, TrackingFlags::default());
    assert!(engine::is_visible(&offerings, &ctx));
    assert_eq!(engine::validate(&offerings, &ctx).result, FieldResult::Incomplete);

    let ctx = engine::context(&speciality, &meals, None, TrackingFlags::default());
    assert!(engine::is_visible(&speciality, &ctx));
    assert_eq!(engine::validate(&speciality, &ctx).result, FieldResult::Unanswered);
}

#[test]
fn last_entry_time_is_asked_only_under_a_timing_restriction() {
    let field = field(FormSection::PgDetails, "last_entry_time", &params(Service::Pg));

    let restricted = snapshot(Service::Pg, |basic| basic.timing_restriction = Some(true));
    let ctx = engine::context(&field, &restricted, None, TrackingFlags::default());
    assert!(engine::is_visible(&field, &ctx));
    assert!(engine::is_required(&field, &ctx));
    assert_eq!(engine::validate(&field, &ctx).result, FieldResult::Incomplete);

    let open = snapshot(Service::Pg, |basic| {
        basic.timing_restriction = Some(false);
        basic.last_entry_time = Some("9:00 pm".to_string());
    });
    let ctx = engine::context(&field, &open, None, TrackingFlags::default());
    assert!(!engine::is_visible(&field, &ctx));
    assert!(!engine::is_required(&field, &ctx));
    assert_eq!(engine::answer(&field, &ctx), None);
}

#[test]
fn headings_are_always_answered() {
    let fields = registry().section_fields(FormSection::PgExtras, &params(Service::Pg));
    let heading = fields.first().expect("extras heading");
    assert!(heading.is_heading());
    assert_eq!(heading.content.as_deref(), Some("OTHER PG DETAILS"));

    let listing = snapshot(Service::Pg, |_| {});
    let ctx = engine::context(heading, &listing, None, TrackingFlags::default());
    assert!(engine::is_answered(heading, &ctx));
}

#[test]
fn room_deposit_defaults_to_zero() {
    let field = field(FormSection::PgRooms, "security_deposit", &params(Service::Pg));
    let mut offering = room(&[]);
    offering.security_deposit = None;
    let listing = snapshot(Service::Pg, |basic| basic.offerings = vec![offering]);

    let ctx = engine::context(&field, &listing, Some(0), TrackingFlags::default());
    assert_eq!(engine::validate(&field, &ctx).result, FieldResult::Valid);
    assert_eq!(engine::answer(&field, &ctx), Some(FieldValue::Number(0.0)));
}

#[test]
fn facilities_count_as_answered_once_one_is_picked() {
    let field = field(FormSection::PgRooms, "amenity_ids", &params(Service::Pg));
    let listing = snapshot(Service::Pg, |basic| basic.offerings = vec![room(&[]), room(&[11])]);

    let empty = engine::context(&field, &listing, Some(0), TrackingFlags::default());
    assert!(!engine::is_answered(&field, &empty));
    let picked = engine::context(&field, &listing, Some(1), TrackingFlags::default());
    assert!(engine::is_answered(&field, &picked));
}
