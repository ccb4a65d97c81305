use super::common::*;
use crate::forms::self_upload::descriptor::FormSection;
use crate::forms::self_upload::domain::Service;
use crate::forms::self_upload::mappings::ATTACHED_BATHROOM_AMENITY;
use crate::forms::self_upload::outcome::{FieldResult, TrackingFlags};

#[test]
fn completed_rental_is_complete() {
    let reports = registry().evaluate(
        FormSection::Basic,
        &params(Service::Rent),
        &rented_two_bhk(),
        TrackingFlags::enabled(),
    );

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert!(report.complete, "{report:#?}");
    assert_eq!(report.visible, 11);
    assert_eq!(report.answered, 11);
    assert_eq!(report.analytics().count(), 0);
    assert_eq!(
        report.field("rent").and_then(|field| field.helper.as_deref()),
        Some("₹ 25,000")
    );
    assert_eq!(
        report
            .field("available_from")
            .and_then(|field| field.helper.as_deref()),
        Some("01 Feb 2025")
    );
}

#[test]
fn missing_answer_keeps_the_section_open() {
    let mut listing = rented_two_bhk();
    listing.basic.rent = None;

    let report = registry()
        .evaluate(
            FormSection::Basic,
            &params(Service::Rent),
            &listing,
            TrackingFlags::default(),
        )
        .remove(0);

    assert!(!report.complete);
    assert_eq!(report.answered, 10);
    let rent = report.field("rent").expect("rent report");
    assert_eq!(rent.result, FieldResult::Incomplete);
    assert!(rent.required);
}

#[test]
fn warnings_and_events_are_collected_per_field() {
    let mut listing = rented_two_bhk();
    listing.basic.maintenance_charges_rent = Some(20_000.0);
    listing.basic.total_bathroom_count = Some(7);

    let report = registry()
        .evaluate(
            FormSection::Basic,
            &params(Service::Rent),
            &listing,
            TrackingFlags::enabled(),
        )
        .remove(0);

    assert!(!report.complete);
    let maintenance = report
        .field("maintenance_charges_rent")
        .expect("maintenance report");
    assert_eq!(
        maintenance.warning.as_deref(),
        Some("Maintenance charges cannot be greater than 50% of rent")
    );
    assert_eq!(maintenance.result, FieldResult::Valid);

    let fields: Vec<&str> = report
        .analytics()
        .map(|event| event.field.as_str())
        .collect();
    assert_eq!(fields, vec!["maintenance_charges_rent", "total_bathroom_count"]);
}

#[test]
fn rooms_are_evaluated_once_per_group() {
    let mut attached = room(&[ATTACHED_BATHROOM_AMENITY]);
    attached.offering_details.toilet_type_id = Some(3);
    let listing = snapshot(Service::Pg, |basic| {
        basic.offerings = vec![attached, room(&[74]), room(&[ATTACHED_BATHROOM_AMENITY])];
    });

    let reports = registry().evaluate(
        FormSection::PgRooms,
        &params(Service::Pg),
        &listing,
        TrackingFlags::default(),
    );

    assert_eq!(reports.len(), 3);
    assert_eq!(
        reports.iter().map(|report| report.group_index).collect::<Vec<_>>(),
        vec![Some(0), Some(1), Some(2)]
    );
    assert!(reports[0].complete);
    assert!(reports[1].complete);
    assert!(!reports[2].complete);

    let hidden = reports[1]
        .field("offering_details.toilet_type_id")
        .expect("bathroom style");
    assert!(!hidden.visible);
    assert!(!hidden.result.is_blocking());
}

#[test]
fn rooms_without_offerings_report_one_empty_group() {
    let reports = registry().evaluate(
        FormSection::PgRooms,
        &params(Service::Pg),
        &snapshot(Service::Pg, |_| {}),
        TrackingFlags::default(),
    );

    assert_eq!(reports.len(), 1);
    let room_type = reports[0].field("occupancy_type_id").expect("room type");
    assert_eq!(room_type.result, FieldResult::Incomplete);
}

#[test]
fn optional_extras_do_not_block() {
    let report = registry()
        .evaluate(
            FormSection::PgExtras,
            &params(Service::Pg),
            &snapshot(Service::Pg, |_| {}),
            TrackingFlags::default(),
        )
        .remove(0);

    assert!(report.complete);
    assert_eq!(report.answered, 1);
    assert_eq!(
        report
            .field("additional_information")
            .and_then(|field| field.helper.as_deref()),
        Some("0 / 1500")
    );
}
