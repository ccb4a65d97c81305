use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::forms::self_upload::descriptor::{FieldDescriptor, FieldParams, FormSection};
use crate::forms::self_upload::domain::{BasicDetails, ListingSnapshot, PgOffering, Service};
use crate::forms::self_upload::engine;
use crate::forms::self_upload::outcome::{FieldResult, SoftCheckOutcome, TrackingFlags, ValidationOutcome};
use crate::forms::self_upload::registry::FieldRegistry;

/// Apartment type id of a 2 BHK.
pub(super) const TWO_BHK: i64 = 3;
pub(super) const INDEPENDENT_HOUSE: i64 = 2;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn params(service: Service) -> FieldParams {
    FieldParams {
        service,
        ..FieldParams::default()
    }
}

pub(super) fn broker(service: Service) -> FieldParams {
    FieldParams {
        service,
        is_broker_profile: true,
        ..FieldParams::default()
    }
}

pub(super) fn snapshot(service: Service, edit: impl FnOnce(&mut BasicDetails)) -> ListingSnapshot {
    let mut snapshot = ListingSnapshot::new(service, as_of());
    edit(&mut snapshot.basic);
    snapshot
}

/// 2 BHK apartment snapshot with the given edits applied on top.
pub(super) fn two_bhk(service: Service, edit: impl FnOnce(&mut BasicDetails)) -> ListingSnapshot {
    snapshot(service, |basic| {
        basic.apartment_type_id = Some(TWO_BHK);
        basic.property_type_id = Some(1);
        edit(basic);
    })
}

/// Completed rental of a 2 BHK apartment.
pub(super) fn rented_two_bhk() -> ListingSnapshot {
    two_bhk(Service::Rent, |basic| {
        basic.built_up_area = Some(1_000.0);
        basic.furnish_type_id = Some(2);
        basic.rent = Some(25_000.0);
        basic.security_deposit = Some(100_000.0);
        basic.available_from = Some(date(2025, 2, 1));
        basic.maintenance_charges_rent = Some(2_000.0);
        basic.age_of_property = Some(5.0);
        basic.total_bathroom_count = Some(2);
        basic.total_balcony_count = Some(1);
        basic.covered_parking_count = Some(1);
        basic.open_parking_count = Some(0);
    })
}

pub(super) fn room(amenity_ids: &[i64]) -> PgOffering {
    PgOffering {
        occupancy_type_id: Some(5),
        monthly_rent: Some(9_000.0),
        security_deposit: Some(18_000.0),
        amenity_ids: amenity_ids.to_vec(),
        ..PgOffering::default()
    }
}

pub(super) fn registry() -> FieldRegistry {
    FieldRegistry::new()
}

pub(super) fn field(section: FormSection, name: &str, params: &FieldParams) -> FieldDescriptor {
    registry()
        .get_field(section, name, params)
        .expect("registered field")
        .expect("field applies to params")
}

pub(super) fn basic_field(name: &str, service: Service) -> FieldDescriptor {
    field(FormSection::Basic, name, &params(service))
}

pub(super) fn validate_with(
    descriptor: &FieldDescriptor,
    snapshot: &ListingSnapshot,
    group_index: Option<usize>,
    tracking: TrackingFlags,
) -> ValidationOutcome {
    let ctx = engine::context(descriptor, snapshot, group_index, tracking);
    engine::validate(descriptor, &ctx)
}

pub(super) fn result(descriptor: &FieldDescriptor, snapshot: &ListingSnapshot) -> FieldResult {
    validate_with(descriptor, snapshot, None, TrackingFlags::default()).result
}

pub(super) fn soft_with(
    descriptor: &FieldDescriptor,
    snapshot: &ListingSnapshot,
    tracking: TrackingFlags,
) -> SoftCheckOutcome {
    let ctx = engine::context(descriptor, snapshot, None, tracking);
    engine::soft_check(descriptor, &ctx)
}

pub(super) fn warning(descriptor: &FieldDescriptor, snapshot: &ListingSnapshot) -> Option<String> {
    soft_with(descriptor, snapshot, TrackingFlags::default()).warning
}

pub(super) fn assert_valid(result: FieldResult) {
    match result {
        FieldResult::Valid => {}
        other => panic!("expected valid field, got {other:?}"),
    }
}

pub(super) fn assert_rejected(result: FieldResult, expected: &str) {
    match result {
        FieldResult::Rejected(message) => assert_eq!(message, expected),
        other => panic!("expected rejection `{expected}`, got {other:?}"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
