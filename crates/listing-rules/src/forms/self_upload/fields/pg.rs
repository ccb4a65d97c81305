//! Paying-guest questions: house details, per-room offerings and extra charges.

use super::{currency_helper, within};
use crate::forms::self_upload::bounds;
use crate::forms::self_upload::descriptor::{
    yes_no, AnswerRule, FieldContext, FieldDescriptor, FieldOption, FieldType, FormSection,
    PopulateRule, Requirement,
};
use crate::forms::self_upload::domain::FieldValue;
use crate::forms::self_upload::format;
use crate::forms::self_upload::mappings::{self, ATTACHED_BATHROOM_AMENITY};
use crate::forms::self_upload::outcome::{ErrorTracking, Verdict};
use crate::forms::self_upload::persisted::PersistedListing;

const MONEY_MESSAGE: &str = "Should be between 0 and 50 Lakhs";
const LAST_ENTRY_TIMES: [&str; 17] = [
    "6:00 pm", "6:30 pm", "7:00 pm", "7:30 pm", "8:00 pm", "8:30 pm", "9:00 pm", "9:30 pm",
    "10:00 pm", "10:30 pm", "11:00 pm", "11:30 pm", "12:00 am", "12:30 am", "1:00 am",
    "1:30 am", "2:00 am",
];

fn options(pairs: &[(i64, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(key, label)| FieldOption::new(*key, *label))
        .collect()
}

/// Common shape of a PG question stored under `flat_details`.
fn pg_field(section: FormSection, key: &str, title: &str, field_type: FieldType) -> FieldDescriptor {
    FieldDescriptor {
        section,
        error_tracking: ErrorTracking::Never,
        ..FieldDescriptor::new(key, title, field_type)
    }
    .at_basic()
    .stored_at(format!("flat_details.{key}"))
}

pub(crate) fn details_heading() -> FieldDescriptor {
    FieldDescriptor::heading(FormSection::PgDetails, "PG DETAILS")
}

pub(crate) fn manager_heading() -> FieldDescriptor {
    FieldDescriptor::heading(FormSection::PgDetails, "OWNER / CARETAKER DETAILS")
}

pub(crate) fn rules_heading() -> FieldDescriptor {
    FieldDescriptor::heading(FormSection::PgDetails, "PG RULES")
}

pub(crate) fn pg_name() -> FieldDescriptor {
    FieldDescriptor {
        validate: Some(validate_pg_name),
        ..pg_field(FormSection::PgDetails, "pg_name", "PG Name (Optional)", FieldType::Text)
    }
}

fn validate_pg_name(ctx: &FieldContext<'_>) -> Verdict {
    let name = ctx.value.as_ref().and_then(FieldValue::as_text).unwrap_or_default();
    if name.chars().any(|c| c.is_ascii_alphabetic()) {
        Verdict::Pass
    } else {
        Verdict::reject("There should be at least one letter in the name")
    }
}

pub(crate) fn total_beds() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        validate: Some(validate_total_beds),
        ..pg_field(FormSection::PgDetails, "total_beds", "Total Beds", FieldType::Text)
    }
}

fn validate_total_beds(ctx: &FieldContext<'_>) -> Verdict {
    numeric_at_most(
        ctx,
        bounds::PG_MAX_BEDS,
        "Total beds should be a number",
        "Total beds should be less than 2000",
    )
}

/// Free-text numeric input: must parse, then stay under `max`.
fn numeric_at_most(ctx: &FieldContext<'_>, max: f64, not_a_number: &str, too_large: &str) -> Verdict {
    match ctx.number() {
        None => Verdict::reject(not_a_number),
        Some(value) if value > max => Verdict::reject(too_large),
        Some(_) => Verdict::Pass,
    }
}

pub(crate) fn available_for() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: options(&[(1, "Girls"), (0, "Boys")]),
        ..pg_field(FormSection::PgDetails, "available_for", "PG is for", FieldType::Checkbox)
    }
    .stored_at("available_for")
}

pub(crate) fn suitable_for() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: options(&[(7, "Students"), (8, "Professionals")]),
        ..pg_field(
            FormSection::PgDetails,
            "suitable_entity_type_ids",
            "Best suited for",
            FieldType::Checkbox,
        )
    }
    .stored_at("suitable_entity_type_ids")
}

pub(crate) fn meals_available() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: yes_no(),
        ..pg_field(FormSection::PgDetails, "meals_available", "Meals Available", FieldType::Radio)
    }
}

fn serves_meals(ctx: &FieldContext<'_>) -> bool {
    ctx.basic().meals_available == Some(true)
}

fn answer_if_meals(ctx: &FieldContext<'_>) -> Option<FieldValue> {
    serves_meals(ctx).then(|| ctx.value.clone()).flatten()
}

pub(crate) fn meal_offerings() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: options(&[(0, "Breakfast"), (1, "Lunch"), (2, "Dinner")]),
        visible: Some(serves_meals),
        response: Some(answer_if_meals),
        ..pg_field(FormSection::PgDetails, "meal_type_ids", "Meal Offerings", FieldType::Checkbox)
    }
}

pub(crate) fn meal_speciality() -> FieldDescriptor {
    FieldDescriptor {
        options: options(&[
            (1, "Punjabi"),
            (2, "South Indian"),
            (3, "Andhra"),
            (4, "North Indian"),
            (5, "Others"),
        ]),
        visible: Some(serves_meals),
        response: Some(answer_if_meals),
        populate: PopulateRule::Custom(populate_cuisines),
        ..pg_field(
            FormSection::PgDetails,
            "meal_cuisine_ids",
            "Meal Speciality (Optional)",
            FieldType::Checkbox,
        )
    }
}

fn populate_cuisines(record: &PersistedListing) -> Option<FieldValue> {
    record
        .value_at("flat_details.meal_cuisine_ids")
        .filter(|value| !value.is_blank())
}

pub(crate) fn notice_period() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        helper: Some(days_helper),
        validate: Some(validate_notice_period),
        ..pg_field(
            FormSection::PgDetails,
            "notice_period_in_days",
            "Notice Period (Days)",
            FieldType::Number,
        )
    }
}

fn validate_notice_period(ctx: &FieldContext<'_>) -> Verdict {
    numeric_at_most(
        ctx,
        bounds::PG_MAX_NOTICE_DAYS,
        "Notice Period should be a number",
        "Notice Period should be less than 120 days",
    )
}

pub(crate) fn lock_in_period() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        helper: Some(days_helper),
        validate: Some(validate_lock_in_period),
        ..pg_field(
            FormSection::PgDetails,
            "lock_in_period",
            "Lock in Period (Days)",
            FieldType::Number,
        )
    }
}

fn validate_lock_in_period(ctx: &FieldContext<'_>) -> Verdict {
    numeric_at_most(
        ctx,
        bounds::PG_MAX_LOCK_IN_DAYS,
        "Lock In Period should be a number",
        "Lock In Period should be less than 365 days",
    )
}

/// "Day"/"Days" suffix; nothing for zero.
fn days_helper(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.number()
        .filter(|days| *days != 0.0)
        .map(|days| format::day_label(days).to_string())
}

pub(crate) fn common_areas() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: options(&[
            (1, "Living Room"),
            (2, "Kitchen"),
            (4, "Dining Hall"),
            (3, "Study Room / Library"),
            (5, "Breakout Room"),
        ]),
        ..pg_field(
            FormSection::PgDetails,
            "common_area_type_ids",
            "Common Areas",
            FieldType::Checkbox,
        )
    }
}

pub(crate) fn property_manager() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: options(&[(0, "Landlord"), (1, "Caretaker"), (2, "Dedicated Professional")]),
        ..pg_field(
            FormSection::PgDetails,
            "property_manager_type_id",
            "Property Managed By",
            FieldType::Radio,
        )
    }
}

pub(crate) fn manager_on_property() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: yes_no(),
        ..pg_field(
            FormSection::PgDetails,
            "manager_on_property",
            "Property Manager stays at Property",
            FieldType::Radio,
        )
    }
}

/// Yes/No house rule, pre-filled from `flat_details.restrictions`.
fn house_rule(key: &str, title: &str) -> FieldDescriptor {
    let populate = mappings::restriction_id(key)
        .map(PopulateRule::Restriction)
        .unwrap_or(PopulateRule::Locator);
    FieldDescriptor {
        required: Requirement::Always,
        options: yes_no(),
        populate,
        ..pg_field(FormSection::PgDetails, key, title, FieldType::Radio)
    }
}

pub(crate) fn house_rules() -> Vec<FieldDescriptor> {
    vec![
        house_rule("is_non_veg_allowed", "Non Veg Allowed"),
        house_rule("is_opposite_sex_allowed", "Opposite Sex Allowed"),
        any_time_allowed(),
        last_entry_time(),
        house_rule("are_visitors_allowed", "Visitors Allowed"),
        house_rule("is_guardian_allowed", "Guardian Allowed"),
        house_rule("is_drinking_allowed", "Drinking Allowed"),
        house_rule("is_smoking_allowed", "Smoking Allowed"),
    ]
}

/// Stored as `timing_restriction`, so "Yes" (any time) is `false`.
fn any_time_allowed() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: vec![FieldOption::new(false, "Yes"), FieldOption::new(true, "No")],
        ..pg_field(
            FormSection::PgDetails,
            "timing_restriction",
            "Any Time Allowed",
            FieldType::Radio,
        )
    }
}

fn timing_restricted(ctx: &FieldContext<'_>) -> bool {
    ctx.basic().timing_restriction == Some(true)
}

fn answer_if_restricted(ctx: &FieldContext<'_>) -> Option<FieldValue> {
    timing_restricted(ctx).then(|| ctx.value.clone()).flatten()
}

fn last_entry_time() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::When(timing_restricted),
        options: LAST_ENTRY_TIMES
            .iter()
            .map(|time| FieldOption::new(*time, *time))
            .collect(),
        visible: Some(timing_restricted),
        response: Some(answer_if_restricted),
        ..pg_field(
            FormSection::PgDetails,
            "last_entry_time",
            "Last Time Entry",
            FieldType::Dropdown,
        )
    }
}

// Rooms: answered once per offering group.

fn room_field(key: &str, title: &str, field_type: FieldType) -> FieldDescriptor {
    FieldDescriptor {
        section: FormSection::PgRooms,
        path: Some(format!("selfUpload.basic.offerings[].{key}")),
        populate: PopulateRule::Skip,
        error_tracking: ErrorTracking::Never,
        ..FieldDescriptor::new(key, title, field_type)
    }
}

pub(crate) fn room_type() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        track_change: true,
        options: options(&[
            (4, "Private Room"),
            (5, "Double Sharing"),
            (6, "Triple Sharing"),
            (7, "3+ Sharing"),
        ]),
        ..room_field("occupancy_type_id", "Room Type", FieldType::Radio)
    }
}

pub(crate) fn room_beds() -> FieldDescriptor {
    FieldDescriptor {
        max_length: Some(2),
        ..room_field("total_beds", "Total Beds in this Room (Optional)", FieldType::Number)
    }
}

pub(crate) fn room_rent() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(9),
        helper: Some(currency_helper),
        validate: Some(validate_room_rent),
        ..room_field("monthly_rent", "Rent", FieldType::Number)
    }
}

fn validate_room_rent(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::PG_MONEY, "Rent should be between 0 and 50 Lakhs")
}

pub(crate) fn room_deposit() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(9),
        default_value: Some(FieldValue::Number(0.0)),
        helper: Some(currency_helper),
        validate: Some(validate_room_deposit),
        response: Some(deposit_or_zero),
        ..room_field("security_deposit", "Security Deposit", FieldType::Number)
    }
}

fn validate_room_deposit(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::PG_MONEY, "Deposit should be between 0 and 50 Lakhs")
}

fn deposit_or_zero(ctx: &FieldContext<'_>) -> Option<FieldValue> {
    Some(ctx.value.clone().unwrap_or(FieldValue::Number(0.0)))
}

pub(crate) fn facilities() -> FieldDescriptor {
    FieldDescriptor {
        answered: AnswerRule::NonEmpty,
        options: options(&[
            (74, "Personal Cupboard"),
            (76, "Table Chair"),
            (11, "TV in Room"),
            (77, "Attached Balcony"),
            (78, "Attached Bathroom"),
            (79, "Meals Included"),
        ]),
        ..room_field("amenity_ids", "Facilities Offered", FieldType::Checkbox)
    }
}

fn has_attached_bathroom(ctx: &FieldContext<'_>) -> bool {
    ctx.offering()
        .is_some_and(|offering| offering.has_amenity(ATTACHED_BATHROOM_AMENITY))
}

/// Hidden rooms still count as answered with the default style.
fn bathroom_style_answer(ctx: &FieldContext<'_>) -> Option<FieldValue> {
    if has_attached_bathroom(ctx) {
        ctx.value.clone()
    } else {
        Some(FieldValue::Number(1.0))
    }
}

pub(crate) fn bathroom_style() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        options: options(&[(2, "Western"), (3, "Indian")]),
        visible: Some(has_attached_bathroom),
        response: Some(bathroom_style_answer),
        ..room_field("offering_details.toilet_type_id", "Bathroom Style", FieldType::Radio)
    }
}

// Extras.

pub(crate) fn extras_heading() -> FieldDescriptor {
    FieldDescriptor::heading(FormSection::PgExtras, "OTHER PG DETAILS")
}

fn charge(key: &str, title: &str, validate: fn(&FieldContext<'_>) -> Verdict) -> FieldDescriptor {
    FieldDescriptor {
        max_length: Some(9),
        helper: Some(currency_helper),
        validate: Some(validate),
        ..pg_field(FormSection::PgExtras, key, title, FieldType::Number)
    }
}

pub(crate) fn move_in_charges() -> FieldDescriptor {
    FieldDescriptor {
        track_change: true,
        ..charge(
            "one_time_move_in_charges",
            "Onetime Move in Charges (Optional)",
            validate_money,
        )
    }
}

pub(crate) fn meal_charges() -> FieldDescriptor {
    charge("meal_charges", "Meal Charges per Month (Optional)", validate_money)
}

pub(crate) fn electricity_charges() -> FieldDescriptor {
    charge(
        "electricity_charges",
        "Electricity Charges per Month (Optional)",
        validate_electricity,
    )
}

fn validate_money(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::PG_MONEY, MONEY_MESSAGE)
}

fn validate_electricity(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::PG_ELECTRICITY, "Should be between 0 and 10 Thousand")
}

pub(crate) fn additional_information() -> FieldDescriptor {
    FieldDescriptor {
        track_change: true,
        max_length: Some(bounds::PG_ADDITIONAL_INFO_MAX_CHARS),
        helper: Some(characters_used),
        validate: Some(validate_additional_information),
        ..pg_field(
            FormSection::PgExtras,
            "additional_information",
            "Add Additional Information (Optional)",
            FieldType::Textarea,
        )
    }
}

fn text_length(ctx: &FieldContext<'_>) -> usize {
    ctx.value
        .as_ref()
        .and_then(FieldValue::as_text)
        .map_or(0, |text| text.chars().count())
}

fn characters_used(ctx: &FieldContext<'_>) -> Option<String> {
    Some(format!(
        "{} / {}",
        text_length(ctx),
        bounds::PG_ADDITIONAL_INFO_MAX_CHARS
    ))
}

fn validate_additional_information(ctx: &FieldContext<'_>) -> Verdict {
    if text_length(ctx) <= bounds::PG_ADDITIONAL_INFO_MAX_CHARS {
        Verdict::Pass
    } else {
        Verdict::reject("Should be at most 1500 characters")
    }
}

