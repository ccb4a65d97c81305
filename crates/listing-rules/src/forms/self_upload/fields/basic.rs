use chrono::Months;

use super::{area_message, currency_helper, per_unit_message, within};
use crate::forms::self_upload::bounds::{self, Bounds};
use crate::forms::self_upload::descriptor::{
    counts, FieldContext, FieldDescriptor, FieldOption, FieldParams, FieldType, Requirement,
};
use crate::forms::self_upload::domain::Service;
use crate::forms::self_upload::format;
use crate::forms::self_upload::mappings::{self, AreaUnit, FURNISH_TYPES};
use crate::forms::self_upload::outcome::{ErrorTracking, Verdict};

const DEPOSIT_MESSAGE: &str = "Deposit should be between 0 and 50 Lakhs";
const PRICE_MESSAGE: &str = "Price should be between 1 Lakh and 99 Crore";
const RENT_MESSAGE: &str = "Rent should be between 1500 and 20 Lakhs";
const AVAILABILITY_MESSAGE: &str = "Available date should be within 6 months from the current date";
const MAINTENANCE_MESSAGE: &str = "Maintenance charges should be between 0 and 5 Lakhs";
const MAINTENANCE_RENT_MESSAGE: &str = "Maintenance charges cannot be greater than 50% of rent";
const AGE_MESSAGE: &str = "Age of property should be between 0 and 99";
const ROAD_WIDTH_MESSAGE: &str = "Facing road width should be between 5 and 500";
const DIMENSION_MISMATCH_MESSAGE: &str = "Area value is not as per the value of the dimensions";
const MINIMUM_PLOT_MESSAGE: &str = "Minimum area can be 5 sq yards/ 45 sqft";
const AGE_TOOLTIP: &str =
    "This field describes how old is the property. For new properties enter 0 years.";

pub(crate) fn security_deposit() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(9),
        quick_view: true,
        track_change: true,
        helper: Some(currency_helper),
        validate: Some(validate_security_deposit),
        ..FieldDescriptor::new("security_deposit", "Security Deposit", FieldType::Number)
    }
    .at_basic()
    .stored_at("user_flats[0].user_flat_details.security_deposit")
}

fn validate_security_deposit(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::SECURITY_DEPOSIT, DEPOSIT_MESSAGE)
}

pub(crate) fn furnish_type() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        track_change: true,
        options: FURNISH_TYPES
            .iter()
            .map(|(id, label)| FieldOption::new(*id, *label))
            .collect(),
        ..FieldDescriptor::new("furnish_type_id", "Furnish Type", FieldType::Radio)
    }
    .at_basic()
    .stored_at("flat_details.furnish_type_id")
}

/// Sale price; absent for rentals.
pub(crate) fn price(params: &FieldParams) -> Option<FieldDescriptor> {
    if params.service == Service::Rent {
        return None;
    }

    let title = if params.is_plot { "Plot Price" } else { "Cost" };
    let descriptor = FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(12),
        track_change: true,
        helper: Some(currency_helper),
        validate: Some(validate_price),
        ..FieldDescriptor::new("price", title, FieldType::Number)
    }
    .at_basic()
    .stored_at("user_flats[0].user_flat_details.price");
    Some(descriptor)
}

/// The price band follows the plot area when one is known, else the built-up area.
/// The absolute band only applies when neither area is available.
fn validate_price(ctx: &FieldContext<'_>) -> Verdict {
    let Some(value) = ctx.number() else {
        return Verdict::Incomplete;
    };
    if value > bounds::PRICE_ABSOLUTE.max {
        return Verdict::reject(PRICE_MESSAGE);
    }

    let basic = ctx.basic();
    if let Some(plot_area) = basic.plot_area {
        return within_scaled(value, bounds::PRICE_PER_PLOT_UNIT, plot_area);
    }
    if let Some(built_up_area) = basic.built_up_area {
        return within_scaled(value, bounds::PRICE_PER_BUILT_UP_UNIT, built_up_area);
    }

    if bounds::PRICE_ABSOLUTE.contains(value) {
        Verdict::Pass
    } else {
        Verdict::reject(PRICE_MESSAGE)
    }
}

fn within_scaled(value: f64, per_unit: Bounds, area: f64) -> Verdict {
    if per_unit.scaled(area).contains(value) {
        Verdict::Pass
    } else {
        Verdict::reject(per_unit_message(per_unit))
    }
}

pub(crate) fn rent() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(9),
        track_change: true,
        helper: Some(currency_helper),
        validate: Some(validate_rent),
        ..FieldDescriptor::new("rent", "Monthly Rent", FieldType::Number)
    }
    .at_basic()
    .stored_at("user_flats[0].user_flat_details.rent")
}

fn validate_rent(ctx: &FieldContext<'_>) -> Verdict {
    let Some(value) = ctx.number() else {
        return Verdict::Incomplete;
    };
    if !bounds::RENT_ABSOLUTE.contains(value) {
        return Verdict::reject(RENT_MESSAGE);
    }
    match ctx.basic().built_up_area {
        Some(area) => within_scaled(value, bounds::RENT_PER_BUILT_UP_UNIT, area),
        None => Verdict::Pass,
    }
}

/// Availability for rentals, possession date for under-construction sales.
pub(crate) fn available_from(params: &FieldParams) -> Option<FieldDescriptor> {
    if params.service != Service::Rent && !params.is_uc_property {
        return None;
    }

    let title = if params.service == Service::Rent {
        "Available From"
    } else {
        "Possession Date"
    };
    let descriptor = FieldDescriptor {
        required: Requirement::Always,
        quick_view: true,
        track_change: true,
        disable_past_dates: params.is_uc_property,
        immediate_option: params.show_immediate && !params.is_plot && params.is_uc_property,
        helper: Some(date_helper),
        soft_check: Some(check_availability_window),
        ..FieldDescriptor::new("available_from", title, FieldType::Date)
    }
    .at_basic()
    .stored_at("flat_details.available_from");
    Some(descriptor)
}

fn date_helper(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.value
        .as_ref()
        .and_then(|value| value.as_date())
        .map(format::date_label)
}

fn check_availability_window(ctx: &FieldContext<'_>) -> Option<String> {
    let available = ctx.value.as_ref()?.as_date()?;
    let latest = ctx
        .snapshot
        .as_of
        .checked_add_months(Months::new(bounds::AVAILABILITY_WINDOW_MONTHS))?;
    (available > latest).then(|| AVAILABILITY_MESSAGE.to_string())
}

pub(crate) fn built_up_area() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(8),
        quick_view: true,
        track_change: true,
        helper: Some(built_up_area_helper),
        validate: Some(validate_built_up_area),
        ..FieldDescriptor::new("built_up_area", "Built Up Area", FieldType::Number)
    }
    .at_basic()
    .stored_at("flat_details.built_up_area")
}

fn built_up_area_helper(ctx: &FieldContext<'_>) -> Option<String> {
    Some(format::with_unit(ctx.number(), "Sq. ft."))
}

fn validate_built_up_area(ctx: &FieldContext<'_>) -> Verdict {
    let Some(value) = ctx.number() else {
        return Verdict::Incomplete;
    };
    let basic = ctx.basic();
    let bedrooms = mappings::bedroom_count(basic.apartment_type_id);
    let independent = mappings::is_independent_house_like(basic.property_type_id);
    match bounds::built_up_area_bounds(independent, bedrooms) {
        Some(range) if !range.contains(value) => Verdict::reject(area_message(range)),
        _ => Verdict::Pass,
    }
}

fn area_unit_of(ctx: &FieldContext<'_>) -> AreaUnit {
    ctx.basic()
        .area_unit_id
        .and_then(AreaUnit::from_id)
        .unwrap_or(AreaUnit::DEFAULT)
}

pub(crate) fn plot_area() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(8),
        quick_view: true,
        track_change: true,
        validate: Some(validate_plot_area),
        ..FieldDescriptor::new("plot_area", "Plot Area", FieldType::Number)
    }
    .at_basic()
    .stored_at("flat_details.plot_area")
}

/// Unit band first, then consistency with `length * width` within the tolerance.
fn validate_plot_area(ctx: &FieldContext<'_>) -> Verdict {
    let Some(value) = ctx.number() else {
        return Verdict::Incomplete;
    };
    let unit = area_unit_of(ctx);
    let unit_bounds = unit.plot_area_bounds();
    if !unit_bounds.contains(value) {
        return Verdict::reject(area_message(unit_bounds));
    }

    let basic = ctx.basic();
    let area = basic.plot_length.unwrap_or(0.0) * basic.plot_width.unwrap_or(0.0);
    let floor = unit.minimum_plot_area();
    let slack = area * bounds::PLOT_DIMENSION_TOLERANCE;
    let lower = (area - slack).max(floor);
    let upper = if area + slack > 0.0 {
        area + slack
    } else {
        bounds::PLOT_AREA_WITHOUT_DIMENSIONS
    };

    if Bounds::new(lower, upper).contains(value) {
        Verdict::Pass
    } else if value >= floor {
        Verdict::reject(DIMENSION_MISMATCH_MESSAGE)
    } else {
        Verdict::reject(MINIMUM_PLOT_MESSAGE)
    }
}

pub(crate) fn area_unit() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        quick_view: true,
        track_change: true,
        options: AreaUnit::ALL
            .into_iter()
            .map(|unit| FieldOption::new(unit.id(), unit.label()))
            .collect(),
        helper: Some(area_unit_helper),
        ..FieldDescriptor::new("area_unit_id", "Area Unit", FieldType::Dropdown)
    }
    .at_basic()
    .stored_at("flat_details.area_unit_id")
}

fn area_unit_helper(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.integer()
        .and_then(AreaUnit::from_id)
        .map(|unit| unit.label().to_string())
}

pub(crate) fn plot_length() -> FieldDescriptor {
    plot_dimension("plot_length", "Length", validate_plot_length)
}

pub(crate) fn plot_width() -> FieldDescriptor {
    plot_dimension("plot_width", "Width", validate_plot_width)
}

fn plot_dimension(
    key: &str,
    title: &str,
    validate: fn(&FieldContext<'_>) -> Verdict,
) -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(4),
        quick_view: true,
        track_change: true,
        helper: Some(dimension_helper),
        validate: Some(validate),
        ..FieldDescriptor::new(key, title, FieldType::Number)
    }
    .at_basic()
    .stored_at(format!("flat_details.{key}"))
}

fn validate_plot_length(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::PLOT_DIMENSION, "Length should be between 1 and 10000")
}

fn validate_plot_width(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::PLOT_DIMENSION, "Width should be between 1 and 10000")
}

fn dimension_helper(ctx: &FieldContext<'_>) -> Option<String> {
    let unit = ctx.basic().area_unit_id.and_then(AreaUnit::from_id);
    Some(format::dimension_text(ctx.number(), unit))
}

pub(crate) fn facing_road_width() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(8),
        quick_view: true,
        track_change: true,
        helper: Some(dimension_helper),
        soft_check: Some(check_facing_road_width),
        ..FieldDescriptor::new("facing_road_width", "Width of Facing Road", FieldType::Number)
    }
    .at_basic()
    .stored_at("flat_details.facing_road_width")
}

/// Narrow (0 to 4) and very wide (501 and up) roads are unusual, not invalid.
fn check_facing_road_width(ctx: &FieldContext<'_>) -> Option<String> {
    let value = ctx.number()?;
    let narrow = bounds::FACING_ROAD_NARROW.contains(value);
    let wide = value >= bounds::FACING_ROAD_WIDE_FROM;
    (narrow || wide).then(|| ROAD_WIDTH_MESSAGE.to_string())
}

/// Monthly maintenance; plots have none.
pub(crate) fn maintenance(params: &FieldParams) -> Option<FieldDescriptor> {
    if params.is_plot {
        return None;
    }

    let base = FieldDescriptor {
        max_length: Some(8),
        quick_view: true,
        track_change: true,
        helper: Some(currency_helper),
        validate: Some(validate_maintenance),
        ..FieldDescriptor::new("maintenance_charges", "Maintenance Charges (per month)", FieldType::Number)
    };

    let descriptor = if params.service == Service::Rent {
        FieldDescriptor {
            key: "maintenance_charges_rent".to_string(),
            soft_check: Some(check_maintenance_against_rent),
            ..base
        }
    } else {
        FieldDescriptor {
            key: "maintenance_charges_buy".to_string(),
            ..base
        }
    };
    let param_state = format!("flat_details.{}", descriptor.key);
    Some(descriptor.at_basic().stored_at(param_state))
}

fn validate_maintenance(ctx: &FieldContext<'_>) -> Verdict {
    match ctx.integer() {
        None => Verdict::Incomplete,
        Some(value) if bounds::MAINTENANCE.contains(value as f64) => Verdict::Pass,
        Some(_) => Verdict::reject(MAINTENANCE_MESSAGE),
    }
}

fn check_maintenance_against_rent(ctx: &FieldContext<'_>) -> Option<String> {
    let rent = ctx.basic().rent?;
    let value = ctx.number()?;
    (value > bounds::MAINTENANCE_RENT_RATIO * rent).then(|| MAINTENANCE_RENT_MESSAGE.to_string())
}

pub(crate) fn age_of_property() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(2),
        quick_view: true,
        track_change: true,
        helper: Some(age_tooltip),
        validate: Some(validate_age),
        ..FieldDescriptor::new("age_of_property", "Age of Property (in years)", FieldType::Number)
    }
    .at_basic()
    .stored_at("flat_details.age_of_property")
}

fn age_tooltip(_ctx: &FieldContext<'_>) -> Option<String> {
    Some(AGE_TOOLTIP.to_string())
}

fn validate_age(ctx: &FieldContext<'_>) -> Verdict {
    within(ctx, bounds::AGE_OF_PROPERTY, AGE_MESSAGE)
}

fn room_count(key: &str, title: &str) -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        track_change: true,
        options: counts(10),
        error_tracking: ErrorTracking::Always,
        ..FieldDescriptor::new(key, title, FieldType::Radio)
    }
    .at_basic()
}

pub(crate) fn total_bathrooms() -> FieldDescriptor {
    FieldDescriptor {
        validate: Some(validate_bathrooms),
        ..room_count("total_bathroom_count", "Bathroom")
    }
    .stored_at("total_bathroom_count")
}

pub(crate) fn total_balconies() -> FieldDescriptor {
    FieldDescriptor {
        validate: Some(validate_balconies),
        ..room_count("total_balcony_count", "Balcony")
    }
    .stored_at("flat_details.total_balcony_count")
}

pub(crate) fn covered_parking() -> FieldDescriptor {
    FieldDescriptor {
        validate: Some(validate_covered_parking),
        ..room_count("covered_parking_count", "Covered Parking")
    }
    .stored_at("flat_details.covered_parking_count")
}

pub(crate) fn open_parking() -> FieldDescriptor {
    room_count("open_parking_count", "Open Parking").stored_at("flat_details.open_parking_count")
}

fn bedrooms(ctx: &FieldContext<'_>) -> Option<i64> {
    mappings::bedroom_count(ctx.basic().apartment_type_id).map(i64::from)
}

fn validate_bathrooms(ctx: &FieldContext<'_>) -> Verdict {
    validate_rooms_over_bedrooms(ctx, "Bathrooms")
}

fn validate_balconies(ctx: &FieldContext<'_>) -> Verdict {
    validate_rooms_over_bedrooms(ctx, "Balconies")
}

fn validate_rooms_over_bedrooms(ctx: &FieldContext<'_>, noun: &str) -> Verdict {
    let Some(count) = ctx.integer() else {
        return Verdict::Incomplete;
    };
    match bedrooms(ctx) {
        Some(bedrooms) if count > bedrooms + bounds::EXTRA_ROOMS_OVER_BEDROOMS => Verdict::reject(
            format!("{noun} cannot be greater than {}", bedrooms + bounds::EXTRA_ROOMS_OVER_BEDROOMS),
        ),
        _ => Verdict::Pass,
    }
}

/// Covered and open parking share one cap.
fn validate_covered_parking(ctx: &FieldContext<'_>) -> Verdict {
    let Some(covered) = ctx.integer() else {
        return Verdict::Incomplete;
    };
    let (Some(open), Some(bedrooms)) = (ctx.basic().open_parking_count, bedrooms(ctx)) else {
        return Verdict::Pass;
    };
    let cap = bedrooms + bounds::EXTRA_PARKING_OVER_BEDROOMS;
    if covered.saturating_add(open) > cap {
        Verdict::reject(format!("Total car parking cannot be greater than {cap}"))
    } else {
        Verdict::Pass
    }
}
