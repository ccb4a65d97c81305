//! Brokerage questions, asked only of broker profiles.

use super::currency_helper;
use crate::forms::self_upload::bounds;
use crate::forms::self_upload::descriptor::{
    yes_no, AnswerRule, FieldContext, FieldDescriptor, FieldOption, FieldParams, FieldType,
    PopulateRule, Requirement,
};
use crate::forms::self_upload::domain::{FieldValue, OptionKey, Service};
use crate::forms::self_upload::outcome::Verdict;

const INVALID_MESSAGE: &str = "Please enter valid brokerage";
const BUY_CEILING_MESSAGE: &str = "Brokerage should be in between Rs. 100 to Rs. 99 Cr.";
const LOW_MESSAGE: &str = "Brokerage seems low as per market standards";
const HIGH_RENT_MESSAGE: &str = "Brokerage seems high as per market standards";
const HIGH_PRICE_MESSAGE: &str = "Brokerage cannot be more than 15% of the sale price";

/// Amounts at or below this are treated as still being typed.
const SOFT_CHECK_FLOOR: f64 = 99.0;

fn prefix(service: Service) -> &'static str {
    match service {
        Service::Rent => "rent",
        Service::Buy | Service::Pg => "buy",
    }
}

/// "Do you charge brokerage?" for the current service.
pub(crate) fn chargeable(params: &FieldParams) -> Option<FieldDescriptor> {
    if !params.is_broker_profile {
        return None;
    }

    let key = format!("is_{}_brokerage_chargeable", prefix(params.service));
    let descriptor = FieldDescriptor {
        required: Requirement::Always,
        track_change: true,
        options: yes_no(),
        ..FieldDescriptor::new(key.as_str(), "Do you charge brokerage?", FieldType::Radio)
    }
    .at_basic()
    .stored_at(format!("user_flats[0].user_flat_details.{key}"));
    Some(descriptor)
}

/// "Brokerage Negotiable" tick box, shown once brokerage is charged.
pub(crate) fn negotiable(params: &FieldParams) -> Option<FieldDescriptor> {
    if !params.is_broker_profile {
        return None;
    }

    let key = format!("is_{}_brokerage_negotiable", prefix(params.service));
    let descriptor = FieldDescriptor {
        quick_view: true,
        track_change: true,
        options: vec![FieldOption::new(true, "Brokerage Negotiable")],
        answered: AnswerRule::Always,
        populate: PopulateRule::Skip,
        visible: Some(brokerage_charged),
        response: Some(ticked),
        ..FieldDescriptor::new(key.as_str(), "", FieldType::Checkbox)
    }
    .at_basic()
    .stored_at(format!("user_flats[0].user_flat_details.{key}"));
    Some(descriptor)
}

/// The tick box answers `true` iff its first selected key is `true`.
fn ticked(ctx: &FieldContext<'_>) -> Option<FieldValue> {
    let checked = match ctx.value.as_ref() {
        Some(FieldValue::List(keys)) => keys.first() == Some(&OptionKey::Bool(true)),
        Some(FieldValue::Bool(value)) => *value,
        _ => false,
    };
    Some(FieldValue::Bool(checked))
}

/// Chargeable flag of the service the listing is being created for.
pub(crate) fn brokerage_charged(ctx: &FieldContext<'_>) -> bool {
    let basic = ctx.basic();
    let flag = match ctx.snapshot.service {
        Service::Rent => basic.is_rent_brokerage_chargeable,
        Service::Buy => basic.is_buy_brokerage_chargeable,
        Service::Pg => None,
    };
    flag.unwrap_or(false)
}

pub(crate) fn rent_brokerage() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(9),
        track_change: true,
        helper: Some(currency_helper),
        visible: Some(brokerage_charged),
        validate: Some(validate_rent_brokerage),
        soft_check: Some(check_rent_brokerage),
        ..FieldDescriptor::new("rent_brokerage", "Brokerage (in Rupees)", FieldType::Number)
    }
    .at_basic()
    .stored_at("user_flats[0].user_flat_details.rent_brokerage")
}

fn validate_rent_brokerage(ctx: &FieldContext<'_>) -> Verdict {
    super::within(ctx, bounds::RENT_BROKERAGE, INVALID_MESSAGE)
}

fn check_rent_brokerage(ctx: &FieldContext<'_>) -> Option<String> {
    let rent = ctx.basic().rent.filter(|rent| *rent > 0.0)?;
    let value = ctx.number().filter(|value| *value > SOFT_CHECK_FLOOR)?;
    if value <= bounds::RENT_BROKERAGE_LOW_RATIO * rent {
        Some(LOW_MESSAGE.to_string())
    } else if value >= rent + 1.0 {
        Some(HIGH_RENT_MESSAGE.to_string())
    } else {
        None
    }
}

pub(crate) fn buy_brokerage() -> FieldDescriptor {
    FieldDescriptor {
        required: Requirement::Always,
        max_length: Some(12),
        track_change: true,
        helper: Some(currency_helper),
        visible: Some(brokerage_charged),
        validate: Some(validate_buy_brokerage),
        soft_check: Some(check_buy_brokerage),
        ..FieldDescriptor::new("buy_brokerage", "Brokerage (in Rupees)", FieldType::Number)
    }
    .at_basic()
    .stored_at("user_flats[0].user_flat_details.buy_brokerage")
}

fn validate_buy_brokerage(ctx: &FieldContext<'_>) -> Verdict {
    match ctx.number() {
        None => Verdict::Incomplete,
        Some(value) if value < bounds::BUY_BROKERAGE.min => Verdict::reject(INVALID_MESSAGE),
        Some(value) if value > bounds::BUY_BROKERAGE.max => Verdict::reject(BUY_CEILING_MESSAGE),
        Some(_) => Verdict::Pass,
    }
}

fn check_buy_brokerage(ctx: &FieldContext<'_>) -> Option<String> {
    let price = ctx.basic().price.filter(|price| *price > 0.0)?;
    let value = ctx.number().filter(|value| *value > SOFT_CHECK_FLOOR)?;
    if value <= bounds::BUY_BROKERAGE_LOW_RATIO * price {
        Some(LOW_MESSAGE.to_string())
    } else if value > bounds::BUY_BROKERAGE_HIGH_RATIO * price {
        Some(HIGH_PRICE_MESSAGE.to_string())
    } else {
        None
    }
}
