//! Descriptor tables for every wizard field.

pub(crate) mod basic;
pub(crate) mod brokerage;
pub(crate) mod pg;

use super::bounds::Bounds;
use super::descriptor::FieldContext;
use super::format;
use super::outcome::Verdict;

/// Hard check against a fixed inclusive band.
pub(crate) fn within(ctx: &FieldContext<'_>, bounds: Bounds, message: &str) -> Verdict {
    match ctx.number() {
        None => Verdict::Incomplete,
        Some(value) if bounds.contains(value) => Verdict::Pass,
        Some(_) => Verdict::reject(message),
    }
}

pub(crate) fn currency_helper(ctx: &FieldContext<'_>) -> Option<String> {
    ctx.number().map(format::currency)
}

/// "Price per unit area should be between 20 and 20000".
pub(crate) fn per_unit_message(bounds: Bounds) -> String {
    format!(
        "Price per unit area should be between {} and {}",
        format::plain_number(bounds.min),
        format::plain_number(bounds.max)
    )
}

pub(crate) fn area_message(bounds: Bounds) -> String {
    format!(
        "Saleable area should be between {} and {}",
        format::plain_number(bounds.min),
        format::plain_number(bounds.max)
    )
}
