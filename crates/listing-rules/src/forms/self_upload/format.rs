use chrono::NaiveDate;

use super::mappings::AreaUnit;

/// Rupee amount with Indian digit grouping, e.g. `₹ 12,34,567`.
pub fn currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("₹ {sign}{}", group_indian(&digits))
}

/// Groups the last three digits, then every two: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Plain number without a trailing `.0` for whole values.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

pub fn with_unit(value: Option<f64>, unit: &str) -> String {
    let value = value.map(plain_number).unwrap_or_default();
    format!("{value} {unit}")
}

pub fn dimension_text(value: Option<f64>, unit: Option<AreaUnit>) -> String {
    with_unit(value, unit.map(AreaUnit::dimension).unwrap_or_default())
}

pub fn day_label(days: f64) -> &'static str {
    if days > 1.0 {
        "Days"
    } else {
        "Day"
    }
}

pub fn date_label(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}
