//! Applies descriptors to a snapshot: visibility, hard and soft checks, answers.

use serde::Serialize;
use tracing::debug;

use super::descriptor::{AnswerRule, FieldContext, FieldDescriptor, FormSection, PopulateRule, Requirement};
use super::domain::{FieldValue, ListingSnapshot};
use super::outcome::{
    AnalyticsEvent, CheckType, ErrorTracking, FieldReport, FieldResult, SoftCheckOutcome,
    TrackingFlags, ValidationOutcome, Verdict,
};
use super::persisted::PersistedListing;

/// Context for `descriptor`, falling back to its default value when nothing was entered.
pub fn context<'a>(
    descriptor: &FieldDescriptor,
    snapshot: &'a ListingSnapshot,
    group_index: Option<usize>,
    tracking: TrackingFlags,
) -> FieldContext<'a> {
    let mut ctx = FieldContext::for_field(descriptor, snapshot, group_index, tracking);
    if !ctx.has_value() {
        if let Some(default) = descriptor.default_value.clone() {
            ctx.value = Some(default);
        }
    }
    ctx
}

pub fn is_visible(descriptor: &FieldDescriptor, ctx: &FieldContext<'_>) -> bool {
    descriptor.visible.map_or(true, |visible| visible(ctx))
}

pub fn is_required(descriptor: &FieldDescriptor, ctx: &FieldContext<'_>) -> bool {
    match descriptor.required {
        Requirement::Always => true,
        Requirement::Never => false,
        Requirement::When(predicate) => predicate(ctx),
    }
}

/// Hard check. Hidden fields always pass; absent values never reach the validator.
pub fn validate(descriptor: &FieldDescriptor, ctx: &FieldContext<'_>) -> ValidationOutcome {
    if !is_visible(descriptor, ctx) {
        return ValidationOutcome::untracked(FieldResult::Valid);
    }

    let required = is_required(descriptor, ctx);
    let missing = if required {
        FieldResult::Incomplete
    } else {
        FieldResult::Unanswered
    };
    if !ctx.has_value() {
        return ValidationOutcome::untracked(missing);
    }

    let verdict = descriptor.validate.map_or(Verdict::Pass, |check| check(ctx));
    match verdict {
        Verdict::Pass => ValidationOutcome::untracked(FieldResult::Valid),
        Verdict::Incomplete => ValidationOutcome::untracked(missing),
        Verdict::Reject(message) => {
            let analytics = reports_hard_failures(descriptor, ctx.tracking)
                .then(|| AnalyticsEvent::error_check(&descriptor.key, &message, CheckType::Hard));
            ValidationOutcome {
                result: FieldResult::Rejected(message),
                analytics,
            }
        }
    }
}

fn reports_hard_failures(descriptor: &FieldDescriptor, tracking: TrackingFlags) -> bool {
    match descriptor.error_tracking {
        ErrorTracking::Always => true,
        ErrorTracking::OnRequest => tracking.tracking,
        ErrorTracking::Never => false,
    }
}

/// Non-blocking warning for a visible, answered field.
pub fn soft_check(descriptor: &FieldDescriptor, ctx: &FieldContext<'_>) -> SoftCheckOutcome {
    let Some(check) = descriptor.soft_check else {
        return SoftCheckOutcome::default();
    };
    if !is_visible(descriptor, ctx) || !ctx.has_value() {
        return SoftCheckOutcome::default();
    }

    let warning = check(ctx);
    let reported = ctx.tracking.tracking
        && ctx.tracking.send_tracking
        && descriptor.error_tracking != ErrorTracking::Never;
    let analytics = warning
        .as_deref()
        .filter(|_| reported)
        .map(|message| AnalyticsEvent::error_check(&descriptor.key, message, CheckType::Soft));
    SoftCheckOutcome { warning, analytics }
}

pub fn helper(descriptor: &FieldDescriptor, ctx: &FieldContext<'_>) -> Option<String> {
    descriptor.helper.and_then(|helper| helper(ctx))
}

/// Value the field submits, after its response hook.
pub fn answer(descriptor: &FieldDescriptor, ctx: &FieldContext<'_>) -> Option<FieldValue> {
    match descriptor.response {
        Some(response) => response(ctx),
        None => ctx.value.clone(),
    }
}

pub fn is_answered(descriptor: &FieldDescriptor, ctx: &FieldContext<'_>) -> bool {
    let answer = answer(descriptor, ctx);
    match descriptor.answered {
        AnswerRule::Always => true,
        AnswerRule::NonEmpty => answer
            .as_ref()
            .and_then(FieldValue::as_list)
            .is_some_and(|keys| !keys.is_empty()),
        AnswerRule::ValuePresent => answer.is_some_and(|value| !value.is_blank()),
    }
}

/// Initial value when editing a stored listing. Missing paths yield `None`.
pub fn populate(descriptor: &FieldDescriptor, record: &PersistedListing) -> Option<FieldValue> {
    match descriptor.populate {
        PopulateRule::Locator => descriptor
            .param_state
            .as_deref()
            .and_then(|locator| record.value_at(locator)),
        PopulateRule::Restriction(rule_id) => record.restriction(rule_id),
        PopulateRule::Custom(populate) => populate(record),
        PopulateRule::Skip => None,
    }
}

/// Evaluation of one section (or one PG room group) for a single pass of the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub section: FormSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_index: Option<usize>,
    pub fields: Vec<FieldReport>,
    /// Visible fields that count as answered.
    pub answered: usize,
    pub visible: usize,
    /// No visible field is incomplete or rejected.
    pub complete: bool,
}

impl SectionReport {
    pub fn field(&self, key: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|report| report.key == key)
    }

    pub fn analytics(&self) -> impl Iterator<Item = &AnalyticsEvent> {
        self.fields.iter().flat_map(|report| report.analytics.iter())
    }
}

pub fn evaluate_field(
    descriptor: &FieldDescriptor,
    snapshot: &ListingSnapshot,
    group_index: Option<usize>,
    tracking: TrackingFlags,
) -> FieldReport {
    let ctx = context(descriptor, snapshot, group_index, tracking);
    let visible = is_visible(descriptor, &ctx);
    let validation = validate(descriptor, &ctx);
    let soft = soft_check(descriptor, &ctx);
    let analytics = validation
        .analytics
        .into_iter()
        .chain(soft.analytics)
        .collect();

    FieldReport {
        key: descriptor.key.clone(),
        title: descriptor.title.clone(),
        visible,
        required: visible && is_required(descriptor, &ctx),
        result: validation.result,
        warning: soft.warning,
        helper: helper(descriptor, &ctx),
        answer: answer(descriptor, &ctx),
        answered: is_answered(descriptor, &ctx),
        analytics,
    }
}

pub fn evaluate_section(
    section: FormSection,
    fields: &[FieldDescriptor],
    snapshot: &ListingSnapshot,
    tracking: TrackingFlags,
    group_index: Option<usize>,
) -> SectionReport {
    let fields: Vec<FieldReport> = fields
        .iter()
        .map(|descriptor| evaluate_field(descriptor, snapshot, group_index, tracking))
        .collect();

    let visible = fields.iter().filter(|report| report.visible).count();
    let answered = fields
        .iter()
        .filter(|report| report.visible && report.answered)
        .count();
    let complete = !fields.iter().any(|report| report.result.is_blocking());

    debug!(
        section = section.label(),
        ?group_index,
        visible,
        answered,
        complete,
        "evaluated form section"
    );

    SectionReport {
        section,
        group_index,
        fields,
        answered,
        visible,
        complete,
    }
}
