use serde::{Deserialize, Serialize};

use super::domain::FieldValue;

/// Hard-check verdict returned by a descriptor's validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Nothing usable to check yet; not an error until submission.
    Incomplete,
    Reject(String),
}

impl Verdict {
    pub fn reject(message: impl Into<String>) -> Self {
        Verdict::Reject(message.into())
    }
}

/// Per-field validation state surfaced to the form controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FieldResult {
    Valid,
    /// Required value missing.
    Incomplete,
    Rejected(String),
    /// Optional value missing.
    Unanswered,
}

impl FieldResult {
    /// Incomplete and rejected fields hold back submission.
    pub fn is_blocking(&self) -> bool {
        matches!(self, FieldResult::Incomplete | FieldResult::Rejected(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldResult::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckType {
    #[serde(rename = "hard check")]
    Hard,
    #[serde(rename = "soft check")]
    Soft,
}

/// Analytics payload the controller may forward to its tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub field: String,
    pub error_msg: String,
    pub check_type: CheckType,
}

impl AnalyticsEvent {
    pub const ERROR_CHECK: &'static str = "ERROR_CHECK";

    pub fn error_check(field: &str, error_msg: &str, check_type: CheckType) -> Self {
        Self {
            name: Self::ERROR_CHECK.to_string(),
            field: field.to_string(),
            error_msg: error_msg.to_string(),
            check_type,
        }
    }
}

/// Which failures a descriptor reports to analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTracking {
    /// Only when the caller asks for tracking.
    #[default]
    OnRequest,
    /// Regardless of the caller's tracking flag.
    Always,
    Never,
}

/// Caller-side switches mirroring the controller's tracking toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingFlags {
    /// Emit events for hard-check failures.
    pub tracking: bool,
    /// Additionally required for soft-check events.
    pub send_tracking: bool,
}

impl Default for TrackingFlags {
    fn default() -> Self {
        Self {
            tracking: false,
            send_tracking: true,
        }
    }
}

impl TrackingFlags {
    pub const fn enabled() -> Self {
        Self {
            tracking: true,
            send_tracking: true,
        }
    }

    pub const fn disabled() -> Self {
        Self {
            tracking: false,
            send_tracking: false,
        }
    }
}

/// Result of a hard check plus the analytics event it would emit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub result: FieldResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsEvent>,
}

impl ValidationOutcome {
    pub fn untracked(result: FieldResult) -> Self {
        Self {
            result,
            analytics: None,
        }
    }
}

/// Result of a soft check. A warning never blocks submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoftCheckOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsEvent>,
}

/// Everything the controller needs to render one field for one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub key: String,
    pub title: String,
    pub visible: bool,
    pub required: bool,
    pub result: FieldResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<FieldValue>,
    pub answered: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub analytics: Vec<AnalyticsEvent>,
}
