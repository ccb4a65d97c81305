use serde::{Deserialize, Serialize};

use super::domain::{BasicDetails, FieldValue, ListingSnapshot, OptionKey, PgOffering, Service};
use super::outcome::{ErrorTracking, TrackingFlags, Verdict};
use super::persisted::PersistedListing;

pub type Validator = fn(&FieldContext<'_>) -> Verdict;
pub type SoftCheck = fn(&FieldContext<'_>) -> Option<String>;
pub type Predicate = fn(&FieldContext<'_>) -> bool;
pub type Helper = fn(&FieldContext<'_>) -> Option<String>;
pub type Response = fn(&FieldContext<'_>) -> Option<FieldValue>;
pub type Populate = fn(&PersistedListing) -> Option<FieldValue>;
pub type Factory = fn(&FieldParams) -> Option<FieldDescriptor>;

/// Wizard step a descriptor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    Basic,
    PgDetails,
    PgRooms,
    PgExtras,
}

impl FormSection {
    pub const ALL: [FormSection; 4] = [
        FormSection::Basic,
        FormSection::PgDetails,
        FormSection::PgRooms,
        FormSection::PgExtras,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FormSection::Basic => "basic",
            FormSection::PgDetails => "pg_details",
            FormSection::PgRooms => "pg_rooms",
            FormSection::PgExtras => "pg_extras",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.label() == label.trim())
    }

    /// Fields of this section are answered once per PG room group.
    pub const fn is_grouped(self) -> bool {
        matches!(self, FormSection::PgRooms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Number,
    Text,
    Radio,
    Checkbox,
    Dropdown,
    Date,
    Textarea,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub key: OptionKey,
    pub label: String,
}

impl FieldOption {
    pub fn new(key: impl Into<OptionKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Yes/No radio options.
pub fn yes_no() -> Vec<FieldOption> {
    vec![FieldOption::new(true, "Yes"), FieldOption::new(false, "No")]
}

/// `0..count` numeric options labelled with the number itself.
pub fn counts(count: i64) -> Vec<FieldOption> {
    (0..count)
        .map(|index| FieldOption::new(index, index.to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    Always,
    Never,
    When(Predicate),
}

/// How a field decides whether it counts as answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerRule {
    /// The response value is present and not blank.
    #[default]
    ValuePresent,
    /// Headings and pre-answered tick boxes.
    Always,
    /// At least one option selected.
    NonEmpty,
}

/// Where a field's initial value comes from when editing a stored listing.
#[derive(Debug, Clone, Copy)]
pub enum PopulateRule {
    /// Read the descriptor's `param_state` locator.
    Locator,
    /// Read `flat_details.restrictions[id == rule].value`.
    Restriction(i64),
    Custom(Populate),
    /// Never pre-filled.
    Skip,
}

/// Behaviour and metadata for one wizard field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: String,
    pub title: String,
    pub field_type: FieldType,
    pub section: FormSection,
    pub options: Vec<FieldOption>,
    pub required: Requirement,
    /// Locator of the live value in the snapshot.
    pub path: Option<String>,
    /// Locator of the stored value in the persisted record.
    pub param_state: Option<String>,
    pub max_length: Option<usize>,
    pub default_value: Option<FieldValue>,
    pub quick_view: bool,
    pub track_change: bool,
    pub disable_past_dates: bool,
    /// Offer an "Immediately" shortcut next to the date.
    pub immediate_option: bool,
    /// Static text rendered by raw headings.
    pub content: Option<String>,
    pub answered: AnswerRule,
    pub error_tracking: ErrorTracking,
    pub validate: Option<Validator>,
    pub soft_check: Option<SoftCheck>,
    pub visible: Option<Predicate>,
    pub helper: Option<Helper>,
    pub response: Option<Response>,
    pub populate: PopulateRule,
}

impl FieldDescriptor {
    pub fn new(key: impl Into<String>, title: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            field_type,
            section: FormSection::Basic,
            options: Vec::new(),
            required: Requirement::Never,
            path: None,
            param_state: None,
            max_length: None,
            default_value: None,
            quick_view: false,
            track_change: false,
            disable_past_dates: false,
            immediate_option: false,
            content: None,
            answered: AnswerRule::ValuePresent,
            error_tracking: ErrorTracking::OnRequest,
            validate: None,
            soft_check: None,
            visible: None,
            helper: None,
            response: None,
            populate: PopulateRule::Locator,
        }
    }

    /// Section heading without an input.
    pub fn heading(section: FormSection, content: &str) -> Self {
        Self {
            section,
            content: Some(content.to_string()),
            answered: AnswerRule::Always,
            populate: PopulateRule::Skip,
            ..Self::new(heading_key(content), "", FieldType::Raw)
        }
    }

    pub fn is_heading(&self) -> bool {
        self.field_type == FieldType::Raw
    }

    /// Locator in `selfUpload.basic`, defaulting to the key.
    pub fn at_basic(mut self) -> Self {
        self.path = Some(format!("selfUpload.basic.{}", self.key));
        self
    }

    pub fn stored_at(mut self, param_state: impl Into<String>) -> Self {
        self.param_state = Some(param_state.into());
        self
    }
}

fn heading_key(content: &str) -> String {
    let slug: String = content
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("heading_{}", slug.trim_matches('_'))
}

impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Requirement::Always, Requirement::Always) | (Requirement::Never, Requirement::Never) => true,
            (Requirement::When(a), Requirement::When(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

impl PartialEq for PopulateRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PopulateRule::Locator, PopulateRule::Locator) | (PopulateRule::Skip, PopulateRule::Skip) => true,
            (PopulateRule::Restriction(a), PopulateRule::Restriction(b)) => a == b,
            (PopulateRule::Custom(a), PopulateRule::Custom(b)) => *a as usize == *b as usize,
            _ => false,
        }
    }
}

/// Structural equality: metadata plus the identity of every hook.
impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.title == other.title
            && self.field_type == other.field_type
            && self.section == other.section
            && self.options == other.options
            && self.required == other.required
            && self.path == other.path
            && self.param_state == other.param_state
            && self.max_length == other.max_length
            && self.default_value == other.default_value
            && self.quick_view == other.quick_view
            && self.track_change == other.track_change
            && self.disable_past_dates == other.disable_past_dates
            && self.immediate_option == other.immediate_option
            && self.content == other.content
            && self.answered == other.answered
            && self.error_tracking == other.error_tracking
            && self.populate == other.populate
            && self.validate.map(|f| f as usize) == other.validate.map(|f| f as usize)
            && self.soft_check.map(|f| f as usize) == other.soft_check.map(|f| f as usize)
            && self.visible.map(|f| f as usize) == other.visible.map(|f| f as usize)
            && self.helper.map(|f| f as usize) == other.helper.map(|f| f as usize)
            && self.response.map(|f| f as usize) == other.response.map(|f| f as usize)
    }
}

/// Inputs that select a descriptor variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub service: Service,
    pub is_plot: bool,
    /// Under-construction property.
    pub is_uc_property: bool,
    pub is_broker_profile: bool,
    pub show_immediate: bool,
}

/// Registry entry: a fixed descriptor, or one built from [`FieldParams`].
#[derive(Debug, Clone)]
pub enum FieldSource {
    Static(FieldDescriptor),
    Parameterized(Factory),
}

impl FieldSource {
    pub fn resolve(&self, params: &FieldParams) -> Option<FieldDescriptor> {
        match self {
            FieldSource::Static(descriptor) => Some(descriptor.clone()),
            FieldSource::Parameterized(factory) => factory(params),
        }
    }
}

/// Input bundle handed to every field function.
#[derive(Debug, Clone)]
pub struct FieldContext<'a> {
    pub value: Option<FieldValue>,
    pub snapshot: &'a ListingSnapshot,
    /// PG room group the field is evaluated for.
    pub group_index: Option<usize>,
    pub tracking: TrackingFlags,
}

impl<'a> FieldContext<'a> {
    /// Context for `descriptor`, with the value read from its locator.
    pub fn for_field(
        descriptor: &FieldDescriptor,
        snapshot: &'a ListingSnapshot,
        group_index: Option<usize>,
        tracking: TrackingFlags,
    ) -> Self {
        let value = descriptor
            .path
            .as_deref()
            .and_then(|path| snapshot.value_at(path, group_index));
        Self {
            value,
            snapshot,
            group_index,
            tracking,
        }
    }

    pub fn basic(&self) -> &'a BasicDetails {
        &self.snapshot.basic
    }

    pub fn offering(&self) -> Option<&'a PgOffering> {
        self.snapshot.offering(self.group_index)
    }

    pub fn number(&self) -> Option<f64> {
        self.value.as_ref().and_then(FieldValue::as_number)
    }

    /// Integer reading, truncated the way `parseInt` reads a numeric input.
    pub fn integer(&self) -> Option<i64> {
        self.number().map(|value| value.trunc() as i64)
    }

    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(|value| !value.is_blank())
    }
}
