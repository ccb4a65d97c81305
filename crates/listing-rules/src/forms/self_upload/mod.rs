//! Field rules for the self-upload listing wizard.
//!
//! Each wizard question is a [`FieldDescriptor`]: display metadata plus pure hooks for
//! visibility, hard and soft checks, helper text and pre-filling from a stored listing.
//! The [`FieldRegistry`] holds them per [`FormSection`]; the [`engine`] applies them to an
//! immutable [`ListingSnapshot`].

pub mod bounds;
pub mod descriptor;
pub mod domain;
pub mod engine;
pub(crate) mod fields;
pub mod format;
pub(crate) mod locator;
pub mod mappings;
pub mod outcome;
pub mod persisted;
pub mod registry;
pub mod router;

#[cfg(test)]
mod tests;

pub use descriptor::{
    AnswerRule, FieldContext, FieldDescriptor, FieldOption, FieldParams, FieldSource, FieldType,
    FormSection, PopulateRule, Requirement,
};
pub use domain::{BasicDetails, FieldValue, ListingSnapshot, OfferingDetails, OptionKey, PgOffering, Service};
pub use engine::SectionReport;
pub use outcome::{
    AnalyticsEvent, CheckType, ErrorTracking, FieldReport, FieldResult, SoftCheckOutcome,
    TrackingFlags, ValidationOutcome, Verdict,
};
pub use persisted::{PersistedFlatDetails, PersistedListing, PersistedUserFlat, Restriction};
pub use registry::{parse_section, FieldRegistry, RegistryError};
pub use router::{self_upload_router, DescriptorView, SelfUploadState};
