use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::descriptor::{AnswerRule, FieldDescriptor, FieldOption, FieldParams, FieldType, FormSection, Requirement};
use super::domain::{FieldValue, ListingSnapshot};
use super::engine::SectionReport;
use super::outcome::{ErrorTracking, TrackingFlags};
use super::persisted::PersistedListing;
use super::registry::{parse_section, FieldRegistry};
use crate::error::AppError;

/// Shared state of the self-upload endpoints.
#[derive(Debug, Clone)]
pub struct SelfUploadState {
    pub registry: Arc<FieldRegistry>,
    /// When off, analytics events are stripped from validation reports.
    pub track_errors: bool,
}

/// Router exposing the field registry to an external form controller.
pub fn self_upload_router(state: SelfUploadState) -> Router {
    Router::new()
        .route("/api/v1/self-upload/fields", post(fields_handler))
        .route("/api/v1/self-upload/validate", post(validate_handler))
        .route("/api/v1/self-upload/populate", post(populate_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct FieldsRequest {
    pub section: String,
    #[serde(default)]
    pub params: FieldParams,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub section: String,
    #[serde(default)]
    pub params: FieldParams,
    pub snapshot: ListingSnapshot,
    #[serde(default)]
    pub tracking: TrackingFlags,
}

#[derive(Debug, Deserialize)]
pub struct PopulateRequest {
    pub section: String,
    #[serde(default)]
    pub params: FieldParams,
    #[serde(default)]
    pub record: PersistedListing,
}

#[derive(Debug, Serialize)]
pub struct FieldsResponse {
    pub section: FormSection,
    pub fields: Vec<DescriptorView>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub section: FormSection,
    pub complete: bool,
    pub reports: Vec<SectionReport>,
}

#[derive(Debug, Serialize)]
pub struct PopulateResponse {
    pub section: FormSection,
    pub values: BTreeMap<String, FieldValue>,
}

/// Serializable metadata of a descriptor; hooks are reported by presence only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptorView {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub section: FormSection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// `always`, `never` or `conditional`.
    pub required: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub quick_view: bool,
    pub track_change: bool,
    pub disable_past_dates: bool,
    pub immediate_option: bool,
    pub conditional: bool,
    pub has_soft_check: bool,
    pub answered: AnswerRule,
    pub error_tracking: ErrorTracking,
}

impl From<&FieldDescriptor> for DescriptorView {
    fn from(descriptor: &FieldDescriptor) -> Self {
        let required = match descriptor.required {
            Requirement::Always => "always",
            Requirement::Never => "never",
            Requirement::When(_) => "conditional",
        };
        Self {
            key: descriptor.key.clone(),
            title: descriptor.title.clone(),
            field_type: descriptor.field_type,
            section: descriptor.section,
            options: descriptor.options.clone(),
            required,
            path: descriptor.path.clone(),
            param_state: descriptor.param_state.clone(),
            max_length: descriptor.max_length,
            default_value: descriptor.default_value.clone(),
            content: descriptor.content.clone(),
            quick_view: descriptor.quick_view,
            track_change: descriptor.track_change,
            disable_past_dates: descriptor.disable_past_dates,
            immediate_option: descriptor.immediate_option,
            conditional: descriptor.visible.is_some(),
            has_soft_check: descriptor.soft_check.is_some(),
            answered: descriptor.answered,
            error_tracking: descriptor.error_tracking,
        }
    }
}

pub(crate) async fn fields_handler(
    State(state): State<SelfUploadState>,
    Json(request): Json<FieldsRequest>,
) -> Result<Json<FieldsResponse>, AppError> {
    let section = parse_section(&request.section)?;
    let fields = state
        .registry
        .section_fields(section, &request.params)
        .iter()
        .map(DescriptorView::from)
        .collect();
    Ok(Json(FieldsResponse { section, fields }))
}

pub(crate) async fn validate_handler(
    State(state): State<SelfUploadState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let section = parse_section(&request.section)?;
    let mut reports =
        state
            .registry
            .evaluate(section, &request.params, &request.snapshot, request.tracking);

    if !state.track_errors {
        for report in &mut reports {
            for field in &mut report.fields {
                field.analytics.clear();
            }
        }
    }

    let complete = reports.iter().all(|report| report.complete);
    Ok(Json(ValidateResponse {
        section,
        complete,
        reports,
    }))
}

pub(crate) async fn populate_handler(
    State(state): State<SelfUploadState>,
    Json(request): Json<PopulateRequest>,
) -> Result<Json<PopulateResponse>, AppError> {
    let section = parse_section(&request.section)?;
    let values = state
        .registry
        .populate(section, &request.params, &request.record);
    Ok(Json(PopulateResponse { section, values }))
}
