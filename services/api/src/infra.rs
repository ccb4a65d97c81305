use chrono::NaiveDate;
use listing_rules::config::FormsConfig;
use listing_rules::forms::self_upload::{FieldRegistry, FormSection, SelfUploadState, Service};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Registry shared by every request; descriptors are built once at startup.
pub(crate) fn self_upload_state(forms: &FormsConfig) -> SelfUploadState {
    SelfUploadState {
        registry: Arc::new(FieldRegistry::new()),
        track_errors: forms.track_errors,
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_service(raw: &str) -> Result<Service, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "rent" => Ok(Service::Rent),
        "buy" | "sale" => Ok(Service::Buy),
        "pg" => Ok(Service::Pg),
        other => Err(format!("unknown service '{other}' (expected rent, buy or pg)")),
    }
}

pub(crate) fn parse_section(raw: &str) -> Result<FormSection, String> {
    listing_rules::forms::self_upload::parse_section(raw.trim()).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_values() {
        assert_eq!(parse_service("Sale"), Ok(Service::Buy));
        assert_eq!(parse_section(" pg_extras "), Ok(FormSection::PgExtras));
        assert_eq!(
            parse_date("2025-02-01"),
            Ok(NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date"))
        );
    }

    #[test]
    fn rejects_unknown_cli_values() {
        assert!(parse_service("lease").is_err());
        assert!(parse_section("photos").is_err());
        assert!(parse_date("01/02/2025").is_err());
    }
}
