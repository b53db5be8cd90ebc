//! Post-collection validation pass.
//!
//! Runs sequentially on purpose: provider-side rate limits stay
//! predictable, and connector calls already carry their own timeouts and
//! retry budgets. A connector failure never fails the scan.

use chrono::Utc;
use tracing::debug;

use crate::{
    connector::{validate_with_connector, Registry},
    finding_data::{Confidence, Finding, ValidationStatus},
};

pub(crate) async fn validate_findings(findings: &mut [Finding], registry: &Registry) {
    for finding in findings.iter_mut() {
        finding.validation.validated_at = Some(Utc::now());

        let Some(connector) = registry.find_by_rule_id(&finding.rule_id) else {
            finding.validation.status = ValidationStatus::Unknown;
            finding.validation.method = "no-connector".to_string();
            continue;
        };

        let Some(secret) = finding.raw_secret.as_ref() else {
            finding.validation.status = ValidationStatus::Unknown;
            finding.validation.method = "redacted-input".to_string();
            continue;
        };

        debug!("Validating {} via {}", finding.id, connector.name());
        let (status, details) = validate_with_connector(connector, secret.expose()).await;
        finding.validation.status = status;
        finding.validation.method = connector.name().to_string();
        finding.validation.details = details;
        finding.confidence = confidence_from_validation(finding.confidence, status);
    }
}

/// Validation outcomes refine confidence: a definitive answer (active or
/// inactive) is high, an error is low, unknown keeps what we had.
pub(crate) fn confidence_from_validation(
    current: Confidence,
    status: ValidationStatus,
) -> Confidence {
    match status {
        ValidationStatus::Active | ValidationStatus::Inactive => Confidence::High,
        ValidationStatus::Error => Confidence::Low,
        ValidationStatus::Unknown => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        baseline::compute_line_hash,
        finding_data::{
            self, Location, MatchInfo, RemediationState, SecretString, ValidationState,
        },
        severity::Severity,
    };

    fn finding_for(rule_id: &str, secret: Option<&str>) -> Finding {
        let line = format!("value = \"{}\"", secret.unwrap_or("<redacted>"));
        let line_hash = compute_line_hash(&line);
        Finding {
            id: finding_data::finding_id(rule_id, "a.py", 1, &line_hash),
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            severity: Severity::High,
            confidence: Confidence::High,
            category: "test".to_string(),
            location: Location {
                file: "a.py".to_string(),
                line_start: 1,
                line_end: 1,
                column_start: 1,
                column_end: 1,
                commit: None,
                branch: None,
            },
            match_info: MatchInfo { raw_redacted: "****".into(), entropy: 0.0, length: 4 },
            validation: ValidationState::default(),
            remediation: RemediationState::default(),
            line_hash,
            raw_secret: secret.map(SecretString::new),
        }
    }

    #[test]
    fn confidence_upgrades_and_downgrades() {
        assert_eq!(
            confidence_from_validation(Confidence::Medium, ValidationStatus::Active),
            Confidence::High
        );
        assert_eq!(
            confidence_from_validation(Confidence::Medium, ValidationStatus::Inactive),
            Confidence::High
        );
        assert_eq!(
            confidence_from_validation(Confidence::High, ValidationStatus::Error),
            Confidence::Low
        );
        assert_eq!(
            confidence_from_validation(Confidence::Medium, ValidationStatus::Unknown),
            Confidence::Medium
        );
    }

    #[tokio::test]
    async fn findings_without_a_connector_stay_unknown() {
        let registry = Registry::new();
        let mut findings = vec![finding_for("private-key-header", Some("-----BEGIN..."))];
        validate_findings(&mut findings, &registry).await;

        assert_eq!(findings[0].validation.status, ValidationStatus::Unknown);
        assert_eq!(findings[0].validation.method, "no-connector");
        assert!(findings[0].validation.validated_at.is_some());
    }

    #[tokio::test]
    async fn findings_without_raw_secret_are_marked_redacted() {
        let registry = Registry::new();
        let mut findings = vec![finding_for("github-pat-classic", None)];
        validate_findings(&mut findings, &registry).await;

        assert_eq!(findings[0].validation.status, ValidationStatus::Unknown);
        assert_eq!(findings[0].validation.method, "redacted-input");
    }

    #[tokio::test]
    async fn manual_connectors_mark_findings_inactive() {
        let registry = Registry::new();
        let mut findings = vec![finding_for("stripe-api-key", Some("sk_live_x"))];
        validate_findings(&mut findings, &registry).await;

        assert_eq!(findings[0].validation.status, ValidationStatus::Inactive);
        assert_eq!(findings[0].validation.method, "stripe");
        assert_eq!(findings[0].confidence, Confidence::High);
    }
}
