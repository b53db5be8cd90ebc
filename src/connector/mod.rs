//! Credential provider connectors.
//!
//! Each provider exposes the same four operations — validate, revoke,
//! rotate, preflight — behind the [`Connector`] enum, so the pipeline can
//! route findings to a provider by rule id without caring which one it is.

pub mod aws;
pub mod github;
pub mod slack;
pub mod stripe;

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::finding_data::ValidationStatus;
pub use aws::AwsConnector;
pub use github::GitHubConnector;
pub use slack::SlackConnector;
pub use stripe::StripeConnector;

/// Result of asking a provider whether a credential is live.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub is_active: bool,
    pub method: String,
    pub details: BTreeMap<String, String>,
    pub validated_at: DateTime<Utc>,
}

/// Result of a revoke attempt.
#[derive(Debug, Clone)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    pub executed_at: DateTime<Utc>,
}

/// Result of a rotate attempt.
#[derive(Debug, Clone)]
pub struct RotationResult {
    pub old_key_revoked: bool,
    pub new_key_id: String,
    pub stored_at: String,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PreflightResult {
    pub ready: bool,
    pub missing: Vec<PreflightItem>,
}

impl PreflightResult {
    pub fn ready() -> Self {
        PreflightResult { ready: true, missing: Vec::new() }
    }

    pub fn missing_names(&self) -> Vec<&'static str> {
        self.missing.iter().map(|item| item.name).collect()
    }
}

#[derive(Debug, Clone)]
pub struct PreflightItem {
    pub name: &'static str,
    pub description: &'static str,
    pub how_to_fix: &'static str,
}

/// One credential provider. Dispatch is a tagged variant rather than a
/// trait object so the async operations need no boxing.
pub enum Connector {
    Aws(AwsConnector),
    GitHub(GitHubConnector),
    Slack(SlackConnector),
    Stripe(StripeConnector),
}

impl Connector {
    pub fn name(&self) -> &'static str {
        match self {
            Connector::Aws(_) => "aws",
            Connector::GitHub(_) => "github",
            Connector::Slack(_) => "slack",
            Connector::Stripe(_) => "stripe",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Connector::Aws(_) => "Amazon Web Services",
            Connector::GitHub(_) => "GitHub",
            Connector::Slack(_) => "Slack",
            Connector::Stripe(_) => "Stripe",
        }
    }

    pub fn supported_rule_ids(&self) -> &'static [&'static str] {
        match self {
            Connector::Aws(_) => &["aws-access-key-id", "aws-secret-access-key"],
            Connector::GitHub(_) => {
                &["github-pat-classic", "github-pat-fine-grained", "github-oauth-token"]
            }
            Connector::Slack(_) => &["slack-bot-token", "slack-webhook-url"],
            Connector::Stripe(_) => &["stripe-api-key"],
        }
    }

    pub async fn validate(&self, secret: &str) -> Result<ValidationOutcome> {
        match self {
            Connector::Aws(c) => c.validate(secret).await,
            Connector::GitHub(c) => c.validate(secret).await,
            Connector::Slack(c) => c.validate(secret).await,
            Connector::Stripe(c) => c.validate(secret).await,
        }
    }

    pub async fn revoke(&self, secret: &str) -> Result<ActionResult> {
        match self {
            Connector::Aws(c) => c.revoke(secret).await,
            Connector::GitHub(c) => c.revoke(secret).await,
            Connector::Slack(c) => c.revoke(secret).await,
            Connector::Stripe(c) => c.revoke(secret).await,
        }
    }

    pub async fn rotate(&self, secret: &str) -> Result<RotationResult> {
        match self {
            Connector::Aws(c) => c.rotate(secret).await,
            Connector::GitHub(c) => c.rotate(secret).await,
            Connector::Slack(c) => c.rotate(secret).await,
            Connector::Stripe(c) => c.rotate(secret).await,
        }
    }

    pub async fn preflight(&self) -> Result<PreflightResult> {
        match self {
            Connector::Aws(c) => c.preflight().await,
            Connector::GitHub(c) => c.preflight().await,
            Connector::Slack(c) => c.preflight().await,
            Connector::Stripe(c) => c.preflight().await,
        }
    }
}

/// Ordered, immutable set of connector instances for one run.
pub struct Registry {
    connectors: Vec<Connector>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            connectors: vec![
                Connector::Aws(AwsConnector::default()),
                Connector::GitHub(GitHubConnector::default()),
                Connector::Slack(SlackConnector),
                Connector::Stripe(StripeConnector),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter()
    }

    pub fn by_name(&self, name: &str) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.name() == name)
    }

    pub fn find_by_rule_id(&self, rule_id: &str) -> Option<&Connector> {
        self.connectors.iter().find(|c| c.supported_rule_ids().contains(&rule_id))
    }
}

/// Runs a connector validation and folds the result into the finding
/// vocabulary: a connector error is never fatal, it becomes
/// `status = error` with the message in the details.
pub async fn validate_with_connector(
    connector: &Connector,
    secret: &str,
) -> (ValidationStatus, BTreeMap<String, serde_json::Value>) {
    match connector.validate(secret).await {
        Err(err) => {
            let mut details = BTreeMap::new();
            details.insert("error".to_string(), serde_json::Value::String(err.to_string()));
            (ValidationStatus::Error, details)
        }
        Ok(outcome) => {
            let status = if outcome.is_active {
                ValidationStatus::Active
            } else {
                ValidationStatus::Inactive
            };
            let mut details: BTreeMap<String, serde_json::Value> = outcome
                .details
                .into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect();
            details.insert("method".to_string(), serde_json::Value::String(outcome.method));
            (status, details)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_ordered_and_complete() {
        let registry = Registry::new();
        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["aws", "github", "slack", "stripe"]);
    }

    #[test]
    fn lookup_by_name_and_rule_id() {
        let registry = Registry::new();
        assert_eq!(registry.by_name("github").unwrap().name(), "github");
        assert!(registry.by_name("gitlab").is_none());

        assert_eq!(registry.find_by_rule_id("aws-access-key-id").unwrap().name(), "aws");
        assert_eq!(registry.find_by_rule_id("slack-webhook-url").unwrap().name(), "slack");
        assert_eq!(registry.find_by_rule_id("stripe-api-key").unwrap().name(), "stripe");
        assert!(registry.find_by_rule_id("private-key-header").is_none());
    }

    #[tokio::test]
    async fn validation_errors_map_to_error_status() {
        let registry = Registry::new();
        let github = registry.by_name("github").unwrap();
        // Redacted tokens are rejected before any network call.
        let (status, details) = validate_with_connector(github, "ghp_abcd...wxyz").await;
        assert_eq!(status, ValidationStatus::Error);
        assert!(details.contains_key("error"));
    }

    #[tokio::test]
    async fn manual_stubs_report_inactive_with_hint() {
        let registry = Registry::new();
        let slack = registry.by_name("slack").unwrap();
        let (status, details) = validate_with_connector(slack, "xoxb-1-2-abc").await;
        assert_eq!(status, ValidationStatus::Inactive);
        assert_eq!(
            details.get("method"),
            Some(&serde_json::Value::String("manual".to_string()))
        );
    }
}
