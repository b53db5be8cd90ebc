//! Stripe connector stub: keeps rule-id routing complete while all
//! operations remain manual.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::Utc;

use super::{ActionResult, PreflightResult, RotationResult, ValidationOutcome};

pub struct StripeConnector;

impl StripeConnector {
    pub async fn preflight(&self) -> Result<PreflightResult> {
        Ok(PreflightResult::ready())
    }

    pub async fn validate(&self, _secret: &str) -> Result<ValidationOutcome> {
        let mut details = BTreeMap::new();
        details.insert("hint".to_string(), "Validate via Stripe dashboard/API".to_string());
        Ok(ValidationOutcome {
            is_active: false,
            method: "manual".to_string(),
            details,
            validated_at: Utc::now(),
        })
    }

    pub async fn revoke(&self, _secret: &str) -> Result<ActionResult> {
        Ok(ActionResult {
            success: false,
            message: "manual revoke: https://dashboard.stripe.com/apikeys".to_string(),
            executed_at: Utc::now(),
        })
    }

    pub async fn rotate(&self, _secret: &str) -> Result<RotationResult> {
        Ok(RotationResult {
            old_key_revoked: false,
            new_key_id: String::new(),
            stored_at: "manual rotate in Stripe dashboard".to_string(),
            executed_at: Utc::now(),
        })
    }
}
