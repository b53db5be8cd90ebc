//! Rule syntax and evaluation for secret detection.
//!
//! A [`RuleSyntax`] is the YAML shape of a detector; a [`Rule`] is the
//! compiled form with its primary regex and positive/negative context
//! regexes ready for per-line evaluation.

use std::borrow::Cow;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Top-level shape of a rule YAML document: `{rules: [...]}`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleSyntax>,
}

/// The syntactic representation of a rule as written in YAML.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RuleSyntax {
    /// Globally unique identifier for the rule.
    #[serde(default)]
    pub id: String,
    /// Human-readable name; defaults to the id.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub detection: DetectionSyntax,
    #[serde(default)]
    pub validation: ValidationSyntax,
    #[serde(default)]
    pub remediation: RemediationSyntax,
    #[serde(default)]
    pub tests: RuleTests,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DetectionSyntax {
    /// Primary regex; capture group 1, when present, is the secret.
    #[serde(default)]
    pub regex: String,
    /// At least one of these must also match the line (when non-empty).
    #[serde(default)]
    pub must_match: Vec<RegexWrapper>,
    /// None of these may match the line.
    #[serde(default)]
    pub must_not_match: Vec<RegexWrapper>,
}

/// Context regex wrapper; accepts either `regex` or the legacy
/// `context_regex` key, preferring the former.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegexWrapper {
    #[serde(default)]
    pub regex: String,
    #[serde(default)]
    pub context_regex: String,
}

impl RegexWrapper {
    pub fn pattern(&self) -> &str {
        if !self.regex.is_empty() {
            &self.regex
        } else {
            &self.context_regex
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ValidationSyntax {
    #[serde(default)]
    pub connector: String,
    #[serde(default)]
    pub method: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RemediationSyntax {
    #[serde(default)]
    pub connector: String,
    #[serde(default)]
    pub actions: Vec<RemediationAction>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RemediationAction {
    #[serde(rename = "type", default)]
    pub action_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub env_var_name: String,
}

/// Bundled self-test cases. Every shipped rule carries at least two
/// positive and two negative cases.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RuleTests {
    #[serde(default)]
    pub positive: Vec<RuleTestCase>,
    #[serde(default)]
    pub negative: Vec<RuleTestCase>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RuleTestCase {
    pub input: String,
}

/// A rule compiled for evaluation.
#[derive(Debug, Clone)]
pub struct Rule {
    syntax: RuleSyntax,
    severity: Severity,
    regex: Regex,
    must_match: Vec<Regex>,
    must_not_match: Vec<Regex>,
}

impl Rule {
    /// Compiles a rule from its syntax, applying the documented defaults:
    /// `name` falls back to `id` and `severity` to medium. A missing id or
    /// missing `detection.regex` is a load error.
    pub fn compile(mut syntax: RuleSyntax) -> Result<Self, super::RuleLoadError> {
        if syntax.id.is_empty() {
            return Err(super::RuleLoadError::MissingId);
        }
        if syntax.name.is_empty() {
            syntax.name = syntax.id.clone();
        }
        let severity = syntax.severity.unwrap_or_default();
        if syntax.detection.regex.is_empty() {
            return Err(super::RuleLoadError::MissingDetectionRegex { id: syntax.id });
        }

        let regex = Regex::new(&syntax.detection.regex).map_err(|source| {
            super::RuleLoadError::InvalidRegex {
                id: syntax.id.clone(),
                field: "detection.regex",
                source,
            }
        })?;

        let mut must_match = Vec::new();
        for wrapper in &syntax.detection.must_match {
            let pattern = wrapper.pattern();
            if pattern.is_empty() {
                continue;
            }
            must_match.push(Regex::new(pattern).map_err(|source| {
                super::RuleLoadError::InvalidRegex {
                    id: syntax.id.clone(),
                    field: "detection.must_match",
                    source,
                }
            })?);
        }

        let mut must_not_match = Vec::new();
        for wrapper in &syntax.detection.must_not_match {
            let pattern = wrapper.pattern();
            if pattern.is_empty() {
                continue;
            }
            must_not_match.push(Regex::new(pattern).map_err(|source| {
                super::RuleLoadError::InvalidRegex {
                    id: syntax.id.clone(),
                    field: "detection.must_not_match",
                    source,
                }
            })?);
        }

        Ok(Rule { syntax, severity, regex, must_match, must_not_match })
    }

    pub fn id(&self) -> &str {
        &self.syntax.id
    }

    pub fn name(&self) -> &str {
        &self.syntax.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn category(&self) -> &str {
        &self.syntax.category
    }

    pub fn description(&self) -> &str {
        &self.syntax.description
    }

    /// Source text of the primary detection regex (used by history mode to
    /// drive `git grep`).
    pub fn pattern(&self) -> &str {
        &self.syntax.detection.regex
    }

    pub fn validation_connector(&self) -> &str {
        &self.syntax.validation.connector
    }

    pub fn remediation(&self) -> &RemediationSyntax {
        &self.syntax.remediation
    }

    pub fn tests(&self) -> &RuleTests {
        &self.syntax.tests
    }

    pub fn syntax(&self) -> &RuleSyntax {
        &self.syntax
    }

    /// Evaluates the rule against a single line of text: the primary regex
    /// must match, at least one `must_match` (when any are configured) must
    /// match, and no `must_not_match` may match.
    pub fn matches_line(&self, line: &str) -> bool {
        if !self.regex.is_match(line) {
            return false;
        }
        if !self.must_match.is_empty() && !self.must_match.iter().any(|re| re.is_match(line)) {
            return false;
        }
        !self.must_not_match.iter().any(|re| re.is_match(line))
    }

    /// Extracts the secret from a matching line: capture group 1 when the
    /// pattern defines one, otherwise the whole match with surrounding
    /// whitespace stripped.
    pub fn extract_secret<'l>(&self, line: &'l str) -> Option<&'l str> {
        let captures = self.regex.captures(line)?;
        if let Some(group) = captures.get(1) {
            return Some(group.as_str());
        }
        Some(captures.get(0)?.as_str().trim())
    }

    /// Runs a bundled self-test input through the rule after normalization.
    pub fn evaluate_test_input(&self, input: &str) -> bool {
        self.matches_line(&normalize_test_input(input))
    }
}

/// Strips the `__CUT__` marker from bundled sample payloads so they stay
/// non-sensitive in-repo while remaining testable.
fn normalize_test_input(input: &str) -> Cow<'_, str> {
    if input.contains("__CUT__") {
        Cow::Owned(input.replace("__CUT__", ""))
    } else {
        Cow::Borrowed(input)
    }
}
