//! Builtin rule catalog, embedded at compile time so a scan needs no
//! runtime rules directory.

use std::path::PathBuf;

use crate::rules::{RuleFile, RuleLoadError, RuleSyntax};

static BUILTIN_RULE_SOURCES: &[(&str, &str)] = &[
    ("aws.yaml", include_str!("../data/rules/aws.yaml")),
    ("generic.yaml", include_str!("../data/rules/generic.yaml")),
    ("github.yaml", include_str!("../data/rules/github.yaml")),
    ("slack.yaml", include_str!("../data/rules/slack.yaml")),
    ("stripe.yaml", include_str!("../data/rules/stripe.yaml")),
];

/// Parses the embedded rule catalog.
pub fn builtin_rules() -> Result<Vec<RuleSyntax>, RuleLoadError> {
    let mut rules = Vec::new();
    for (name, contents) in BUILTIN_RULE_SOURCES {
        let parsed: RuleFile = serde_yaml::from_str(contents).map_err(|source| {
            RuleLoadError::Parse { path: PathBuf::from(name), source }
        })?;
        rules.extend(parsed.rules);
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources_parse() {
        let rules = builtin_rules().unwrap();
        assert!(rules.len() >= 9);
        for rule in &rules {
            assert!(!rule.id.is_empty());
            assert!(!rule.detection.regex.is_empty());
            assert!(rule.tests.positive.len() >= 2, "{} lacks positive tests", rule.id);
            assert!(rule.tests.negative.len() >= 2, "{} lacks negative tests", rule.id);
        }
    }
}
