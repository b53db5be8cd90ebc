//! SARIF 2.1.0 output: one run, one result per finding.

use anyhow::Result;
use serde::Serialize;

use super::ReportWriter;
use crate::{finding_data::FindingReport, severity::Severity};

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<SarifRun<'a>>,
}

#[derive(Serialize)]
struct SarifRun<'a> {
    tool: SarifTool<'a>,
    results: Vec<SarifResult<'a>>,
}

#[derive(Serialize)]
struct SarifTool<'a> {
    driver: SarifDriver<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver<'a> {
    name: &'static str,
    semantic_version: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult<'a> {
    rule_id: &'a str,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation<'a>>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation<'a> {
    physical_location: SarifPhysicalLocation<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation<'a> {
    artifact_location: SarifArtifactLocation<'a>,
    region: SarifRegion,
}

#[derive(Serialize)]
struct SarifArtifactLocation<'a> {
    uri: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: usize,
    end_line: usize,
    #[serde(skip_serializing_if = "is_zero")]
    start_column: usize,
    #[serde(skip_serializing_if = "is_zero")]
    end_column: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl ReportWriter {
    pub(crate) fn sarif_format<W: std::io::Write>(
        &self,
        report: &FindingReport,
        mut writer: W,
    ) -> Result<()> {
        let results: Vec<SarifResult<'_>> = report
            .findings
            .iter()
            .map(|finding| SarifResult {
                rule_id: &finding.rule_id,
                level: sarif_level(finding.severity),
                message: SarifMessage {
                    text: format!(
                        "{} detected: {}",
                        finding.rule_name, finding.match_info.raw_redacted
                    ),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: &finding.location.file,
                        },
                        region: SarifRegion {
                            start_line: finding.location.line_start,
                            end_line: finding.location.line_end,
                            start_column: finding.location.column_start,
                            end_column: finding.location.column_end,
                        },
                    },
                }],
            })
            .collect();

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![SarifRun {
                tool: SarifTool {
                    driver: SarifDriver {
                        name: "secrethawk",
                        semantic_version: &report.metadata.version,
                    },
                },
                results,
            }],
        };

        serde_json::to_writer_pretty(&mut writer, &log)?;
        writeln!(writer)?;
        Ok(())
    }
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        finding_data::{
            finding_id, Confidence, Finding, Location, MatchInfo, RemediationState,
            ReportMetadata, ValidationState,
        },
        reporter::ReportOutputFormat,
    };

    fn finding(severity: Severity) -> Finding {
        Finding {
            id: finding_id("stripe-api-key", "pay.py", 7, "sha256:x"),
            rule_id: "stripe-api-key".into(),
            rule_name: "Stripe API Secret Key".into(),
            severity,
            confidence: Confidence::High,
            category: "payment".into(),
            location: Location {
                file: "pay.py".into(),
                line_start: 7,
                line_end: 7,
                column_start: 10,
                column_end: 41,
                commit: None,
                branch: None,
            },
            match_info: MatchInfo { raw_redacted: "sk_l...uvwx".into(), entropy: 4.2, length: 32 },
            validation: ValidationState::default(),
            remediation: RemediationState::default(),
            line_hash: "sha256:x".into(),
            raw_secret: None,
        }
    }

    #[test]
    fn sarif_skeleton_is_2_1_0_with_one_run() {
        let report = FindingReport {
            schema: None,
            findings: vec![finding(Severity::Critical)],
            metadata: ReportMetadata {
                version: "0.1.0".into(),
                ..ReportMetadata::default()
            },
        };

        let writer = ReportWriter::new(false);
        let mut out = Vec::new();
        writer.report(ReportOutputFormat::Sarif, &report, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["version"], "2.1.0");
        assert_eq!(value["runs"].as_array().unwrap().len(), 1);
        let run = &value["runs"][0];
        assert_eq!(run["tool"]["driver"]["name"], "secrethawk");
        assert_eq!(run["tool"]["driver"]["semanticVersion"], "0.1.0");

        let result = &run["results"][0];
        assert_eq!(result["ruleId"], "stripe-api-key");
        assert_eq!(result["level"], "error");
        assert!(result["message"]["text"].as_str().unwrap().contains("sk_l...uvwx"));
        let region = &result["locations"][0]["physicalLocation"]["region"];
        assert_eq!(region["startLine"], 7);
        assert_eq!(region["endColumn"], 41);
        assert_eq!(
            result["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "pay.py"
        );
    }

    #[test]
    fn severity_maps_to_sarif_levels() {
        assert_eq!(sarif_level(Severity::Critical), "error");
        assert_eq!(sarif_level(Severity::High), "error");
        assert_eq!(sarif_level(Severity::Medium), "warning");
        assert_eq!(sarif_level(Severity::Low), "note");
    }
}
