use anyhow::Result;

use super::ReportWriter;
use crate::{finding_data::FindingReport, severity::Severity};

impl ReportWriter {
    pub(crate) fn human_format<W: std::io::Write>(
        &self,
        report: &FindingReport,
        mut writer: W,
    ) -> Result<()> {
        writeln!(writer, "SecretHawk scan result")?;
        writeln!(writer, "--------------------")?;

        for finding in &report.findings {
            let badge = severity_badge(finding.severity);
            let styled_badge = self.styles.for_severity(finding.severity).apply_to(badge);
            writeln!(writer, "{} {}", styled_badge, finding.rule_name.to_uppercase())?;
            writeln!(
                writer,
                "  File:   {}:{}",
                finding.location.file, finding.location.line_start
            )?;
            writeln!(writer, "  Match:  {}", finding.match_info.raw_redacted)?;
            writeln!(writer, "  Confidence: {}", finding.confidence.as_str().to_uppercase())?;
            writeln!(
                writer,
                "  Status: {}",
                finding.validation.status.as_str().to_uppercase()
            )?;
            writeln!(writer)?;
        }

        writeln!(writer, "Summary: {} findings", report.findings.len())?;
        let severity = &report.metadata.severity_counts;
        if !severity.is_empty() {
            writeln!(
                writer,
                "  Severity: critical={} high={} medium={} low={}",
                severity.get("critical").copied().unwrap_or(0),
                severity.get("high").copied().unwrap_or(0),
                severity.get("medium").copied().unwrap_or(0),
                severity.get("low").copied().unwrap_or(0),
            )?;
        }
        let validation = &report.metadata.validation_counts;
        if !validation.is_empty() {
            writeln!(
                writer,
                "  Validation: active={} inactive={} unknown={} error={}",
                validation.get("active").copied().unwrap_or(0),
                validation.get("inactive").copied().unwrap_or(0),
                validation.get("unknown").copied().unwrap_or(0),
                validation.get("error").copied().unwrap_or(0),
            )?;
        }
        Ok(())
    }
}

fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[CRITICAL]",
        Severity::High => "[HIGH]",
        Severity::Medium => "[MEDIUM]",
        Severity::Low => "[LOW]",
    }
}
