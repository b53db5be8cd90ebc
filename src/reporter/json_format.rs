use anyhow::Result;

use super::ReportWriter;
use crate::finding_data::FindingReport;

impl ReportWriter {
    pub(crate) fn json_format<W: std::io::Write>(
        &self,
        report: &FindingReport,
        mut writer: W,
    ) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, report)?;
        writeln!(writer)?;
        Ok(())
    }
}
