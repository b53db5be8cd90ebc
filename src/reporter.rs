//! Report serialization: human, JSON, and SARIF renderers over one
//! [`FindingReport`].

mod human_format;
mod json_format;
mod sarif_format;
pub mod styles;

use anyhow::Result;
use clap::ValueEnum;

use crate::finding_data::FindingReport;
use styles::Styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Human,
    Json,
    Sarif,
}

pub struct ReportWriter {
    styles: Styles,
}

impl ReportWriter {
    pub fn new(use_color: bool) -> Self {
        ReportWriter { styles: Styles::new(use_color) }
    }

    pub fn report<W: std::io::Write>(
        &self,
        format: ReportOutputFormat,
        report: &FindingReport,
        writer: W,
    ) -> Result<()> {
        match format {
            ReportOutputFormat::Human => self.human_format(report, writer),
            ReportOutputFormat::Json => self.json_format(report, writer),
            ReportOutputFormat::Sarif => self.sarif_format(report, writer),
        }
    }
}
