//! Terminal styles for the human renderer.

use std::io::IsTerminal;

pub use console::{Style, StyledObject};

use crate::severity::Severity;

pub struct Styles {
    pub style_critical: Style,
    pub style_high: Style,
    pub style_medium: Style,
    pub style_low: Style,
    pub style_active: Style,
    pub style_metadata: Style,
}

impl Styles {
    pub fn new(use_color: bool) -> Self {
        let enabled = use_color && std::io::stdout().is_terminal();
        Styles {
            style_critical: Style::new().bold().red().force_styling(enabled),
            style_high: Style::new().red().force_styling(enabled),
            style_medium: Style::new().yellow().force_styling(enabled),
            style_low: Style::new().dim().force_styling(enabled),
            style_active: Style::new().bold().bright().cyan().force_styling(enabled),
            style_metadata: Style::new().bright().blue().force_styling(enabled),
        }
    }

    pub fn for_severity(&self, severity: Severity) -> &Style {
        match severity {
            Severity::Critical => &self.style_critical,
            Severity::High => &self.style_high,
            Severity::Medium => &self.style_medium,
            Severity::Low => &self.style_low,
        }
    }
}
