use std::io::{self, Write};

use serde::Serialize;

use super::{ReportError, ReportOptions, Reporter};
use crate::analysis::AnalysisSet;

/// A reporter that emits the analysis as a pretty-printed JSON document.
///
/// Undefined percent differences are encoded as `null`.
#[derive(Debug, Clone, Default)]
pub struct JsonReporter;

#[derive(Serialize)]
struct JsonReport<'a> {
    options: &'a ReportOptions,
    segments: &'a AnalysisSet,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    /// Write the JSON document to `writer`.
    pub fn write_report(
        &self,
        writer: &mut impl Write,
        analysis: &AnalysisSet,
        options: &ReportOptions,
    ) -> Result<(), ReportError> {
        let report = JsonReport {
            options,
            segments: analysis,
        };
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for JsonReporter {
    fn report(&self, analysis: &AnalysisSet, options: &ReportOptions) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_report(&mut writer, analysis, options)
    }
}
