use std::io::{self, Write};

use colored::Colorize;

use super::{ReportError, ReportOptions, Reporter};
use crate::analysis::{AnalysisSet, TimeSegmentAnalysis, DAY_NAMES};
use crate::stats::AnalysisResult;

const RULE_WIDTH: usize = 50;

/// A reporter that prints segment comparisons to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Create a terminal reporter with colors switched on or off.
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format a percent difference with an explicit sign.
    fn format_change(difference: Option<f64>) -> String {
        match difference {
            None => "undefined".to_string(),
            Some(d) if d > 0.0 => format!("+{:.2}%", d),
            Some(d) if d < 0.0 => format!("-{:.2}%", d.abs()),
            Some(_) => "0.00%".to_string(),
        }
    }

    /// Format a confidence level as a percentage label, e.g. `95%` or `97.5%`.
    fn format_confidence(confidence_level: f64) -> String {
        format!("{}%", (confidence_level * 10_000.0).round() / 100.0)
    }

    fn exceeds_threshold(analysis: &TimeSegmentAnalysis, options: &ReportOptions) -> bool {
        analysis.significant
            && analysis
                .difference()
                .is_some_and(|d| d.abs() >= options.threshold_pct)
    }

    fn heading(&self, writer: &mut impl Write, title: &str) -> io::Result<()> {
        writeln!(writer)?;
        if self.use_colors {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))
    }

    fn print_side(
        &self,
        writer: &mut impl Write,
        name: &str,
        result: &AnalysisResult,
        options: &ReportOptions,
    ) -> io::Result<()> {
        let (low, high) = result.confidence_interval;
        writeln!(writer, "{} mean: {:.4} (n={})", name, result.mean, result.count)?;
        writeln!(
            writer,
            "  std dev: {:.4}, {} CI: [{:.4}, {:.4}]",
            result.std_dev,
            Self::format_confidence(options.confidence_level),
            low,
            high
        )
    }

    /// Print the overall comparison block.
    fn print_overall(
        &self,
        writer: &mut impl Write,
        analysis: &AnalysisSet,
        options: &ReportOptions,
    ) -> io::Result<()> {
        self.heading(writer, "Overall Analysis Results:")?;

        let Some(overall) = analysis.overall() else {
            writeln!(writer, "No overlapping data between benchmark and experiment")?;
            return Ok(());
        };

        self.print_side(writer, "Benchmark", &overall.benchmark, options)?;
        self.print_side(writer, "Experiment", &overall.experiment, options)?;
        writeln!(
            writer,
            "Difference: {}",
            Self::format_change(overall.difference())
        )?;
        writeln!(writer, "P-value: {:.4}", overall.p_value)?;

        let verdict = if overall.significant {
            "Result is STATISTICALLY SIGNIFICANT"
        } else {
            "Result is NOT statistically significant"
        };
        match (self.use_colors, overall.significant) {
            (true, true) => writeln!(writer, "{}", verdict.green().bold())?,
            (true, false) => writeln!(writer, "{}", verdict.yellow())?,
            (false, _) => writeln!(writer, "{}", verdict)?,
        }
        Ok(())
    }

    /// Print one breakdown line, e.g. `Hour 09: +2.00% (SIGNIFICANT)`.
    fn print_segment_line(
        &self,
        writer: &mut impl Write,
        name: &str,
        analysis: &TimeSegmentAnalysis,
        options: &ReportOptions,
    ) -> io::Result<()> {
        let change = Self::format_change(analysis.difference());
        let significance = if analysis.significant {
            " (SIGNIFICANT)"
        } else {
            ""
        };
        let marker = if Self::exceeds_threshold(analysis, options) {
            " [!]"
        } else {
            ""
        };

        if self.use_colors {
            writeln!(
                writer,
                "{}: {}{}{}",
                name,
                change,
                significance.yellow(),
                marker.red().bold()
            )
        } else {
            writeln!(writer, "{}: {}{}{}", name, change, significance, marker)
        }
    }

    fn print_hourly(
        &self,
        writer: &mut impl Write,
        analysis: &AnalysisSet,
        options: &ReportOptions,
    ) -> io::Result<()> {
        self.heading(writer, "Hourly Breakdown:")?;
        for (hour, segment) in analysis.hours() {
            self.print_segment_line(writer, &format!("Hour {:02}", hour), segment, options)?;
        }
        Ok(())
    }

    fn print_daily(
        &self,
        writer: &mut impl Write,
        analysis: &AnalysisSet,
        options: &ReportOptions,
    ) -> io::Result<()> {
        self.heading(writer, "Day of Week Breakdown:")?;
        for (day, segment) in analysis.days() {
            let name = DAY_NAMES.get(day as usize).copied().unwrap_or("Unknown");
            self.print_segment_line(writer, name, segment, options)?;
        }
        Ok(())
    }

    /// Write the full report to `writer`.
    pub fn write_report(
        &self,
        writer: &mut impl Write,
        analysis: &AnalysisSet,
        options: &ReportOptions,
    ) -> io::Result<()> {
        self.print_overall(writer, analysis, options)?;

        if options.show_hourly {
            self.print_hourly(writer, analysis, options)?;
        }
        if options.show_daily {
            self.print_daily(writer, analysis, options)?;
        }

        writeln!(writer)
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, analysis: &AnalysisSet, options: &ReportOptions) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();

        self.write_report(&mut writer, analysis, options)?;

        Ok(())
    }
}
