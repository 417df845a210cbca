//! Output formatting for the CLI.

use crate::cli::AnalysisKind;
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use sanoma_engine::{DatasetStats, DomainAnalysis, PeriodRow, TemporalSummary, WEEKDAY_ORDER};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Number of busiest years shown in the temporal summary table.
const SUMMARY_YEARS: usize = 5;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format dataset statistics, showing at most `top` domains.
    pub fn format_stats(&self, stats: &DatasetStats, top: usize) -> Result<String> {
        if self.format == OutputFormat::Json {
            return to_json(stats);
        }

        let mut out = Vec::new();
        out.push(self.heading("Dataset statistics"));
        out.push(format!("Total emails:       {}", stats.total));
        out.push(format!(
            "With body:          {} ({:.1}%)",
            stats.with_body,
            percent(stats.with_body, stats.total)
        ));
        out.push(format!("Unique domains:     {}", stats.unique_domains()));
        if let Some((first, last)) = stats.year_span() {
            out.push(format!("Years:              {} - {}", first, last));
        }

        if stats.total == 0 {
            out.push(self.colorize("No emails found.", "yellow"));
            return Ok(out.join("\n"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Domain", "Emails", "Share"]);
        for (domain, count) in stats.top_domains(top) {
            builder.push_record([
                domain.clone(),
                count.to_string(),
                format!("{:.1}%", percent(*count, stats.total)),
            ]);
        }
        out.push(String::new());
        out.push(self.heading(&format!("Top {} domains", top.min(stats.unique_domains()))));
        out.push(table(builder));

        let mut builder = Builder::default();
        builder.push_record(["Folder", "Emails"]);
        for (folder, count) in &stats.folder_histogram {
            builder.push_record([folder.clone(), count.to_string()]);
        }
        out.push(String::new());
        out.push(self.heading("Folders"));
        out.push(table(builder));

        Ok(out.join("\n"))
    }

    /// Format a domain coverage analysis.
    pub fn format_domain_analysis(&self, analysis: &DomainAnalysis) -> Result<String> {
        if self.format == OutputFormat::Json {
            return to_json(analysis);
        }

        let pattern = &analysis.pattern_analysis;
        let mut out = Vec::new();
        out.push(self.heading(&format!(
            "Domains behind '{}' ({} emails)",
            pattern.pattern, pattern.total_emails
        )));

        if pattern.top_domains.is_empty() {
            out.push(self.colorize("No emails match the pattern.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["#", "Domain", "Emails", "Share", "Cumulative"]);
            for (i, rank) in pattern.top_domains.iter().enumerate() {
                builder.push_record([
                    (i + 1).to_string(),
                    rank.domain.clone(),
                    rank.count.to_string(),
                    format!("{:.2}%", rank.percentage),
                    format!("{:.1}%", rank.cumulative_percentage * 100.0),
                ]);
            }
            out.push(table(builder));
            out.push(format!(
                "{} domain(s) cover {:.1}% (target {:.1}%)",
                pattern.top_domains.len(),
                pattern.actual_coverage * 100.0,
                pattern.coverage_threshold * 100.0
            ));
        }

        out.push(String::new());
        out.push(self.heading(&format!(
            "Domains matching '{}' ({} emails, {} domains)",
            analysis.comparison.pattern,
            analysis.comparison.total_emails,
            analysis.comparison.domains.len()
        )));

        if analysis.overlap.is_empty() {
            out.push(self.info("No overlap with the top domains."));
        } else {
            out.push(self.warning(&format!(
                "Overlap with top domains: {}",
                analysis.overlap.join(", ")
            )));
        }

        Ok(out.join("\n"))
    }

    /// Format per-period rows of a timeline.
    pub fn format_period_rows(&self, kind: AnalysisKind, rows: &[PeriodRow]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return to_json(&rows);
        }

        if rows.is_empty() {
            return Ok(self.colorize("No dated emails found.", "yellow"));
        }

        let label = match kind {
            AnalysisKind::Year => "Year",
            AnalysisKind::Month => "Month",
            AnalysisKind::Weekday => "Weekday",
            AnalysisKind::Hour => "Hour",
            AnalysisKind::Summary => "Period",
        };

        let mut builder = Builder::default();
        builder.push_record([label, "Emails", "With body", "Body %"]);
        for row in rows {
            builder.push_record([
                row.period.clone(),
                row.total_emails.to_string(),
                row.emails_with_body.to_string(),
                format!("{:.1}%", row.body_percentage),
            ]);
        }

        Ok(table(builder))
    }

    /// Format the temporal summary: headline numbers, the busiest years and
    /// the weekday view.
    pub fn format_temporal_summary(&self, summary: &TemporalSummary) -> Result<String> {
        if self.format == OutputFormat::Json {
            return to_json(summary);
        }

        let info = &summary.dataset_info;
        let mut out = Vec::new();
        out.push(self.heading("Timeline summary"));
        out.push(format!("Dated emails:       {}", info.total_emails));
        out.push(format!(
            "With body:          {} ({:.1}%)",
            info.emails_with_body,
            percent(info.emails_with_body, info.total_emails)
        ));
        if let (Some(start), Some(end)) = (info.date_range.start, info.date_range.end) {
            out.push(format!("Range:              {} - {}", start, end));
        }

        if summary.by_year.is_empty() {
            out.push(self.colorize("No dated emails found.", "yellow"));
            return Ok(out.join("\n"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Year", "Emails", "Body %"]);
        let mut years: Vec<_> = summary.by_year.iter().collect();
        // Ties keep the earlier year first
        years.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        for (year, counts) in years.into_iter().take(SUMMARY_YEARS) {
            builder.push_record([
                year.to_string(),
                counts.total.to_string(),
                format!("{:.1}%", counts.body_percentage()),
            ]);
        }
        out.push(String::new());
        out.push(self.heading(&format!("Top {} years by volume", SUMMARY_YEARS)));
        out.push(table(builder));

        let mut builder = Builder::default();
        builder.push_record(["Weekday", "Emails", "Body %"]);
        for day in WEEKDAY_ORDER {
            if let Some(counts) = summary.by_weekday.get(day) {
                builder.push_record([
                    day.to_string(),
                    counts.total.to_string(),
                    format!("{:.1}%", counts.body_percentage()),
                ]);
            }
        }
        out.push(String::new());
        out.push(self.heading("By weekday"));
        out.push(table(builder));

        Ok(out.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the result of a command that saved records.
    pub fn saved(&self, count: usize, total: usize, path: &std::path::Path) -> String {
        self.success(&format!(
            "Saved {} of {} email(s) to {}",
            count,
            total,
            path.display()
        ))
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn table(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanoma_engine::{analyze_domains, summarize, EmailRecord, Granularity, Timeline};

    fn records() -> Vec<EmailRecord> {
        vec![
            EmailRecord::from_raw(
                "1",
                "2020-01-06 10:00:00",
                "a@a.edu",
                "",
                "Hi",
                "unsubscribe",
                Some("Inbox"),
            ),
            EmailRecord::from_raw(
                "2",
                "2021-01-05 10:00:00",
                "b@b.com",
                "",
                "Sale",
                "",
                None,
            ),
        ]
    }

    #[test]
    fn test_stats_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_stats(&summarize(&records()), 10).unwrap();
        assert!(output.contains("Total emails:       2"));
        assert!(output.contains("a.edu"));
        assert!(output.contains("Inbox"));
        assert!(output.contains("unknown"));
    }

    #[test]
    fn test_stats_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_stats(&summarize(&records()), 10).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["domain_histogram"]["b.com"], 1);
    }

    #[test]
    fn test_empty_stats() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let empty: Vec<EmailRecord> = Vec::new();
        let output = formatter.format_stats(&summarize(&empty), 10).unwrap();
        assert!(output.contains("No emails found"));
    }

    #[test]
    fn test_domain_analysis_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let analysis = analyze_domains(&records(), "unsubscribe", "*.edu", 0.95).unwrap();
        let output = formatter.format_domain_analysis(&analysis).unwrap();
        assert!(output.contains("Cumulative"));
        assert!(output.contains("100.0%"));
        assert!(output.contains("Overlap with top domains: a.edu"));
    }

    #[test]
    fn test_weekday_rows() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let recs = records();
        let rows = Timeline::new(&recs).rows(Granularity::Weekday, None);
        let output = formatter
            .format_period_rows(AnalysisKind::Weekday, &rows)
            .unwrap();
        let monday = output.find("Monday").unwrap();
        let tuesday = output.find("Tuesday").unwrap();
        assert!(monday < tuesday);
    }

    #[test]
    fn test_empty_rows() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_period_rows(AnalysisKind::Year, &[]).unwrap();
        assert!(output.contains("No dated emails"));
    }

    #[test]
    fn test_temporal_summary_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let recs = records();
        let output = formatter
            .format_temporal_summary(&Timeline::new(&recs).summary())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["dataset_info"]["total_emails"], 2);
        assert_eq!(value["by_year"]["2020"]["total"], 1);
    }

    #[test]
    fn test_summary_years_ranked_by_volume() {
        let dates = [
            "2015-01-01 10:00:00",
            "2015-02-01 10:00:00",
            "2015-03-01 10:00:00",
            "2016-01-01 10:00:00",
            "2017-01-01 10:00:00",
            "2018-01-01 10:00:00",
            "2019-01-01 10:00:00",
            "2020-01-01 10:00:00",
            "2020-02-01 10:00:00",
        ];
        let recs: Vec<EmailRecord> = dates
            .iter()
            .map(|d| EmailRecord::from_raw("", d, "a@a.com", "", "", "", None))
            .collect();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_temporal_summary(&Timeline::new(&recs).summary())
            .unwrap();

        assert!(output.contains("Top 5 years by volume"));
        let pos = |year: &str| output.find(year).unwrap();
        assert!(pos("2015 ") < pos("2020 "));
        assert!(pos("2020 ") < pos("2016 "));
        assert!(!output.contains("2019 "));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
