//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use sanoma_engine::{Filter, Granularity};
use std::path::PathBuf;

/// Sanoma - Analyze an extracted mailbox dataset.
#[derive(Debug, Parser)]
#[command(name = "sanoma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SANOMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter emails and save the result
    Filter(FilterArgs),

    /// Find emails matching a pattern in subject or captured body
    Query(QueryArgs),

    /// Show dataset statistics
    Stats(StatsArgs),

    /// Rank the sender domains behind a content pattern
    Domains(DomainsArgs),

    /// Bucket emails by year, month, weekday or hour
    Timeline(TimelineArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the filter command.
///
/// Filters are applied in the order they are listed here.
#[derive(Debug, Parser)]
pub struct FilterArgs {
    /// Input dataset (JSON array of records)
    pub input: PathBuf,

    /// Output file
    pub output: PathBuf,

    /// Sender domain: `*.suffix` or a regular expression
    #[arg(long)]
    pub domain: Option<String>,

    /// Text the raw date must contain (e.g. 2020)
    #[arg(long)]
    pub year: Option<String>,

    /// Text the subject must contain, case-insensitive
    #[arg(long)]
    pub subject_contains: Option<String>,

    /// Only emails with a captured body
    #[arg(long)]
    pub has_body: bool,

    /// Keep at most this many emails
    #[arg(long)]
    pub limit: Option<usize>,
}

impl FilterArgs {
    /// Filter steps in application order
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        if let Some(domain) = &self.domain {
            filters.push(Filter::Domain(domain.clone()));
        }
        if let Some(year) = &self.year {
            filters.push(Filter::Year(year.clone()));
        }
        if let Some(text) = &self.subject_contains {
            filters.push(Filter::SubjectContains(text.clone()));
        }
        if self.has_body {
            filters.push(Filter::HasBody(true));
        }
        if let Some(limit) = self.limit {
            filters.push(Filter::Limit(limit));
        }
        filters
    }
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Input dataset (JSON array of records)
    pub input: PathBuf,

    /// Output file
    pub output: PathBuf,

    /// Regular expression to search for; omit to keep everything
    #[arg(long)]
    pub pattern: Option<String>,

    /// Case sensitive search
    #[arg(long)]
    pub case_sensitive: bool,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Input dataset (JSON array of records)
    pub input: PathBuf,

    /// Number of top domains to show
    #[arg(long, default_value = "10")]
    pub top: usize,
}

/// Arguments for the domains command.
#[derive(Debug, Parser)]
pub struct DomainsArgs {
    /// Input dataset (JSON array of records)
    pub input: PathBuf,

    /// Domain pattern to compare against (e.g. wsu.edu or *.edu)
    pub compare_pattern: String,

    /// Content pattern to analyze [default from config]
    #[arg(long)]
    pub pattern: Option<String>,

    /// Coverage threshold, 0.0-1.0 [default from config]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Save the analysis as JSON instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the timeline command.
#[derive(Debug, Parser)]
pub struct TimelineArgs {
    /// Input dataset (JSON array of records)
    pub input: PathBuf,

    /// Type of temporal analysis
    #[arg(long, value_enum, default_value = "summary")]
    pub analysis: AnalysisKind,

    /// Restrict monthly analysis to one year
    #[arg(long)]
    pub year: Option<i32>,

    /// Save the analysis as JSON instead of printing it
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config file
    #[arg(long)]
    pub write: bool,
}

/// Temporal analysis kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AnalysisKind {
    /// Per calendar year
    Year,
    /// Per YYYY-MM
    Month,
    /// Per weekday, Monday first
    Weekday,
    /// Per hour of day
    Hour,
    /// Headline numbers with year and weekday views
    Summary,
}

impl AnalysisKind {
    /// Bucket granularity, `None` for the summary
    pub fn granularity(&self) -> Option<Granularity> {
        match self {
            AnalysisKind::Year => Some(Granularity::Year),
            AnalysisKind::Month => Some(Granularity::Month),
            AnalysisKind::Weekday => Some(Granularity::Weekday),
            AnalysisKind::Hour => Some(Granularity::Hour),
            AnalysisKind::Summary => None,
        }
    }

    /// Lowercase name used in headings
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Year => "year",
            AnalysisKind::Month => "month",
            AnalysisKind::Weekday => "weekday",
            AnalysisKind::Hour => "hour",
            AnalysisKind::Summary => "summary",
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
