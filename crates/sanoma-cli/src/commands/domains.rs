//! Domains command implementation.

use crate::cli::DomainsArgs;
use crate::config::{validate_threshold, AnalysisSettings};
use crate::dataset::{read_dataset, write_json};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sanoma_engine::{analyze_domains, Operation};

/// Execute the domains command.
///
/// Flags override the `[analysis]` defaults from the configuration file.
pub fn execute_domains(
    args: DomainsArgs,
    defaults: &AnalysisSettings,
    formatter: &Formatter,
) -> Result<()> {
    let (pattern, threshold) = resolve(&args, defaults)?;
    let records = read_dataset(&args.input, Operation::Domains)?;

    let analysis = analyze_domains(&records, &pattern, &args.compare_pattern, threshold)?;
    tracing::info!(
        "{} domain(s) reach {:.1}% of '{}'",
        analysis.pattern_analysis.top_domains.len(),
        analysis.pattern_analysis.actual_coverage * 100.0,
        pattern
    );

    match &args.output {
        Some(path) => {
            write_json(path, &analysis)?;
            println!(
                "{}",
                formatter.success(&format!("Analysis saved to {}", path.display()))
            );
        }
        None => println!("{}", formatter.format_domain_analysis(&analysis)?),
    }
    Ok(())
}

fn resolve(args: &DomainsArgs, defaults: &AnalysisSettings) -> Result<(String, f64)> {
    let pattern = args
        .pattern
        .clone()
        .unwrap_or_else(|| defaults.pattern.clone());
    if pattern.is_empty() {
        return Err(CliError::InvalidInput("Pattern must not be empty".to_string()));
    }

    let threshold = args.threshold.unwrap_or(defaults.threshold);
    validate_threshold(threshold).map_err(CliError::InvalidInput)?;

    Ok((pattern, threshold))
}
