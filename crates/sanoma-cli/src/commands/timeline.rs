//! Timeline command implementation.

use crate::cli::TimelineArgs;
use crate::dataset::{read_dataset, write_json};
use crate::error::Result;
use crate::output::Formatter;
use sanoma_engine::{Operation, Timeline};

/// Execute the timeline command.
pub fn execute_timeline(args: TimelineArgs, formatter: &Formatter) -> Result<()> {
    let records = read_dataset(&args.input, Operation::Timeline)?;
    let timeline = Timeline::new(&records);

    if timeline.skipped() > 0 {
        tracing::warn!(
            "{} email(s) without a parseable date left out of the timeline",
            timeline.skipped()
        );
    }

    match (args.analysis.granularity(), &args.output) {
        (Some(granularity), Some(path)) => {
            write_json(path, &timeline.rows(granularity, args.year))?;
        }
        (Some(granularity), None) => {
            let rows = timeline.rows(granularity, args.year);
            println!("{}", formatter.format_period_rows(args.analysis, &rows)?);
        }
        (None, Some(path)) => write_json(path, &timeline.summary())?,
        (None, None) => {
            println!("{}", formatter.format_temporal_summary(&timeline.summary())?);
        }
    }

    if let Some(path) = &args.output {
        println!(
            "{}",
            formatter.success(&format!(
                "{} analysis saved to {}",
                args.analysis.as_str(),
                path.display()
            ))
        );
    }
    Ok(())
}
