//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::dataset::read_dataset;
use crate::error::Result;
use crate::output::Formatter;
use sanoma_engine::{summarize, Operation};

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, formatter: &Formatter) -> Result<()> {
    let records = read_dataset(&args.input, Operation::Stats)?;
    let stats = summarize(&records);
    println!("{}", formatter.format_stats(&stats, args.top)?);
    Ok(())
}
