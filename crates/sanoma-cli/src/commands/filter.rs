//! Filter command implementation.

use crate::cli::FilterArgs;
use crate::dataset::{read_dataset, write_json};
use crate::error::Result;
use crate::output::Formatter;
use sanoma_engine::{FilterPipeline, Operation};

/// Execute the filter command.
pub fn execute_filter(args: FilterArgs, formatter: &Formatter) -> Result<()> {
    let records = read_dataset(&args.input, Operation::Filter)?;

    let pipeline = args
        .filters()
        .into_iter()
        .fold(FilterPipeline::new(), FilterPipeline::push);
    tracing::debug!("Applying {} filter(s)", pipeline.filters().len());

    let kept = pipeline.apply(&records);
    write_json(&args.output, &kept)?;

    println!("{}", formatter.saved(kept.len(), records.len(), &args.output));
    Ok(())
}
