//! Query command implementation.

use crate::cli::QueryArgs;
use crate::dataset::{read_dataset, write_json};
use crate::error::Result;
use crate::output::Formatter;
use sanoma_engine::{query, Operation};

/// Execute the query command.
pub fn execute_query(args: QueryArgs, formatter: &Formatter) -> Result<()> {
    let records = read_dataset(&args.input, Operation::Query)?;

    let hits = query(&records, args.pattern.as_deref(), args.case_sensitive)?;
    write_json(&args.output, &hits)?;

    println!("{}", formatter.saved(hits.len(), records.len(), &args.output));
    Ok(())
}
