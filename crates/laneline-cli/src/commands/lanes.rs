use std::path::PathBuf;

use clap::Args;
use laneline_core::assign_lanes;

use super::{normalize_items, read_items};

#[derive(Args)]
pub struct LanesArgs {
    /// JSON file holding an array of items
    pub file: PathBuf,
    /// Print the assignment as JSON
    #[arg(long)]
    pub json: bool,
    /// Fail on the first invalid item instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: LanesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raws = read_items(&args.file)?;
    let items = normalize_items(&raws, args.strict)?;
    let result = assign_lanes(items);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("lanes: {}", result.lane_count);
    for lane in 0..result.lane_count {
        let row: Vec<String> = result
            .lane(lane)
            .map(|it| format!("{} [{}..{}]", it.name, it.start_date, it.end_date))
            .collect();
        println!("{lane}: {}", row.join(", "));
    }
    Ok(())
}
