use std::path::PathBuf;

use clap::Args;
use laneline_core::{apply_commit, Commit, ItemId};

use super::read_items;

#[derive(Args)]
pub struct CommitArgs {
    /// JSON file holding an array of items
    pub file: PathBuf,
    /// Item id (numeric ids are matched as numbers)
    #[arg(long)]
    pub id: String,
    /// New start day number
    #[arg(long, allow_negative_numbers = true)]
    pub start_day: i64,
    /// New end day number
    #[arg(long, allow_negative_numbers = true)]
    pub end_day: i64,
    /// New display name
    #[arg(long)]
    pub name: Option<String>,
    /// Write the result back to the file instead of printing it
    #[arg(long)]
    pub write: bool,
}

pub fn run(args: CommitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raws = read_items(&args.file)?;
    let commit = Commit {
        id: ItemId::parse_loose(&args.id),
        start_day: args.start_day,
        end_day: args.end_day,
        name: args.name,
    };
    let updated = apply_commit(&raws, &commit)?;
    let json = serde_json::to_string_pretty(&updated)?;

    if args.write {
        std::fs::write(&args.file, format!("{json}\n"))?;
        tracing::info!(file = %args.file.display(), id = %commit.id, "commit written");
        println!("ok");
    } else {
        println!("{json}");
    }
    Ok(())
}
