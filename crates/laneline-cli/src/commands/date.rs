use clap::Subcommand;
use laneline_core::{from_day_number, to_day_number};

#[derive(Subcommand)]
pub enum DateAction {
    /// Convert YYYY-MM-DD to a day number
    ToDay {
        /// Calendar date, e.g. 2024-01-05
        date: String,
    },
    /// Convert a day number to YYYY-MM-DD
    FromDay {
        /// Days since 1970-01-01
        #[arg(allow_negative_numbers = true)]
        day: i64,
    },
}

pub fn run(action: DateAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DateAction::ToDay { date } => println!("{}", to_day_number(date.as_str())?),
        DateAction::FromDay { day } => println!("{}", from_day_number(day)?),
    }
    Ok(())
}
