use std::path::PathBuf;

use clap::Args;
use laneline_core::{choose_tick_step, compute_layout, format_date_label, Config, Zoom};

use super::{normalize_items, read_items};

#[derive(Args)]
pub struct TicksArgs {
    /// Pixels per day
    pub pixels_per_day: f64,
}

#[derive(Args)]
pub struct RulerArgs {
    /// JSON file holding an array of items
    pub file: PathBuf,
    /// Zoom factor, clamped to 0.25..=3.0
    #[arg(long, default_value = "1.0")]
    pub zoom: f64,
    /// Label ticks with the full YYYY-MM-DD date
    #[arg(long)]
    pub with_year: bool,
}

pub fn run_ticks(args: TicksArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", choose_tick_step(args.pixels_per_day));
    Ok(())
}

pub fn run_ruler(args: RulerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let raws = read_items(&args.file)?;
    let items = normalize_items(&raws, false)?;

    let zoom = Zoom::new(args.zoom);
    let layout = compute_layout(
        items,
        zoom.pixels_per_day(config.layout.base_pixels_per_day),
        &config.layout,
    )?;

    println!(
        "zoom: {}%  step: {} day(s)  lanes: {}",
        zoom.percent(),
        layout.tick_step,
        layout.lanes.lane_count
    );
    for tick in &layout.ticks {
        let label = if args.with_year {
            format_date_label(tick.day, true)?
        } else {
            tick.label.clone()
        };
        println!("{:>8.1}  {label}", tick.left);
    }
    Ok(())
}
