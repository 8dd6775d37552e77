pub mod commit;
pub mod config;
pub mod date;
pub mod lanes;
pub mod ruler;

use std::path::Path;

use laneline_core::{partition_valid, RawItem, TimelineItem};

/// Read a JSON array of item records.
pub fn read_items(path: &Path) -> Result<Vec<RawItem>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let items: Vec<RawItem> = serde_json::from_str(&content)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(items)
}

/// Normalize records, reporting rejected ones on stderr.
///
/// With `strict`, the first rejection is returned as an error instead.
pub fn normalize_items(
    raws: &[RawItem],
    strict: bool,
) -> Result<Vec<TimelineItem>, Box<dyn std::error::Error>> {
    let (items, rejected) = partition_valid(raws);
    if let Some(first) = rejected.first() {
        if strict {
            return Err(first.error.clone().into());
        }
    }
    for r in &rejected {
        eprintln!("skipping item {}: {}", r.id, r.error);
    }
    Ok(items)
}
