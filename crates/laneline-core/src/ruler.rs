//! Ruler tick selection and labels.

use crate::date::from_day_number;
use crate::error::TimelineError;

/// Minimum horizontal distance between adjacent labels.
pub const MIN_LABEL_SPACING: f64 = 40.0;

/// Most ticks a single ruler carries.
pub const MAX_TICKS: i64 = 4_096;

/// Day steps the ruler snaps to, ascending.
pub const TICK_CANDIDATES: [u32; 9] = [1, 2, 5, 7, 10, 14, 21, 28, 30];

/// Pick the day interval between ruler labels for a pixel density.
///
/// Returns the smallest candidate keeping labels at least
/// [`MIN_LABEL_SPACING`] apart, or the exact required step when even the
/// largest candidate is too dense. Non-positive and NaN densities saturate to
/// `u32::MAX`.
pub fn choose_tick_step(pixels_per_day: f64) -> u32 {
    if pixels_per_day.is_nan() || pixels_per_day <= 0.0 {
        return u32::MAX;
    }
    if let Some(step) = TICK_CANDIDATES
        .iter()
        .copied()
        .find(|&step| f64::from(step) * pixels_per_day >= MIN_LABEL_SPACING)
    {
        return step;
    }
    let required = (MIN_LABEL_SPACING / pixels_per_day).ceil();
    if required >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        required as u32
    }
}

/// Widen `step` until a span of `total_days` needs at most [`MAX_TICKS`]
/// ticks from [`ruler_ticks`].
pub fn cap_tick_step(step: u32, total_days: i64) -> u32 {
    let floor = total_days.max(0) / MAX_TICKS + 1;
    let floor = u32::try_from(floor).unwrap_or(u32::MAX);
    step.max(floor)
}

/// `MM-DD`, or `YYYY-MM-DD` when `with_year` is set.
pub fn format_date_label(day: i64, with_year: bool) -> Result<String, TimelineError> {
    let iso = from_day_number(day)?;
    if with_year {
        return Ok(iso);
    }
    // The month-day suffix is always the last five characters.
    Ok(iso[iso.len() - 5..].to_string())
}

/// Tick days from `min_day`, spaced by `step`, covering the span.
///
/// Yields `floor(total_days / step) + 1` ticks where
/// `total_days = max_day - min_day + 1`.
pub fn ruler_ticks(min_day: i64, max_day: i64, step: u32) -> Vec<i64> {
    if max_day < min_day || step == 0 {
        return Vec::new();
    }
    let step = i64::from(step);
    let total_days = max_day - min_day + 1;
    let count = total_days / step + 1;
    (0..count).map(|i| min_day + i * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::to_day_number;

    #[test]
    fn reference_steps() {
        assert_eq!(choose_tick_step(40.0), 1);
        assert_eq!(choose_tick_step(5.0), 10);
        assert_eq!(choose_tick_step(22.0), 2);
        assert_eq!(choose_tick_step(8.0), 5);
    }

    #[test]
    fn falls_back_to_required_step() {
        // 30 * 1.0 < 40, so the exact requirement wins.
        assert_eq!(choose_tick_step(1.0), 40);
        assert_eq!(choose_tick_step(0.5), 80);
    }

    #[test]
    fn degenerate_densities_saturate() {
        assert_eq!(choose_tick_step(0.0), u32::MAX);
        assert_eq!(choose_tick_step(-3.0), u32::MAX);
        assert_eq!(choose_tick_step(f64::NAN), u32::MAX);
        assert_eq!(choose_tick_step(f64::MIN_POSITIVE), u32::MAX);
        assert_eq!(choose_tick_step(f64::INFINITY), 1);
    }

    #[test]
    fn long_spans_widen_the_step() {
        assert_eq!(cap_tick_step(2, 10), 2);
        assert_eq!(cap_tick_step(1, MAX_TICKS - 1), 1);

        // 0001-01-01 through 9999-12-31.
        let span = 3_652_059;
        let step = cap_tick_step(2, span);
        assert!(step > 2);
        let ticks = ruler_ticks(0, span - 1, step);
        assert!(ticks.len() as i64 <= MAX_TICKS);
        assert!(*ticks.last().unwrap() >= span - 1);
    }

    #[test]
    fn labels() {
        let day = to_day_number("2024-03-09").unwrap();
        assert_eq!(format_date_label(day, false).unwrap(), "03-09");
        assert_eq!(format_date_label(day, true).unwrap(), "2024-03-09");
    }

    #[test]
    fn tick_positions() {
        assert_eq!(ruler_ticks(100, 109, 5), vec![100, 105, 110]);
        assert_eq!(ruler_ticks(100, 100, 1), vec![100, 101]);
        assert!(ruler_ticks(10, 5, 1).is_empty());
    }
}
