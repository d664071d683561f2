//! Round-number tick and level selection.

pub const COLORBAR_TICK_TARGET_SPACING_PX: f64 = 48.0;
pub const COLORBAR_MIN_TICKS: usize = 2;
pub const COLORBAR_MAX_TICKS: usize = 11;

/// Upper bound on ticks or level boundaries produced by one call.
pub const MAX_TICK_INDICES: usize = 1024;

const NICE_MULTIPLIERS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Tick count fitting `axis_span_px` with roughly `target_spacing_px` between ticks.
#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks.max(min_ticks))
}

/// Smallest step of the form `{1, 2, 2.5, 5} x 10^n` that is `>= raw_step`.
#[must_use]
pub fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let fraction = raw_step / magnitude;
    let multiplier = NICE_MULTIPLIERS
        .into_iter()
        .find(|candidate| *candidate >= fraction * (1.0 - 1e-9))
        .unwrap_or(10.0);
    multiplier * magnitude
}

/// Round-valued ticks inside `[min, max]`, at most about `target_count` of them.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, target_count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    if low == high {
        return vec![low];
    }

    let intervals = target_count.clamp(2, MAX_TICK_INDICES) - 1;
    let step = nice_step(half_span(low, high) / intervals as f64 * 2.0);
    let tolerance = step * 1e-9;
    let Some((first, last)) = index_range(
        ((low - tolerance) / step).ceil(),
        ((high + tolerance) / step).floor(),
    ) else {
        return vec![low, high];
    };

    (first..=last).map(|index| clean_zero(index as f64 * step)).collect()
}

/// Round-valued boundaries that cover `[min, max]` with at most about
/// `max_intervals` bands.
#[must_use]
pub fn nice_covering_levels(min: f64, max: f64, max_intervals: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let span = if high > low {
        half_span(low, high) * 2.0
    } else {
        low.abs().max(1.0)
    };
    let intervals = max_intervals.clamp(1, MAX_TICK_INDICES - 1);

    let step = nice_step(span.min(f64::MAX) / intervals as f64);
    let tolerance = step * 1e-9;
    let Some((first, mut last)) = index_range(
        ((low + tolerance) / step).floor(),
        ((high - tolerance) / step).ceil(),
    ) else {
        return vec![low, high];
    };
    if last <= first {
        last = first + 1;
    }

    (first..=last)
        .map(|index| clean_zero((index as f64 * step).clamp(f64::MIN, f64::MAX)))
        .collect()
}

/// `(high - low) / 2` without overflowing for limits near `f64::MAX`.
fn half_span(low: f64, high: f64) -> f64 {
    high * 0.5 - low * 0.5
}

/// Integer step indices between `first` and `last`, or `None` when they do not
/// fit or would produce more than `MAX_TICK_INDICES` values.
fn index_range(first: f64, last: f64) -> Option<(i64, i64)> {
    const LIMIT: f64 = 9.0e18;
    if !(first.abs() < LIMIT && last.abs() < LIMIT) {
        return None;
    }
    let (first, last) = (first as i64, last as i64);
    let count = last.checked_sub(first)?;
    (count < MAX_TICK_INDICES as i64).then_some((first, last))
}

fn clean_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
