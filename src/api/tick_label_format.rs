/// Formats one colorbar tick with just enough decimals to tell neighbours apart.
///
/// `tick_step_abs` is the spacing between consecutive ticks; irregular tick
/// sets pass their smallest gap.
pub(crate) fn format_tick_label(value: f64, tick_step_abs: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e6).contains(&magnitude) {
        return trim_exponent_mantissa(format!("{value:.3e}"));
    }

    let precision = precision_from_step(tick_step_abs);
    trim_decimal(format!("{value:.precision$}"))
}

/// Smallest gap between sorted neighbouring ticks, or the full span for one tick.
pub(crate) fn smallest_tick_gap(ticks: &[f64], span: f64) -> f64 {
    ticks
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .filter(|gap| gap.is_finite() && *gap > 0.0)
        .fold(None, |smallest: Option<f64>, gap| {
            Some(smallest.map_or(gap, |current| current.min(gap)))
        })
        .unwrap_or(span.abs())
}

fn precision_from_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    let text = format!("{:.12}", step.abs());
    let Some((_, fraction)) = text.split_once('.') else {
        return 0;
    };
    fraction.trim_end_matches('0').len().clamp(0, 12)
}

fn trim_decimal(mut text: String) -> String {
    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }
    if text == "-0" { "0".to_owned() } else { text }
}

fn trim_exponent_mantissa(text: String) -> String {
    match text.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_decimal(mantissa.to_owned())),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::{format_tick_label, smallest_tick_gap};

    #[test]
    fn decimals_follow_tick_step() {
        assert_eq!(format_tick_label(0.5, 0.5), "0.5");
        assert_eq!(format_tick_label(2.0, 0.5), "2");
        assert_eq!(format_tick_label(0.25, 0.25), "0.25");
        assert_eq!(format_tick_label(40.0, 20.0), "40");
        assert_eq!(format_tick_label(-0.0, 1.0), "0");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_notation() {
        assert_eq!(format_tick_label(2.5e7, 5e6), "2.5e7");
        assert_eq!(format_tick_label(3e-6, 1e-6), "3e-6");
    }

    #[test]
    fn smallest_gap_handles_irregular_ticks() {
        assert_eq!(smallest_tick_gap(&[0.0, 1.0, 1.25, 3.0], 3.0), 0.25);
        assert_eq!(smallest_tick_gap(&[4.0], 2.0), 2.0);
    }
}
