//! Animated metric counters

use std::time::Duration;

/// Length of one counter animation
pub const COUNTER_DURATION: Duration = Duration::from_millis(880);

/// Final value a counter animates towards
#[derive(Debug, Clone, PartialEq)]
pub struct CounterTarget {
    pub target: f64,
    pub decimals: usize,
    pub suffix: &'static str,
}

/// Parse metric text such as `1,204`, `87.5%` or `42`
pub fn parse_target(raw: &str) -> Option<CounterTarget> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let (numeric, suffix) = match text.strip_suffix('%') {
        Some(rest) => (rest, "%"),
        None => (text, ""),
    };
    let normalized: String = numeric.chars().filter(|&c| c != ',').collect();

    let (whole, fraction) = match normalized.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (normalized.as_str(), None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.map_or(true, all_digits) {
        return None;
    }

    let target: f64 = normalized.parse().ok()?;
    if !target.is_finite() {
        return None;
    }

    Some(CounterTarget {
        target,
        decimals: fraction.map_or(0, str::len),
        suffix,
    })
}

/// Cubic ease-out over `progress` in `[0, 1]`
pub fn eased(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Value shown `elapsed` into an animation lasting `duration`
/// (the page uses [`COUNTER_DURATION`])
pub fn frame_value(target: f64, elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return target;
    }
    let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
    if progress >= 1.0 {
        target
    } else {
        target * eased(progress)
    }
}

/// Render with thousands separators and fixed decimals
pub fn format_value(value: f64, decimals: usize, suffix: &str) -> String {
    let fixed = if decimals > 0 {
        format!("{:.*}", decimals, value)
    } else {
        format!("{}", value.round())
    };

    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + whole.len() / 3 + suffix.len());
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped.push_str(suffix);
    grouped
}
