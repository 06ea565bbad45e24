//! Normalized scoring factors, each mapping one task attribute into `0.0..=1.0`.

use crate::core::task::MAX_ESTIMATED_HOURS;

/// Days between the earliest and latest representable due dates
/// (0001-01-01 to 9999-12-31), plus one.
pub const DATE_SPAN_DAYS: i64 = 3_652_059;

/// Urgency bands by days until due.
///
/// Overdue tasks start at 0.9 and climb 0.1 per day late, capped at 1.0.
/// Undated tasks sit in the middle at 0.5.
pub fn urgency(days_until_due: Option<i64>) -> f64 {
    let Some(days) = days_until_due else {
        return 0.5;
    };

    if days < 0 {
        return (9 + days.unsigned_abs()).min(10) as f64 / 10.0;
    }

    match days {
        0 => 1.0,
        1 => 0.95,
        2..=3 => 0.85,
        4..=7 => 0.70,
        8..=14 => 0.50,
        15..=30 => 0.30,
        _ => 0.10,
    }
}

/// Importance 1..=10 scaled to 0.1..=1.0.
pub fn importance(value: u8) -> f64 {
    f64::from(value.clamp(1, 10)) / 10.0
}

/// Effort bands. Unestimated work counts as a quick win.
pub fn effort(hours: f64) -> f64 {
    if hours <= 1.0 {
        1.0
    } else if hours <= 2.0 {
        0.9
    } else if hours <= 4.0 {
        0.7
    } else if hours <= 8.0 {
        0.5
    } else if hours <= 16.0 {
        0.3
    } else {
        0.1
    }
}

/// Strictly decreasing effort credit over `0..=MAX_ESTIMATED_HOURS`.
///
/// A hyperbolic term halves at four hours and carries the spread among
/// everyday estimates. Far out it flattens below float resolution, so a
/// linear term across the accepted range keeps every extra hour worth at
/// least [`effort_step`].
pub fn effort_curve(hours: f64) -> f64 {
    let hours = hours.clamp(0.0, MAX_ESTIMATED_HOURS);
    let near = 1.0 / (1.0 + hours / 4.0);
    let linear = (MAX_ESTIMATED_HOURS - hours) / MAX_ESTIMATED_HOURS;
    0.9 * near + 0.1 * linear
}

/// Lower bound on the drop of [`effort_curve`] per hour of estimate.
pub fn effort_step() -> f64 {
    0.1 / MAX_ESTIMATED_HOURS
}

/// Strictly increasing in the number of dependents, 0 for none.
pub fn dependents(count: usize) -> f64 {
    let n = count as f64;
    n / (n + 1.0)
}

/// Strictly decreasing due-date proximity over every representable date.
///
/// A banded near-term term gives visible spread over the coming weeks; a
/// linear term across the whole date range makes each later day score
/// lower by at least [`proximity_step`].
pub fn deadline_proximity(days_until_due: i64) -> f64 {
    let near = if days_until_due <= 0 {
        1.0
    } else {
        7.0 / (7.0 + days_until_due as f64)
    };
    let clamped = days_until_due.clamp(-DATE_SPAN_DAYS, DATE_SPAN_DAYS);
    let linear = (DATE_SPAN_DAYS - clamped) as f64 / (2 * DATE_SPAN_DAYS) as f64;
    0.9 * near + 0.1 * linear
}

/// Lower bound on `deadline_proximity(d) - deadline_proximity(d + 1)`.
pub fn proximity_step() -> f64 {
    0.1 / (2 * DATE_SPAN_DAYS) as f64
}
