//! Expand a (possibly repeating) range into the occurrences inside a window.
//!
//! A repeating range is a template: its occurrences are the template shifted
//! by whole steps (1 day for daily, 7 days for weekly) in either direction.
//! An occurrence is kept when it touches the window, i.e. when
//! `end >= window.start && start <= window.end`. The first kept step is found
//! by arithmetic rather than by walking, so a template years away from the
//! window costs nothing extra.

use chrono::Duration;
use tracing::trace;

use crate::range::{DateRange, DateRangeList};

/// Occurrences of `range` that intersect `bounds`, ascending by start.
///
/// Only the endpoints of `bounds` are used; its own recurrence is ignored.
/// Occurrences never repeat.
pub fn overlapping(range: &DateRange, bounds: &DateRange) -> DateRangeList {
    let Some(step) = range.kind().step() else {
        let hits = if range.overlaps(bounds) {
            vec![*range]
        } else {
            Vec::new()
        };
        return DateRangeList::from_sorted(hits);
    };

    let step_secs = step.num_seconds();
    let behind = (bounds.start() - range.end()).num_seconds();
    let mut k = ceil_div(behind, step_secs);

    let mut occurrences = Vec::new();
    loop {
        let Some(shift) = k.checked_mul(step_secs).and_then(Duration::try_seconds) else {
            break;
        };
        let (Some(start), Some(end)) = (
            range.start().checked_add_signed(shift),
            range.end().checked_add_signed(shift),
        ) else {
            break;
        };
        if start > bounds.end() {
            break;
        }
        occurrences.push(DateRange::occurrence(start, end));
        k += 1;
    }

    trace!(
        kind = %range.kind(),
        count = occurrences.len(),
        "expanded repeating range"
    );
    DateRangeList::from_sorted(occurrences)
}

/// Smallest `k` with `k * divisor >= dividend`, for a positive divisor.
fn ceil_div(dividend: i64, divisor: i64) -> i64 {
    -((-dividend).div_euclid(divisor))
}
