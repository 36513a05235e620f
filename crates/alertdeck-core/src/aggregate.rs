//! Aggregate statistics across origins.
//!
//! The aggregate is a pure function of the current per-origin statistic
//! sets. It is recomputed from scratch on every ingest; origin counts are
//! small (one per collector instance), so a full fold is cheap.

use alertdeck_types::StatSet;

/// Synthetic label holding the grand sum of every value.
pub const TOTAL_LABEL: &str = "total";

/// Fold per-origin statistic sets into aggregate counters.
///
/// Each label's value is summed across all sets, and every value is also
/// added to [`TOTAL_LABEL`]. An origin that itself reports a `"total"`
/// label contributes it like any other label, and again to the grand sum.
/// Sums saturate at the `i64` bounds.
pub fn aggregate<'a, I>(sets: I) -> StatSet
where
    I: IntoIterator<Item = &'a StatSet>,
{
    let mut out = StatSet::new();
    let mut total: i64 = 0;
    for set in sets {
        for (label, value) in set {
            let slot = out.entry(label.clone()).or_insert(0);
            *slot = slot.saturating_add(*value);
            total = total.saturating_add(*value);
        }
    }
    if !out.is_empty() {
        let slot = out.entry(TOTAL_LABEL.to_owned()).or_insert(0);
        *slot = slot.saturating_add(total);
    }
    out
}
