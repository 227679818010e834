// ---------------------------------------------------------------------------
// Engine-event detection: trend switches in a velocity series
// ---------------------------------------------------------------------------

/// Find the next trend-switch event in a time-ordered sample slice.
///
/// Scans forward from the cursor `from`. With `rising = true` the series is
/// expected to be increasing, and the first index where it plateaus or
/// decreases is the event; with `rising = false` the inverse. Returns
/// `samples.len()` when no event exists — the caller handles the degenerate
/// case, nothing panics.
///
/// Engine cutoff/restart boundaries (MECO, SES, SECO) are found by chaining
/// three calls, each starting at the index the previous one returned.
pub fn find_event_index(samples: &[(f64, f64)], from: usize, rising: bool) -> usize {
    let mut i = from.max(1);
    while i < samples.len() {
        let prev = samples[i - 1].1;
        let cur = samples[i].1;
        let switched = if rising { cur <= prev } else { cur >= prev };
        if switched {
            return i;
        }
        i += 1;
    }
    samples.len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
