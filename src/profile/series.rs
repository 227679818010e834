// ---------------------------------------------------------------------------
// TimeSeries: ordered time-keyed samples with linear interpolation
// ---------------------------------------------------------------------------

/// A time axis of `(time, value)` samples with strictly ordered, unique keys.
///
/// Stored as a sorted vector rather than an ordered map so that scans over
/// the series (event detection, leg segmentation) are plain slice cursors.
/// Arbitrary sample times are accepted on ingestion; the reconstruction
/// pipeline only writes keys that are multiples of its time step.
#[derive(Debug, Clone, Default)]
pub struct TimeSeries {
    samples: Vec<(f64, f64)>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    /// Insert or replace the sample at `time`.
    pub fn put(&mut self, time: f64, value: f64) {
        match self
            .samples
            .binary_search_by(|(t, _)| t.total_cmp(&time))
        {
            Ok(i) => self.samples[i].1 = value,
            Err(i) => self.samples.insert(i, (time, value)),
        }
    }

    /// Value at `t`: exact if sampled, linearly interpolated between the
    /// bracketing samples otherwise, NaN outside the observed domain.
    pub fn get(&self, t: f64) -> f64 {
        match self.samples.binary_search_by(|(k, _)| k.total_cmp(&t)) {
            Ok(i) => self.samples[i].1,
            Err(i) => {
                if i == 0 || i == self.samples.len() {
                    f64::NAN
                } else {
                    let (t0, v0) = self.samples[i - 1];
                    let (t1, v1) = self.samples[i];
                    v0 + (v1 - v0) * (t - t0) / (t1 - t0)
                }
            }
        }
    }

    pub fn first_time(&self) -> Option<f64> {
        self.samples.first().map(|(t, _)| *t)
    }

    pub fn last_time(&self) -> Option<f64> {
        self.samples.last().map(|(t, _)| *t)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time-ordered view of the raw samples.
    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    /// Resample onto every multiple of `dt` within the observed range.
    ///
    /// The fill-in step of the reconstruction pipeline: values between raw
    /// samples come from linear interpolation, times outside the raw range
    /// stay absent (reads there return NaN).
    pub fn filled(&self, dt: f64) -> TimeSeries {
        let mut out = TimeSeries::new();
        let (Some(first), Some(last)) = (self.first_time(), self.last_time()) else {
            return out;
        };

        let mut i = (first / dt).ceil() as i64;
        let i_end = (last / dt).floor() as i64;
        while i <= i_end {
            let t = i as f64 * dt;
            let v = self.get(t);
            if !v.is_nan() {
                out.put(t, v);
            }
            i += 1;
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
