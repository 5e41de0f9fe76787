//! Linear re-gridding of irregular time axes onto a uniform interval.

use crate::{Result, SeismoError};

/// Relative slack applied when deciding whether the last original timestamp
/// lands on the new grid.
const GRID_EPSILON: f64 = 1e-6;

/// Average sampling interval of a time axis: `(last - first) / (n - 1)`.
pub fn mean_interval(times: &[f64]) -> Result<f64> {
    if times.len() < 2 {
        return Err(SeismoError::TooFewSamples(times.len()));
    }
    Ok((times[times.len() - 1] - times[0]) / (times.len() - 1) as f64)
}

/// Uniform grid covering an original time axis.
#[derive(Debug, Clone)]
pub struct Resampler<'a> {
    source: &'a [f64],
    interval: f64,
    len: usize,
}

impl<'a> Resampler<'a> {
    /// The grid starts at `times[0]` and steps by `interval` up to and
    /// including the last original timestamp.
    pub fn new(times: &'a [f64], interval: f64) -> Result<Self> {
        if times.len() < 2 {
            return Err(SeismoError::TooFewSamples(times.len()));
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(SeismoError::InvalidInterval(interval));
        }
        if let Some(index) = times.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(SeismoError::NonIncreasingTime { index: index + 1 });
        }
        let span = times[times.len() - 1] - times[0];
        let steps = (span / interval + GRID_EPSILON).floor();
        if steps > u32::MAX as f64 {
            return Err(SeismoError::InvalidInterval(interval));
        }
        tracing::debug!(interval, points = steps as usize + 1, "resampling grid");
        Ok(Self {
            source: times,
            interval,
            len: steps as usize + 1,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    fn time_at(&self, i: usize) -> f64 {
        let last = self.source[self.source.len() - 1];
        (self.source[0] + self.interval * i as f64).min(last)
    }

    /// Timestamps of the new grid.
    pub fn times(&self) -> Vec<f64> {
        (0..self.len)
            .map(|i| self.source[0] + self.interval * i as f64)
            .collect()
    }

    /// Interpolate one trace sampled on the original axis onto the grid.
    pub fn apply(&self, trace: &[f32]) -> Result<Vec<f32>> {
        let times = self.source;
        if trace.len() != times.len() {
            return Err(SeismoError::TraceLength {
                trace: 0,
                expected: times.len(),
                actual: trace.len(),
            });
        }
        let last = times.len() - 1;
        let mut cursor = 1;
        let mut out = Vec::with_capacity(self.len);
        for i in 0..self.len {
            let t = self.time_at(i);
            while cursor < last && t > times[cursor] {
                cursor += 1;
            }
            let (t0, t1) = (times[cursor - 1], times[cursor]);
            let (v0, v1) = (f64::from(trace[cursor - 1]), f64::from(trace[cursor]));
            out.push((((t - t0) * v1 + (t1 - t) * v0) / (t1 - t0)) as f32);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_uniform_axis_is_reproduced() {
        let times: Vec<f64> = (0..11).map(|i| i as f64 * 0.1).collect();
        let trace: Vec<f32> = (0..11).map(|i| (i as f32 * 0.7).sin()).collect();
        let r = Resampler::new(&times, mean_interval(&times).unwrap()).unwrap();
        assert_eq!(r.len(), 11);
        let out = r.apply(&trace).unwrap();
        for (a, b) in out.iter().zip(&trace) {
            assert_close(*a, *b);
        }
    }

    #[test]
    fn test_grid_is_uniform() {
        let times = [0.0, 0.0013, 0.0021, 0.0037, 0.005];
        let r = Resampler::new(&times, 0.001).unwrap();
        let grid = r.times();
        assert_eq!(grid.len(), 6);
        for w in grid.windows(2) {
            assert!(w[1] > w[0]);
            assert!((w[1] - w[0] - 0.001).abs() < 1e-12);
        }
    }

    #[test]
    fn test_linear_interpolation() {
        let times = [0.0, 1.0, 3.0];
        let trace = [0.0, 10.0, 30.0];
        let r = Resampler::new(&times, 0.5).unwrap();
        let out = r.apply(&trace).unwrap();
        assert_eq!(out.len(), 7);
        for (i, v) in out.iter().enumerate() {
            assert_close(*v, i as f32 * 5.0);
        }
    }

    #[test]
    fn test_first_sample_kept() {
        let times = [2.0, 2.5, 4.0];
        let trace = [7.0, 1.0, 0.0];
        let out = Resampler::new(&times, 0.75).unwrap().apply(&trace).unwrap();
        assert_close(out[0], 7.0);
    }

    #[test]
    fn test_coarser_grid_drops_partial_tail() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let r = Resampler::new(&times, 2.0).unwrap();
        assert_eq!(r.times(), vec![0.0, 2.0]);
    }

    #[test]
    fn test_rejects_bad_axes() {
        assert!(matches!(
            Resampler::new(&[0.0, 1.0, 1.0], 0.5),
            Err(SeismoError::NonIncreasingTime { index: 2 })
        ));
        assert!(matches!(Resampler::new(&[0.0], 0.5), Err(SeismoError::TooFewSamples(1))));
        assert!(matches!(Resampler::new(&[0.0, 1.0], 0.0), Err(SeismoError::InvalidInterval(_))));
        assert!(Resampler::new(&[0.0, 1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_trace_length_mismatch() {
        let r = Resampler::new(&[0.0, 1.0, 2.0], 1.0).unwrap();
        assert!(r.apply(&[1.0, 2.0]).is_err());
    }
}
