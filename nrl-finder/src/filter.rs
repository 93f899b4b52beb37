//! Zero-phase Butterworth low-pass filtering of fragment length histograms.
//!
//! The filter is designed with the bilinear transform (cutoff pre-warped) and kept as a
//! cascade of second-order sections, which stays well conditioned at the low cutoffs
//! used on nucleosome ladders. [`Butterworth::filtfilt`] runs it forward and then
//! backward, so the output has no phase shift and extrema stay where the data put them.

use std::f64::consts::PI;

use log::debug;

use crate::config::NrlParams;
use crate::errors::{NrlError, NrlResult};
use crate::histogram::{Histogram, SmoothedHistogram};

/// One second-order section in transposed direct form II. `a[0]` is always 1.
/// First-order sections have `b[2] == a[2] == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub b: [f64; 3],
    pub a: [f64; 3],
}

impl Section {
    /// Gain at zero frequency.
    pub fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (self.a[0] + self.a[1] + self.a[2])
    }

    /// Filter state after settling on a constant input of 1.
    fn steady_state(&self) -> [f64; 2] {
        let gain = self.dc_gain();
        let z1 = self.b[2] - self.a[2] * gain;
        let z0 = self.b[1] - self.a[1] * gain + z1;
        [z0, z1]
    }

    fn is_first_order(&self) -> bool {
        self.b[2] == 0.0 && self.a[2] == 0.0
    }
}

/// A digital Butterworth low-pass filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Butterworth {
    order: usize,
    sections: Vec<Section>,
}

impl Butterworth {
    ///
    /// Design a low-pass filter.
    ///
    /// # Arguments
    /// - order: filter order, at least 1
    /// - wn: cutoff as a fraction of the Nyquist frequency, in `(0, 1)`
    pub fn low_pass(order: usize, wn: f64) -> NrlResult<Self> {
        if order == 0 {
            return Err(NrlError::InvalidInput(
                "filter order must be at least 1".to_string(),
            ));
        }
        if !(wn > 0.0 && wn < 1.0) {
            return Err(NrlError::InvalidInput(format!(
                "normalized cutoff must be in (0, 1), got {}",
                wn
            )));
        }

        // pre-warped analog cutoff
        let k = (PI * wn / 2.0).tan();
        let k2 = k * k;

        let mut sections = Vec::with_capacity(order.div_ceil(2));

        // conjugate pole pairs: s^2 + 2 sin(theta) s + 1
        for i in 0..order / 2 {
            let theta = PI * (2 * i + 1) as f64 / (2 * order) as f64;
            let damping = 2.0 * theta.sin();
            let norm = 1.0 / (1.0 + k * damping + k2);
            let b0 = k2 * norm;

            sections.push(Section {
                b: [b0, 2.0 * b0, b0],
                a: [1.0, 2.0 * (k2 - 1.0) * norm, (1.0 - k * damping + k2) * norm],
            });
        }

        // odd orders keep one real pole: s + 1
        if order % 2 == 1 {
            let norm = 1.0 / (1.0 + k);
            let b0 = k * norm;

            sections.push(Section {
                b: [b0, b0, 0.0],
                a: [1.0, (k - 1.0) * norm, 0.0],
            });
        }

        Ok(Butterworth { order, sections })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of samples reflected onto each end before filtering.
    fn pad_len(&self) -> usize {
        let first_order = self.sections.iter().filter(|s| s.is_first_order()).count();
        3 * (2 * self.sections.len() + 1 - first_order)
    }

    /// Steady-state initial conditions of the whole cascade for a unit input.
    fn initial_conditions(&self) -> Vec<[f64; 2]> {
        let mut scale = 1.0;
        self.sections
            .iter()
            .map(|section| {
                let [z0, z1] = section.steady_state();
                let zi = [z0 * scale, z1 * scale];
                scale *= section.dc_gain();
                zi
            })
            .collect()
    }

    /// A single causal pass, starting from `zi` scaled by the first sample.
    fn filter_pass(&self, x: &[f64], zi: &[[f64; 2]]) -> Vec<f64> {
        let x0 = x.first().copied().unwrap_or(0.0);
        let mut state: Vec<[f64; 2]> = zi.iter().map(|z| [z[0] * x0, z[1] * x0]).collect();

        x.iter()
            .map(|&sample| {
                let mut value = sample;
                for (section, z) in self.sections.iter().zip(state.iter_mut()) {
                    let y = section.b[0] * value + z[0];
                    z[0] = section.b[1] * value - section.a[1] * y + z[1];
                    z[1] = section.b[2] * value - section.a[2] * y;
                    value = y;
                }
                value
            })
            .collect()
    }

    ///
    /// Forward-backward filtering with odd reflection at both ends.
    ///
    /// Inputs no longer than the padding cannot be reflected and are returned
    /// unchanged.
    ///
    pub fn filtfilt(&self, x: &[f64]) -> Vec<f64> {
        let pad = self.pad_len();
        if x.len() <= pad {
            return x.to_vec();
        }

        let extended = odd_extension(x, pad);
        let zi = self.initial_conditions();

        let mut y = self.filter_pass(&extended, &zi);
        y.reverse();
        let mut y = self.filter_pass(&y, &zi);
        y.reverse();

        y[pad..pad + x.len()].to_vec()
    }
}

/// Extend `x` by `pad` samples on each side, reflected through the end points.
fn odd_extension(x: &[f64], pad: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * pad);
    extended.extend((1..=pad).rev().map(|i| 2.0 * first - x[i]));
    extended.extend_from_slice(x);
    extended.extend((n - 1 - pad..n - 1).rev().map(|i| 2.0 * last - x[i]));
    extended
}

///
/// Smooth a histogram along its length axis.
///
/// A zero `freq_cutoff` returns the raw counts unchanged.
///
pub fn low_pass(histogram: &Histogram, params: &NrlParams) -> NrlResult<SmoothedHistogram> {
    let wn = match params.normalized_cutoff() {
        Some(wn) => wn,
        None => return Ok(histogram.to_smoothed()),
    };

    let filter = Butterworth::low_pass(params.filter_order, wn)?;
    debug!(
        "Butterworth low-pass: order {}, Wn {}, {} sections",
        filter.order(),
        wn,
        filter.sections().len()
    );

    let counts: Vec<f64> = histogram.counts().iter().map(|&c| c as f64).collect();

    Ok(SmoothedHistogram::new(
        histogram.start(),
        filter.filtfilt(&counts),
    ))
}
