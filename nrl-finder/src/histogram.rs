//! Dense fragment length histograms.

use serde::Serialize;

use crate::config::HistogramDomain;
use crate::lengths::FragmentLengths;

///
/// Count of fragments at every integer length from `start` to `end` inclusive.
/// Lengths with no fragments are present with a zero count.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    start: u32,
    counts: Vec<u64>,
}

///
/// A [Histogram] after low-pass filtering: same length axis, real-valued amplitudes.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedHistogram {
    start: u32,
    amplitudes: Vec<f64>,
}

impl Histogram {
    ///
    /// Bin fragment lengths into a dense histogram.
    ///
    /// # Arguments
    /// - lengths: retained fragment lengths
    /// - domain: whether the axis starts at the offset or at the shortest fragment
    pub fn from_lengths(lengths: &FragmentLengths, domain: HistogramDomain) -> Self {
        let start = match domain {
            HistogramDomain::Offset => lengths.offset(),
            HistogramDomain::MinLength => lengths.min(),
        };
        let size = (lengths.max() - start) as usize + 1;

        let mut counts = vec![0u64; size];
        for &length in lengths.as_slice() {
            counts[(length - start) as usize] += 1;
        }

        Histogram { start, counts }
    }

    /// First length on the axis.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last length on the axis (the longest retained fragment).
    pub fn end(&self) -> u32 {
        self.start + self.counts.len() as u32 - 1
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Raw count at `length`, `None` when the length is off the axis.
    pub fn count_at(&self, length: u32) -> Option<u64> {
        length
            .checked_sub(self.start)
            .and_then(|idx| self.counts.get(idx as usize).copied())
    }

    /// Number of fragments in the histogram.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(idx, &count)| (self.start + idx as u32, count))
    }

    /// Counts as amplitudes, unchanged.
    pub fn to_smoothed(&self) -> SmoothedHistogram {
        SmoothedHistogram::new(self.start, self.counts.iter().map(|&c| c as f64).collect())
    }
}

impl SmoothedHistogram {
    pub fn new(start: u32, amplitudes: Vec<f64>) -> Self {
        SmoothedHistogram { start, amplitudes }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.start + self.amplitudes.len() as u32 - 1
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    pub fn amplitude_at(&self, length: u32) -> Option<f64> {
        length
            .checked_sub(self.start)
            .and_then(|idx| self.amplitudes.get(idx as usize).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(idx, &amp)| (self.start + idx as u32, amp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn lengths() -> FragmentLengths {
        FragmentLengths::from_lengths(vec![100, 102, 102, 105, 60], 90).unwrap()
    }

    #[rstest]
    fn test_offset_domain(lengths: FragmentLengths) {
        let hist = Histogram::from_lengths(&lengths, HistogramDomain::Offset);

        assert_eq!(hist.start(), 90);
        assert_eq!(hist.end(), 105);
        assert_eq!(hist.len(), 16);
        assert_eq!(hist.count_at(90), Some(0));
        assert_eq!(hist.count_at(102), Some(2));
        assert_eq!(hist.count_at(89), None);
        assert_eq!(hist.count_at(106), None);
        assert_eq!(hist.total(), 4);
    }

    #[rstest]
    fn test_min_length_domain(lengths: FragmentLengths) {
        let hist = Histogram::from_lengths(&lengths, HistogramDomain::MinLength);

        assert_eq!(hist.start(), 100);
        assert_eq!(hist.counts(), &[1, 0, 2, 0, 0, 1]);
    }

    #[rstest]
    fn test_axis_is_contiguous(lengths: FragmentLengths) {
        let hist = Histogram::from_lengths(&lengths, HistogramDomain::MinLength);
        let axis: Vec<u32> = hist.iter().map(|(length, _)| length).collect();

        assert_eq!(axis, (100..=105).collect::<Vec<u32>>());
    }

    #[rstest]
    fn test_single_length() {
        let lengths = FragmentLengths::from_lengths(vec![147, 147], 147).unwrap();
        let hist = Histogram::from_lengths(&lengths, HistogramDomain::Offset);

        assert_eq!(hist.counts(), &[2]);
        assert_eq!(hist.to_smoothed().amplitudes(), &[2.0]);
    }
}
