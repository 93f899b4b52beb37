//! Local extremum detection on smoothed histograms.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::histogram::{Histogram, SmoothedHistogram};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    Maximum,
    Minimum,
}

impl Display for ExtremumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtremumKind::Maximum => write!(f, "maximum"),
            ExtremumKind::Minimum => write!(f, "minimum"),
        }
    }
}

/// A local extremum of the smoothed histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremum {
    /// Fragment length at the extremum.
    pub length: u32,
    pub kind: ExtremumKind,
    /// Smoothed amplitude at `length`.
    pub amplitude: f64,
    /// Raw histogram count at `length`.
    pub count: u64,
}

/// Accepted extrema, each list ordered by length.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Extrema {
    pub maxes: Vec<Extremum>,
    pub mins: Vec<Extremum>,
}

impl Extrema {
    pub fn is_empty(&self) -> bool {
        self.maxes.is_empty() && self.mins.is_empty()
    }
}

///
/// Positions of local extrema in `values`.
///
/// Runs of equal values are treated as one point located at the run's first
/// position. A run is a maximum when the runs on both sides are strictly lower
/// and a minimum when both are strictly higher. Past either end of the sequence
/// counts as lower than anything, so an end run can be a maximum but never a
/// minimum; a single run covering everything is neither.
///
/// # Arguments
/// - values: the sequence to scan
/// - boundary_extrema: when false, maxima touching either end are dropped
pub fn find_extrema(values: &[f64], boundary_extrema: bool) -> Vec<(usize, ExtremumKind)> {
    // (first index, last index, value) of each run of equal values
    let mut runs: Vec<(usize, usize, f64)> = Vec::new();
    for (idx, &value) in values.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.2 == value => run.1 = idx,
            _ => runs.push((idx, idx, value)),
        }
    }

    if runs.len() < 2 {
        return Vec::new();
    }

    let last_idx = values.len() - 1;
    let mut found = Vec::new();

    for (i, &(first, last, value)) in runs.iter().enumerate() {
        let left = i.checked_sub(1).map(|j| runs[j].2);
        let right = runs.get(i + 1).map(|run| run.2);

        let is_max = left.is_none_or(|l| l < value) && right.is_none_or(|r| r < value);
        let is_min = left.is_some_and(|l| l > value) && right.is_some_and(|r| r > value);

        if is_max {
            let touches_boundary = first == 0 || last == last_idx;
            if boundary_extrema || !touches_boundary {
                found.push((first, ExtremumKind::Maximum));
            }
        } else if is_min {
            found.push((first, ExtremumKind::Minimum));
        }
    }

    found
}

///
/// Detect extrema of the smoothed histogram and keep those with enough raw support.
///
/// An extremum at length `L` is accepted when the *raw* histogram count at `L`
/// is at least `count_thr`; `count_thr == 0` accepts every extremum.
///
pub fn detect_extrema(
    smoothed: &SmoothedHistogram,
    histogram: &Histogram,
    count_thr: u32,
    boundary_extrema: bool,
) -> Extrema {
    let mut extrema = Extrema::default();

    for (idx, kind) in find_extrema(smoothed.amplitudes(), boundary_extrema) {
        let length = smoothed.start() + idx as u32;
        let count = histogram.count_at(length).unwrap_or(0);

        if count < count_thr as u64 {
            continue;
        }

        let extremum = Extremum {
            length,
            kind,
            amplitude: smoothed.amplitudes()[idx],
            count,
        };

        match kind {
            ExtremumKind::Maximum => extrema.maxes.push(extremum),
            ExtremumKind::Minimum => extrema.mins.push(extremum),
        }
    }

    extrema
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::HistogramDomain;
    use crate::lengths::FragmentLengths;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use ExtremumKind::{Maximum, Minimum};

    #[rstest]
    #[case(vec![0.0, 2.0, 1.0, 3.0, 0.0], vec![(1, Maximum), (2, Minimum), (3, Maximum)])]
    #[case(vec![1.0, 3.0, 3.0, 3.0, 1.0], vec![(1, Maximum)])]
    #[case(vec![4.0, 1.0, 1.0, 4.0], vec![(0, Maximum), (1, Minimum), (3, Maximum)])]
    #[case(vec![1.0, 2.0, 2.0, 3.0], vec![(3, Maximum)])]
    #[case(vec![3.0, 2.0, 1.0], vec![(0, Maximum)])]
    #[case(vec![2.0, 2.0, 2.0], vec![])]
    #[case(vec![5.0], vec![])]
    #[case(vec![], vec![])]
    fn test_find_extrema(#[case] values: Vec<f64>, #[case] expected: Vec<(usize, ExtremumKind)>) {
        assert_eq!(find_extrema(&values, true), expected);
    }

    #[rstest]
    fn test_boundary_maxima_excluded() {
        let values = vec![4.0, 1.0, 2.0, 1.0, 4.0, 4.0];
        assert_eq!(
            find_extrema(&values, false),
            vec![(1, Minimum), (2, Maximum), (3, Minimum)]
        );
    }

    #[rstest]
    fn test_extrema_alternate() {
        let values: Vec<f64> = (0..400).map(|i| (i as f64 / 15.0).sin()).collect();
        let found = find_extrema(&values, false);

        assert!(found.len() > 4);
        for pair in found.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 != pair[1].1);
        }
    }

    #[fixture]
    fn ladder() -> Histogram {
        // peak at 150 (20 reads), shoulders at 100 and 200 (3 reads each)
        let mut lengths = vec![100; 3];
        lengths.extend(vec![150; 20]);
        lengths.extend(vec![200; 3]);
        let lengths = FragmentLengths::from_lengths(lengths, 90).unwrap();
        Histogram::from_lengths(&lengths, HistogramDomain::Offset)
    }

    #[rstest]
    fn test_threshold_uses_raw_counts(ladder: Histogram) {
        let smoothed = ladder.to_smoothed();
        let extrema = detect_extrema(&smoothed, &ladder, 5, true);

        let maxes: Vec<u32> = extrema.maxes.iter().map(|e| e.length).collect();
        assert_eq!(maxes, vec![150]);
        assert_eq!(extrema.maxes[0].count, 20);
        assert_eq!(extrema.maxes[0].amplitude, 20.0);
        assert!(extrema.mins.is_empty());
    }

    #[rstest]
    fn test_zero_threshold_accepts_all(ladder: Histogram) {
        let smoothed = ladder.to_smoothed();
        let extrema = detect_extrema(&smoothed, &ladder, 0, true);

        let maxes: Vec<u32> = extrema.maxes.iter().map(|e| e.length).collect();
        let mins: Vec<u32> = extrema.mins.iter().map(|e| e.length).collect();
        assert_eq!(maxes, vec![100, 150, 200]);
        assert_eq!(mins, vec![101, 151]);
        assert!(extrema.mins.iter().all(|e| e.kind == Minimum && e.count == 0));
    }

    #[rstest]
    fn test_threshold_is_inclusive(ladder: Histogram) {
        let smoothed = ladder.to_smoothed();
        let extrema = detect_extrema(&smoothed, &ladder, 3, true);

        let maxes: Vec<u32> = extrema.maxes.iter().map(|e| e.length).collect();
        assert_eq!(maxes, vec![100, 150, 200]);
    }

    #[rstest]
    fn test_nothing_survives(ladder: Histogram) {
        let smoothed = ladder.to_smoothed();
        let extrema = detect_extrema(&smoothed, &ladder, 21, true);
        assert!(extrema.is_empty());
    }
}
