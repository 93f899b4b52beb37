//! Fragment length extraction.

use nrl_core::models::{Region, RegionSet};

use crate::config::NrlParams;
use crate::errors::{EmptyReason, NrlResult};
use crate::pipeline::{Analysis, analyze};

/// The fragment lengths that survived the offset filter. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentLengths {
    lengths: Vec<u32>,
    offset: u32,
    min: u32,
    max: u32,
}

impl FragmentLengths {
    ///
    /// Keep every length `>= offset`.
    ///
    /// Returns [`EmptyReason::NoIntervals`] when `lengths` is empty and
    /// [`EmptyReason::AllBelowOffset`] when nothing survives the filter.
    ///
    pub fn from_lengths<I>(lengths: I, offset: u32) -> Result<Self, EmptyReason>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut seen_any = false;
        let mut kept: Vec<u32> = Vec::new();

        for length in lengths {
            seen_any = true;
            if length >= offset {
                kept.push(length);
            }
        }

        if !seen_any {
            return Err(EmptyReason::NoIntervals);
        }

        match (kept.iter().min(), kept.iter().max()) {
            (Some(&min), Some(&max)) => Ok(FragmentLengths {
                lengths: kept,
                offset,
                min,
                max,
            }),
            _ => Err(EmptyReason::AllBelowOffset { offset }),
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Shortest retained length.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Longest retained length.
    pub fn max(&self) -> u32 {
        self.max
    }
}

///
/// Compute `end - start` for every interval and keep those `>= offset`.
///
pub fn extract_lengths<'a, I>(intervals: I, offset: u32) -> Result<FragmentLengths, EmptyReason>
where
    I: IntoIterator<Item = &'a Region>,
{
    FragmentLengths::from_lengths(intervals.into_iter().map(Region::width), offset)
}

/// Fragment length analysis for collections of aligned intervals.
pub trait FragmentLengthDistribution {
    /// Fragment lengths `>= offset`, or why there are none.
    fn fragment_lengths(&self, offset: u32) -> Result<FragmentLengths, EmptyReason>;

    /// Run the full NRL pipeline over these intervals.
    fn nrl_analysis(&self, params: &NrlParams) -> NrlResult<Analysis>;
}

impl FragmentLengthDistribution for RegionSet {
    fn fragment_lengths(&self, offset: u32) -> Result<FragmentLengths, EmptyReason> {
        extract_lengths(self, offset)
    }

    fn nrl_analysis(&self, params: &NrlParams) -> NrlResult<Analysis> {
        analyze(self, params)
    }
}

impl FragmentLengthDistribution for [Region] {
    fn fragment_lengths(&self, offset: u32) -> Result<FragmentLengths, EmptyReason> {
        extract_lengths(self, offset)
    }

    fn nrl_analysis(&self, params: &NrlParams) -> NrlResult<Analysis> {
        analyze(self, params)
    }
}
