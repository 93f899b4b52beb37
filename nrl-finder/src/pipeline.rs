//! The NRL pipeline: lengths -> histogram -> low-pass -> {extrema, AUC}.

use log::{debug, info, warn};
use serde::Serialize;

use nrl_core::models::Region;

use crate::config::NrlParams;
use crate::errors::{EmptyReason, NrlResult};
use crate::extrema::{Extremum, detect_extrema};
use crate::filter::low_pass;
use crate::histogram::{Histogram, SmoothedHistogram};
use crate::integrate::area_under_curve;
use crate::lengths::{FragmentLengths, extract_lengths};

/// Every quantity computed for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NrlAnalysis {
    pub histogram: Histogram,
    pub smoothed: SmoothedHistogram,
    /// Accepted maxima, ordered by length. These are the NRL candidates.
    pub maxes: Vec<Extremum>,
    /// Accepted minima, ordered by length.
    pub mins: Vec<Extremum>,
    pub auc: f64,
}

impl NrlAnalysis {
    /// Read lengths of the accepted maxima.
    pub fn max_lengths(&self) -> Vec<u32> {
        self.maxes.iter().map(|e| e.length).collect()
    }

    /// Read lengths of the accepted minima.
    pub fn min_lengths(&self) -> Vec<u32> {
        self.mins.iter().map(|e| e.length).collect()
    }
}

/// Outcome of the pipeline: either a full analysis or the reason there is nothing to analyze.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Complete(NrlAnalysis),
    Empty(EmptyReason),
}

impl Analysis {
    pub fn complete(&self) -> Option<&NrlAnalysis> {
        match self {
            Analysis::Complete(analysis) => Some(analysis),
            Analysis::Empty(_) => None,
        }
    }
}

///
/// Run the pipeline over a sequence of intervals.
///
/// Parameters are validated before anything is computed.
///
pub fn analyze<'a, I>(intervals: I, params: &NrlParams) -> NrlResult<Analysis>
where
    I: IntoIterator<Item = &'a Region>,
{
    params.validate()?;
    finish(extract_lengths(intervals, params.offset), params)
}

///
/// Run the pipeline over raw fragment lengths.
///
pub fn analyze_lengths<I>(lengths: I, params: &NrlParams) -> NrlResult<Analysis>
where
    I: IntoIterator<Item = u32>,
{
    params.validate()?;
    finish(FragmentLengths::from_lengths(lengths, params.offset), params)
}

fn finish(
    lengths: Result<FragmentLengths, EmptyReason>,
    params: &NrlParams,
) -> NrlResult<Analysis> {
    match lengths {
        Ok(lengths) => Ok(Analysis::Complete(run_stages(&lengths, params)?)),
        Err(reason) => {
            warn!("Nothing to analyze: {}", reason);
            Ok(Analysis::Empty(reason))
        }
    }
}

fn run_stages(lengths: &FragmentLengths, params: &NrlParams) -> NrlResult<NrlAnalysis> {
    info!(
        "Analyzing {} fragments between {} and {} bp",
        lengths.len(),
        lengths.min(),
        lengths.max()
    );

    let histogram = Histogram::from_lengths(lengths, params.domain);
    debug!(
        "Histogram spans {}..={} ({} bins)",
        histogram.start(),
        histogram.end(),
        histogram.len()
    );

    let smoothed = low_pass(&histogram, params)?;

    let extrema = detect_extrema(
        &smoothed,
        &histogram,
        params.count_thr,
        params.boundary_extrema,
    );
    if extrema.is_empty() {
        warn!(
            "No extrema with at least {} reads; try a lower count threshold",
            params.count_thr
        );
    }

    let auc = area_under_curve(&smoothed);

    info!(
        "Found {} maxima, {} minima, AUC {:.2}",
        extrema.maxes.len(),
        extrema.mins.len(),
        auc
    );

    Ok(NrlAnalysis {
        histogram,
        smoothed,
        maxes: extrema.maxes,
        mins: extrema.mins,
        auc,
    })
}
