//! Nucleosome repeat length (NRL) detection from paired-end fragments.
//!
//! Fragment lengths are taken from a BED-like interval file, binned into a
//! histogram, smoothed with a zero-phase Butterworth low-pass filter, and
//! scanned for local extrema. The maxima that have enough raw reads behind
//! them are the NRL candidates.
//!
//! - [lengths]: fragment lengths at or above an offset
//! - [histogram]: contiguous per-length counts
//! - [filter]: Butterworth design and forward-backward filtering
//! - [extrema]: plateau-aware local extremum detection
//! - [integrate]: area under the smoothed histogram
//! - [output]: output modes and the [find_nrls] entry point
//! - [plot]: figures, behind the `plot` feature
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use nrl_finder::{NrlParams, OutputMode, SvgRenderer, find_nrls, figure_path_for};
//!
//! let bed = Path::new("sample.bed.gz");
//! let renderer = SvgRenderer::new(figure_path_for(bed));
//!
//! let report = find_nrls(bed, OutputMode::Maxes, &NrlParams::default(), &renderer).unwrap();
//! println!("{}", report.output);
//! ```

pub mod config;
pub mod errors;
pub mod extrema;
pub mod filter;
pub mod histogram;
pub mod integrate;
pub mod lengths;
pub mod output;
pub mod pipeline;
pub mod plot;

// re-exports
pub use config::{HistogramDomain, NrlParams};
pub use errors::{EmptyReason, NrlError, NrlResult};
pub use lengths::FragmentLengthDistribution;
pub use output::{NrlOutput, NrlReport, OutputMode, find_nrls, select_output, select_outputs};
pub use pipeline::{Analysis, NrlAnalysis, analyze, analyze_lengths};
#[cfg(feature = "plot")]
pub use plot::SvgRenderer;
pub use plot::{NrlPlot, PlotRenderer, figure_path_for};
