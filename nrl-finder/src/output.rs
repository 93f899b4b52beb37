//! Selecting what an invocation reports, and the file-level entry point.

use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use nrl_core::models::RegionSet;

use crate::config::NrlParams;
use crate::errors::{EmptyReason, NrlError, NrlResult};
use crate::lengths::FragmentLengthDistribution;
use crate::pipeline::Analysis;
use crate::plot::{NrlPlot, PlotRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Lengths of the accepted maxima, i.e. the NRLs.
    Maxes,
    /// Lengths of the accepted minima.
    Mins,
    /// Area under the smoothed histogram.
    Auc,
    /// Render the figure and return nothing.
    Figure,
}

impl OutputMode {
    pub const ALL: [OutputMode; 4] = [
        OutputMode::Maxes,
        OutputMode::Mins,
        OutputMode::Auc,
        OutputMode::Figure,
    ];
}

impl FromStr for OutputMode {
    type Err = NrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maxes" => Ok(OutputMode::Maxes),
            "mins" => Ok(OutputMode::Mins),
            "auc" => Ok(OutputMode::Auc),
            "figure" => Ok(OutputMode::Figure),
            other => Err(NrlError::InvalidInput(format!(
                "Unknown output mode '{}' (expected maxes, mins, auc or figure)",
                other
            ))),
        }
    }
}

impl Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputMode::Maxes => "maxes",
            OutputMode::Mins => "mins",
            OutputMode::Auc => "auc",
            OutputMode::Figure => "figure",
        };
        write!(f, "{}", name)
    }
}

/// The value reported for one output mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum NrlOutput {
    Maxes(Vec<u32>),
    Mins(Vec<u32>),
    Auc(f64),
    Figure,
}

impl Display for NrlOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |lengths: &[u32]| {
            lengths
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join("\t")
        };
        match self {
            NrlOutput::Maxes(lengths) | NrlOutput::Mins(lengths) => write!(f, "{}", join(lengths)),
            NrlOutput::Auc(auc) => write!(f, "{}", auc),
            NrlOutput::Figure => Ok(()),
        }
    }
}

///
/// One reported output, together with the reason it is empty when there was
/// nothing to report.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NrlReport {
    #[serde(flatten)]
    pub output: NrlOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyReason>,
}

impl NrlReport {
    pub fn is_empty(&self) -> bool {
        self.empty.is_some()
    }
}

///
/// Pick the result for `mode` out of a finished analysis.
///
/// The figure is only rendered when there is an analysis to draw; an empty
/// input yields an empty report for every mode.
///
pub fn select_output(
    analysis: &Analysis,
    mode: OutputMode,
    title: &str,
    renderer: &dyn PlotRenderer,
) -> NrlResult<NrlReport> {
    let analysis = match analysis {
        Analysis::Complete(analysis) => analysis,
        Analysis::Empty(reason) => {
            let output = match mode {
                OutputMode::Maxes => NrlOutput::Maxes(Vec::new()),
                OutputMode::Mins => NrlOutput::Mins(Vec::new()),
                OutputMode::Auc => NrlOutput::Auc(0.0),
                OutputMode::Figure => NrlOutput::Figure,
            };
            return Ok(NrlReport {
                output,
                empty: Some(*reason),
            });
        }
    };

    let no_extrema = |lengths: &Vec<u32>| lengths.is_empty().then_some(EmptyReason::NoExtrema);

    let report = match mode {
        OutputMode::Maxes => {
            let maxes = analysis.max_lengths();
            NrlReport {
                empty: no_extrema(&maxes),
                output: NrlOutput::Maxes(maxes),
            }
        }
        OutputMode::Mins => {
            let mins = analysis.min_lengths();
            NrlReport {
                empty: no_extrema(&mins),
                output: NrlOutput::Mins(mins),
            }
        }
        OutputMode::Auc => NrlReport {
            output: NrlOutput::Auc(analysis.auc),
            empty: None,
        },
        OutputMode::Figure => {
            renderer.render(&NrlPlot::new(title, analysis))?;
            NrlReport {
                output: NrlOutput::Figure,
                empty: None,
            }
        }
    };

    Ok(report)
}

///
/// Select several outputs from the same analysis. A failure in one mode (a
/// figure that cannot be written, say) does not affect the others.
///
pub fn select_outputs(
    analysis: &Analysis,
    modes: &[OutputMode],
    title: &str,
    renderer: &dyn PlotRenderer,
) -> Vec<(OutputMode, NrlResult<NrlReport>)> {
    modes
        .iter()
        .map(|&mode| (mode, select_output(analysis, mode, title, renderer)))
        .collect()
}

/// Figure title for an interval file.
pub fn plot_title(bed: &Path) -> String {
    format!("NRL Finder: {}", bed.display())
}

///
/// Find nucleosome repeat lengths in an interval file.
///
/// # Arguments
/// - bed: path to a (possibly gzipped) BED-like file of fragments
/// - mode: which result to report
/// - params: analysis parameters
/// - renderer: used only when `mode` is [OutputMode::Figure]
///
/// # Returns
/// The report for `mode`. Missing or malformed files and invalid parameters are
/// errors; an empty file is a report with [NrlReport::empty] set.
///
pub fn find_nrls(
    bed: &Path,
    mode: OutputMode,
    params: &NrlParams,
    renderer: &dyn PlotRenderer,
) -> NrlResult<NrlReport> {
    params.validate()?;

    let regions = RegionSet::try_from(bed)?;
    info!("Loaded {} intervals from {}", regions.len(), bed.display());

    let analysis = regions.nrl_analysis(params)?;
    select_output(&analysis, mode, &plot_title(bed), renderer)
}
