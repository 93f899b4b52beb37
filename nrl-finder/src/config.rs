use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{NrlError, NrlResult};

/// Where the histogram's length axis begins.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HistogramDomain {
    /// Start at the configured offset, so every run over the same offset shares an axis.
    #[default]
    Offset,
    /// Start at the shortest retained fragment.
    MinLength,
}

///
/// Parameters of one NRL analysis.
///
/// Every numeric stage takes these explicitly; the defaults below are only
/// used when a caller (or a config file) leaves a field out.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NrlParams {
    /// Shortest fragment length kept in the analysis.
    pub offset: u32,
    /// Low-pass cutoff parameter. Zero disables smoothing.
    pub freq_cutoff: u32,
    /// Minimum raw histogram count for an extremum to be reported.
    pub count_thr: u32,
    /// Butterworth filter order.
    pub filter_order: usize,
    /// `freq_cutoff / cutoff_scale` is the cutoff as a fraction of the Nyquist frequency.
    pub cutoff_scale: f64,
    pub domain: HistogramDomain,
    /// Whether the first and last histogram positions may be reported as maxima.
    pub boundary_extrema: bool,
}

impl Default for NrlParams {
    fn default() -> Self {
        NrlParams {
            offset: 75,
            freq_cutoff: 40,
            count_thr: 10,
            filter_order: 6,
            cutoff_scale: 1000.0,
            domain: HistogramDomain::Offset,
            boundary_extrema: true,
        }
    }
}

impl TryFrom<&Path> for NrlParams {
    type Error = NrlError;

    ///
    /// Read parameters from a toml file. Missing keys take their default value.
    ///
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let params: NrlParams = toml::from_str(&toml_str)?;
        params.validate()?;
        Ok(params)
    }
}

impl NrlParams {
    ///
    /// Normalized Butterworth cutoff (fraction of Nyquist), or `None` when
    /// `freq_cutoff` is zero and the filter is the identity.
    ///
    pub fn normalized_cutoff(&self) -> Option<f64> {
        match self.freq_cutoff {
            0 => None,
            f => Some(f as f64 / self.cutoff_scale),
        }
    }

    ///
    /// Reject parameter combinations the filter cannot be built from.
    ///
    pub fn validate(&self) -> NrlResult<()> {
        if self.filter_order == 0 {
            return Err(NrlError::InvalidInput(
                "filter_order must be at least 1".to_string(),
            ));
        }

        if !self.cutoff_scale.is_finite() || self.cutoff_scale <= 0.0 {
            return Err(NrlError::InvalidInput(format!(
                "cutoff_scale must be a positive number, got {}",
                self.cutoff_scale
            )));
        }

        if let Some(wn) = self.normalized_cutoff() {
            if wn >= 1.0 {
                return Err(NrlError::InvalidInput(format!(
                    "freq_cutoff {} is at or above the Nyquist frequency (cutoff_scale {})",
                    self.freq_cutoff, self.cutoff_scale
                )));
            }
        }

        Ok(())
    }
}
