//! Figures of the fragment length histogram and the detected NRLs.

use std::path::{Path, PathBuf};

use nrl_core::utils::strip_bed_extensions;

use crate::errors::{NrlError, NrlResult};
use crate::extrema::Extremum;
use crate::histogram::{Histogram, SmoothedHistogram};
use crate::pipeline::NrlAnalysis;

/// Everything a renderer draws for one sample.
pub struct NrlPlot<'a> {
    pub title: String,
    pub histogram: &'a Histogram,
    pub smoothed: &'a SmoothedHistogram,
    pub maxes: &'a [Extremum],
    pub mins: &'a [Extremum],
    pub auc: f64,
}

impl<'a> NrlPlot<'a> {
    pub fn new(title: impl Into<String>, analysis: &'a NrlAnalysis) -> Self {
        NrlPlot {
            title: title.into(),
            histogram: &analysis.histogram,
            smoothed: &analysis.smoothed,
            maxes: &analysis.maxes,
            mins: &analysis.mins,
            auc: analysis.auc,
        }
    }

    ///
    /// Upper end of the length axis: 10% past the last length whose smoothed
    /// amplitude is above one read, or the histogram's end if there is none.
    ///
    pub fn x_max(&self) -> u32 {
        let last = self
            .smoothed
            .iter()
            .filter(|&(_, amp)| amp > 1.0)
            .map(|(length, _)| length)
            .last()
            .unwrap_or(self.histogram.end());

        ((last as f64 * 1.1).round() as u32).max(1)
    }

    ///
    /// Upper end of the (log scaled) count axis, `max^1.1`.
    ///
    pub fn y_max(&self) -> f64 {
        let raw_max = self.histogram.counts().iter().copied().max().unwrap_or(0) as f64;
        let smoothed_max = self
            .smoothed
            .amplitudes()
            .iter()
            .copied()
            .fold(0.0, f64::max);
        let top = raw_max.max(smoothed_max);

        if top > 1.0 { top.powf(1.1) } else { 10.0 }
    }
}

/// Draws an [NrlPlot] somewhere, as a side effect.
pub trait PlotRenderer {
    fn render(&self, plot: &NrlPlot<'_>) -> NrlResult<()>;
}

///
/// Default figure location for an interval file: its base name, with the
/// bed extension swapped for `.svg`, in the current directory.
///
pub fn figure_path_for(bed: &Path) -> PathBuf {
    let stem = strip_bed_extensions(bed).unwrap_or_else(|| "nrl".to_string());
    PathBuf::from(format!("{}.svg", stem))
}

fn render_failure<E: std::fmt::Display>(e: E) -> NrlError {
    NrlError::RenderFailure(e.to_string())
}

/// Writes the figure as an SVG file.
#[cfg(feature = "plot")]
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    pub path: PathBuf,
    pub size: (u32, u32),
}

#[cfg(feature = "plot")]
impl SvgRenderer {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        SvgRenderer {
            path: path.as_ref().to_path_buf(),
            size: (1000, 700),
        }
    }
}

#[cfg(feature = "plot")]
impl PlotRenderer for SvgRenderer {
    fn render(&self, plot: &NrlPlot<'_>) -> NrlResult<()> {
        use plotters::prelude::*;

        const AUC_GREY: RGBColor = RGBColor(0xa8, 0xa8, 0xa8);
        const SMOOTHED_RED: RGBColor = RGBColor(0xd6, 0x27, 0x28);
        const MAX_BLUE: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
        const MIN_PURPLE: RGBColor = RGBColor(0x8f, 0x2e, 0xff);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(render_failure)?;
            }
        }

        // log axis starts at one read
        let floor = |v: f64| v.max(1.0);

        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_failure)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&plot.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0u32..plot.x_max(), (1.0f64..plot.y_max()).log_scale())
            .map_err(render_failure)?;

        chart
            .configure_mesh()
            .x_desc("Fragment length")
            .y_desc("Counts")
            .draw()
            .map_err(render_failure)?;

        chart
            .draw_series(LineSeries::new(
                plot.histogram.iter().map(|(l, c)| (l, floor(c as f64))),
                &BLACK,
            ))
            .map_err(render_failure)?
            .label("Raw counts")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

        chart
            .draw_series(LineSeries::new(
                plot.smoothed.iter().map(|(l, a)| (l, floor(a))),
                &SMOOTHED_RED,
            ))
            .map_err(render_failure)?
            .label("Filtered counts")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SMOOTHED_RED));

        chart
            .draw_series(
                plot.maxes
                    .iter()
                    .map(|e| Circle::new((e.length, floor(e.amplitude)), 4, MAX_BLUE.filled())),
            )
            .map_err(render_failure)?
            .label("Maxes (NRLs)")
            .legend(|(x, y)| Circle::new((x + 10, y), 4, MAX_BLUE.filled()));

        chart
            .draw_series(
                plot.mins
                    .iter()
                    .map(|e| Circle::new((e.length, floor(e.amplitude)), 4, MIN_PURPLE.filled())),
            )
            .map_err(render_failure)?
            .label("Mins")
            .legend(|(x, y)| Circle::new((x + 10, y), 4, MIN_PURPLE.filled()));

        chart
            .draw_series(AreaSeries::new(
                plot.smoothed.iter().map(|(l, a)| (l, floor(a))),
                1.0,
                AUC_GREY.mix(0.5),
            ))
            .map_err(render_failure)?
            .label(format!("Area under the curve ({:.1})", plot.auc))
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], AUC_GREY.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_failure)?;

        root.present().map_err(render_failure)?;
        Ok(())
    }
}
