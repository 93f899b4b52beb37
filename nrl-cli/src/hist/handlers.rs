use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use nrl_core::models::RegionSet;
use nrl_finder::{Analysis, FragmentLengthDistribution};

use crate::params::params_from_matches;

pub fn run_hist(matches: &ArgMatches) -> Result<()> {
    let bed = matches.get_one::<String>("bed").context("--bed is required")?;
    let output_path = matches.get_one::<String>("output");
    let params = params_from_matches(matches)?;

    let regions = RegionSet::try_from(Path::new(bed))
        .with_context(|| format!("Failed to load BED file: {}", bed))?;
    let analysis = regions.nrl_analysis(&params)?;

    match output_path {
        Some(p) => {
            let file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            let mut writer = BufWriter::new(file);
            write_histogram(&mut writer, &analysis)?;
            writer.flush()?;
            eprintln!("Output written to {}", p);
        }
        None => {
            let stdout = io::stdout();
            write_histogram(&mut stdout.lock(), &analysis)?;
        }
    }

    Ok(())
}

///
/// `length\tcount\tsmoothed`, one row per histogram position. An empty
/// analysis writes only the header.
///
fn write_histogram<W: Write>(out: &mut W, analysis: &Analysis) -> Result<()> {
    writeln!(out, "length\tcount\tsmoothed")?;

    let analysis = match analysis {
        Analysis::Complete(analysis) => analysis,
        Analysis::Empty(reason) => {
            eprintln!("Empty histogram: {}", reason);
            return Ok(());
        }
    };

    let rows = analysis.histogram.iter().zip(analysis.smoothed.iter());
    for ((length, count), (_, smoothed)) in rows {
        writeln!(out, "{}\t{}\t{:.4}", length, count, smoothed)?;
    }
    Ok(())
}
