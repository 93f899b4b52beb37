use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::{error, info};

use nrl_core::models::RegionSet;
use nrl_finder::output::plot_title;
use nrl_finder::{
    FragmentLengthDistribution, NrlReport, OutputMode, SvgRenderer, figure_path_for,
    select_outputs,
};

use crate::params::params_from_matches;

pub fn run_find(matches: &ArgMatches) -> Result<()> {
    let bed = matches.get_one::<String>("bed").context("--bed is required")?;
    let bed = Path::new(bed);

    let modes = matches
        .get_many::<String>("mode")
        .context("--mode has a default")?
        .map(|m| m.parse::<OutputMode>())
        .collect::<Result<Vec<_>, _>>()?;

    let params = params_from_matches(matches)?;
    let json = matches.get_flag("json");

    let figure: PathBuf = match matches.get_one::<String>("figure") {
        Some(path) => PathBuf::from(path),
        None => figure_path_for(bed),
    };

    let regions = RegionSet::try_from(bed)
        .with_context(|| format!("Failed to load BED file: {}", bed.display()))?;
    info!("Loaded {} intervals from {}", regions.len(), bed.display());

    let analysis = regions.nrl_analysis(&params)?;
    let renderer = SvgRenderer::new(&figure);
    let results = select_outputs(&analysis, &modes, &plot_title(bed), &renderer);

    let mut failed = 0;
    let mut reports = Vec::new();
    for (mode, result) in results {
        match result {
            Ok(report) => {
                if mode == OutputMode::Figure && !report.is_empty() {
                    info!("Figure written to {}", figure.display());
                }
                reports.push((mode, report));
            }
            Err(e) => {
                error!("Could not produce {}: {}", mode, e);
                failed += 1;
            }
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &reports)?;
    } else {
        write_text(&mut out, &reports, modes.len() > 1)?;
    }

    if failed > 0 {
        return Err(anyhow!("{} of {} outputs failed", failed, modes.len()));
    }
    Ok(())
}

///
/// Plain text reports: one line per report, prefixed with the mode when more
/// than one was requested. Empty reports go to stderr instead.
///
fn write_text<W: Write>(
    out: &mut W,
    reports: &[(OutputMode, NrlReport)],
    labelled: bool,
) -> Result<()> {
    for (mode, report) in reports {
        if let Some(reason) = report.empty {
            eprintln!("No {} to report: {}", mode, reason);
            continue;
        }
        if *mode == OutputMode::Figure {
            continue;
        }
        if labelled {
            writeln!(out, "{}\t{}", mode, report.output)?;
        } else {
            writeln!(out, "{}", report.output)?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, reports: &[(OutputMode, NrlReport)]) -> Result<()> {
    let json = match reports {
        [(_, report)] => serde_json::to_string_pretty(report),
        _ => {
            let all: Vec<&NrlReport> = reports.iter().map(|(_, report)| report).collect();
            serde_json::to_string_pretty(&all)
        }
    }
    .context("Failed to serialize output to JSON")?;

    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use nrl_finder::{EmptyReason, NrlOutput};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::find::cli::create_find_cli;

    fn report(output: NrlOutput, empty: Option<EmptyReason>) -> NrlReport {
        NrlReport { output, empty }
    }

    #[rstest]
    fn test_write_text_single() {
        let reports = vec![(OutputMode::Maxes, report(NrlOutput::Maxes(vec![147, 337]), None))];
        let mut out = Vec::new();
        write_text(&mut out, &reports, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "147\t337\n");
    }

    #[rstest]
    fn test_write_text_labelled_skips_empty() {
        let reports = vec![
            (OutputMode::Maxes, report(NrlOutput::Maxes(vec![150]), None)),
            (
                OutputMode::Mins,
                report(NrlOutput::Mins(vec![]), Some(EmptyReason::NoExtrema)),
            ),
            (OutputMode::Auc, report(NrlOutput::Auc(24.5), None)),
        ];
        let mut out = Vec::new();
        write_text(&mut out, &reports, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "maxes\t150\nauc\t24.5\n");
    }

    #[rstest]
    fn test_write_json_single() {
        let reports = vec![(
            OutputMode::Auc,
            report(NrlOutput::Auc(0.0), Some(EmptyReason::NoIntervals)),
        )];
        let mut out = Vec::new();
        write_json(&mut out, &reports).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"mode": "auc", "value": 0.0, "empty": "no_intervals"})
        );
    }

    #[rstest]
    fn test_run_find_on_bed() {
        let dir = tempfile::tempdir().unwrap();
        let bed = dir.path().join("sample.bed");
        let mut lines = String::new();
        for (i, length) in [100u32, 150, 150, 150, 200].iter().enumerate() {
            lines.push_str(&format!("chr1\t{}\t{}\n", i * 1000, i as u32 * 1000 + length));
        }
        std::fs::write(&bed, lines).unwrap();
        let figure = dir.path().join("sample.svg");

        let matches = create_find_cli()
            .try_get_matches_from([
                "find",
                "--bed",
                bed.to_str().unwrap(),
                "--mode",
                "maxes",
                "--mode",
                "figure",
                "--figure",
                figure.to_str().unwrap(),
                "--freq-cutoff",
                "0",
                "--count-thr",
                "2",
            ])
            .unwrap();

        run_find(&matches).unwrap();
        assert!(figure.exists());
    }

    #[rstest]
    fn test_run_find_missing_bed() {
        let matches = create_find_cli()
            .try_get_matches_from(["find", "--bed", "/no/such/file.bed"])
            .unwrap();
        assert!(run_find(&matches).is_err());
    }
}
