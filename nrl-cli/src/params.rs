use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, arg, value_parser};

use nrl_finder::NrlParams;

/// Analysis parameter flags shared by every subcommand.
pub fn param_args() -> Vec<Arg> {
    vec![
        arg!(--offset <OFFSET>)
            .required(false)
            .value_parser(value_parser!(u32))
            .help("Shortest fragment length to keep [default: 75]"),
        Arg::new("freq-cutoff")
            .long("freq-cutoff")
            .required(false)
            .value_parser(value_parser!(u32))
            .help("Low-pass cutoff; 0 disables smoothing [default: 40]"),
        Arg::new("count-thr")
            .long("count-thr")
            .required(false)
            .value_parser(value_parser!(u32))
            .help("Minimum raw count for an extremum to be reported [default: 10]"),
        arg!(--order <ORDER>)
            .required(false)
            .value_parser(value_parser!(usize))
            .help("Butterworth filter order [default: 6]"),
        arg!(--config <CONFIG>)
            .required(false)
            .help("TOML file with analysis parameters; flags override it"),
    ]
}

///
/// Resolve analysis parameters: command line flags, then the config file, then defaults.
///
pub fn params_from_matches(matches: &ArgMatches) -> Result<NrlParams> {
    let mut params = match matches.get_one::<String>("config") {
        Some(path) => NrlParams::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => NrlParams::default(),
    };

    if let Some(&offset) = matches.get_one::<u32>("offset") {
        params.offset = offset;
    }
    if let Some(&freq_cutoff) = matches.get_one::<u32>("freq-cutoff") {
        params.freq_cutoff = freq_cutoff;
    }
    if let Some(&count_thr) = matches.get_one::<u32>("count-thr") {
        params.count_thr = count_thr;
    }
    if let Some(&order) = matches.get_one::<usize>("order") {
        params.filter_order = order;
    }

    params.validate().context("Invalid analysis parameters")?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use clap::Command;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn parse(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .args(param_args())
            .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
    }

    #[rstest]
    fn test_defaults() {
        let params = params_from_matches(&parse(&[])).unwrap();
        assert_eq!(params, NrlParams::default());
    }

    #[rstest]
    fn test_flags_override_config() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "offset = 100\ncount_thr = 3\nfreq_cutoff = 30").unwrap();
        let config_path = config.path().to_string_lossy().to_string();

        let params =
            params_from_matches(&parse(&["--config", &config_path, "--count-thr", "7"])).unwrap();

        assert_eq!(params.offset, 100);
        assert_eq!(params.freq_cutoff, 30);
        assert_eq!(params.count_thr, 7);
        assert_eq!(params.filter_order, 6);
    }

    #[rstest]
    fn test_invalid_order_rejected() {
        assert!(params_from_matches(&parse(&["--order", "0"])).is_err());
    }

    #[rstest]
    fn test_non_numeric_flag_rejected() {
        let result = Command::new("test")
            .args(param_args())
            .try_get_matches_from(["test", "--offset", "abc"]);
        assert!(result.is_err());
    }
}
