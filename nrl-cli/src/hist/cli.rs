use clap::{Command, arg};

use crate::params::param_args;

pub const HIST_CMD: &str = "hist";

pub fn create_hist_cli() -> Command {
    Command::new(HIST_CMD)
        .about("Write the raw and smoothed fragment length histogram as a table.")
        .arg(
            arg!(--bed <BED>)
                .required(true)
                .help("Path to input BED file (may be gzipped)"),
        )
        .args(param_args())
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output TSV path (default: stdout)"),
        )
}
