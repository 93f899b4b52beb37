use clap::{Arg, ArgAction, Command, arg};

use crate::params::param_args;

pub const FIND_CMD: &str = "find";

pub fn create_find_cli() -> Command {
    Command::new(FIND_CMD)
        .about("Find nucleosome repeat lengths in a BED file of paired-end fragments.")
        .arg(
            arg!(--bed <BED>)
                .required(true)
                .help("Path to input BED file (may be gzipped)"),
        )
        .arg(
            arg!(--mode <MODE>)
                .required(false)
                .action(ArgAction::Append)
                .value_parser(["maxes", "mins", "auc", "figure"])
                .default_value("maxes")
                .help("What to report; repeat to report several"),
        )
        .args(param_args())
        .arg(
            arg!(--figure <FIGURE>)
                .required(false)
                .help("Where to write the figure (default: <bed name>.svg)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print reports as JSON"),
        )
}
