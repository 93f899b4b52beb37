mod find;
mod hist;
mod params;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "nrl-cli";
    pub const BIN_NAME: &str = "nrl";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Find nucleosome repeat lengths from paired-end fragment length histograms.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging; repeat for debug output"),
        )
        .subcommand(find::cli::create_find_cli())
        .subcommand(hist::cli::create_hist_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        //
        // FIND
        //
        Some((find::cli::FIND_CMD, matches)) => {
            find::handlers::run_find(matches)?;
        }

        //
        // HIST
        //
        Some((hist::cli::HIST_CMD, matches)) => {
            hist::handlers::run_hist(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
