#[macro_use]
extern crate clap;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, Command};
use log::debug;

use hocon_json::HoconConfig;

fn main() {
    // https://nick.groenen.me/posts/rust-error-handling/#1-simplified-result-type
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), anyhow::Error> {
    stderrlog::new()
        .verbosity(2)
        .quiet(false)
        .init()
        .context("Unable to set up logging")?;

    let matches = cli().get_matches();
    let file = matches
        .get_one::<PathBuf>("hocon")
        .context("--hocon is required")?;

    command_convert(file).with_context(|| format!("Unable to convert '{}'", file.display()))
}

fn cli() -> Command {
    command!()
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("hocon")
                .help("HOCON file to convert.")
                .long("hocon")
                .value_name("FILE")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
}

fn command_convert(file: &Path) -> Result<()> {
    let config = HoconConfig::from_file(file)?;
    debug!("Resolved {} top-level key(s)", config.get_keys("")?.len());
    println!("{}", config.to_json_string()?);
    Ok(())
}
