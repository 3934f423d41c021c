//! The `create` command: blank disk images

use crate::args::parse_size;
use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};
use floppyforge_disk::{create_blank_disk, friendly_size, FLOPPY_SIZE};
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = "The size field can be suffixed with 'd' or 'h' to represent decimal or \
hex numbers. The default is decimal if not specified.\n\n\
For the type parameter you can specify one of the following preset values:\n\n\
    floppy - 3.5 inch 1.44 MB";

pub fn command() -> Command {
    Command::new("create")
        .about("Creates a blank disk image for use in an emulator")
        .arg(
            Arg::new("out")
                .long("out")
                .short('o')
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Path to the destination file"),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .short('s')
                .value_parser(value_parser!(String))
                .conflicts_with("type")
                .help("Size of the disk in bytes"),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .short('t')
                .value_parser(["floppy"])
                .help("Preset disk type"),
        )
        .after_help(AFTER_HELP)
}

pub fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let out = matches.get_one::<PathBuf>("out").expect("out is required");
    let size = match matches.get_one::<String>("size") {
        Some(size) => parse_size(size)?,
        None => FLOPPY_SIZE,
    };

    create_blank_disk(out, size)?;

    println!("Created a {} disk at '{}'.", friendly_size(size), out.display());
    Ok(ExitCode::SUCCESS)
}
