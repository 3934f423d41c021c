//! The `copy` command: raw block copies into a disk image

use crate::args::parse_size;
use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};
use floppyforge_disk::{copy_block, CopyRequest};
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = "The offset and length fields can be suffixed with 'd' or 'h' to \
represent decimal or hex numbers. The default is decimal if not specified.\n\n\
The default value for the offset fields is 0.\n\
If no length is given the whole source file is copied.";

pub fn command() -> Command {
    Command::new("copy")
        .about("Copies a file into a disk image at a particular offset")
        .arg(
            Arg::new("src")
                .long("src")
                .short('s')
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Source file to copy"),
        )
        .arg(
            Arg::new("dest")
                .long("dest")
                .short('d')
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Destination file"),
        )
        .arg(
            Arg::new("soff")
                .long("soff")
                .value_parser(value_parser!(String))
                .help("Source offset from which to start copying"),
        )
        .arg(
            Arg::new("slen")
                .long("slen")
                .value_parser(value_parser!(String))
                .help("Amount of data to copy in bytes"),
        )
        .arg(
            Arg::new("doff")
                .long("doff")
                .value_parser(value_parser!(String))
                .help("Destination offset to start writing"),
        )
        .after_help(AFTER_HELP)
}

pub fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let source = matches.get_one::<PathBuf>("src").expect("src is required");
    let dest = matches.get_one::<PathBuf>("dest").expect("dest is required");

    let request = CopyRequest {
        source: source.clone(),
        dest: dest.clone(),
        source_offset: parse_size_or(matches, "soff", 0)?,
        max_length: matches
            .get_one::<String>("slen")
            .map(|length| parse_size(length))
            .transpose()?,
        dest_offset: parse_size_or(matches, "doff", 0)?,
    };

    let bytes_copied = copy_block(&request)?;

    println!("Wrote {bytes_copied} bytes to '{}'.", dest.display());
    Ok(ExitCode::SUCCESS)
}

fn parse_size_or(matches: &ArgMatches, name: &str, default: u64) -> Result<u64> {
    match matches.get_one::<String>(name) {
        Some(value) => parse_size(value),
        None => Ok(default),
    }
}
