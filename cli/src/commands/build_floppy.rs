//! The `build-floppy` command: one-shot bootable floppy assembly

use crate::args::load_sector_map;
use crate::tree;
use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};
use floppyforge_disk::{create_bootable_floppy, FloppyBuildRequest};
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = "Assumes a source directory with the following format:\n\
    <src-dir>/asm/vX.Y and <src-dir>/os/vX.Y\n\n\
If --sector-map is given it names a JSON file with the five named sections, \
each '{\"startSector\": n, \"sectorCount\": n}'.";

pub fn command() -> Command {
    Command::new("build-floppy")
        .about("Creates a virtual floppy disk loaded with the OS and assembler")
        .arg(
            Arg::new("dest-vfd")
                .long("dest-vfd")
                .short('d')
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Destination floppy disk image"),
        )
        .arg(
            Arg::new("src-dir")
                .long("src-dir")
                .short('s')
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Source directory containing 'asm' and 'os' subdirectories"),
        )
        .arg(
            Arg::new("src-file")
                .long("src-file")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Source file to compile"),
        )
        .arg(
            Arg::new("asm-version")
                .long("asm-version")
                .value_parser(value_parser!(String))
                .required(true)
                .help("Assembler version (in the form 'vX.Y')"),
        )
        .arg(
            Arg::new("os-version")
                .long("os-version")
                .value_parser(value_parser!(String))
                .required(true)
                .help("OS version to load (in the form 'vX.Y')"),
        )
        .arg(
            Arg::new("sector-map")
                .long("sector-map")
                .value_parser(value_parser!(PathBuf))
                .help("JSON file of the sector map for the floppy disk"),
        )
        .after_help(AFTER_HELP)
}

pub fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let image = matches
        .get_one::<PathBuf>("dest-vfd")
        .expect("dest-vfd is required");
    let src_dir = matches
        .get_one::<PathBuf>("src-dir")
        .expect("src-dir is required");
    let source_file = matches
        .get_one::<PathBuf>("src-file")
        .expect("src-file is required");
    let asm_version = matches
        .get_one::<String>("asm-version")
        .expect("asm-version is required");
    let os_version = matches
        .get_one::<String>("os-version")
        .expect("os-version is required");

    let paths = tree::resolve_build_paths(src_dir, asm_version, os_version)?;
    let map = load_sector_map(matches.get_one::<PathBuf>("sector-map").map(PathBuf::as_path))?;

    let request = FloppyBuildRequest {
        image: image.clone(),
        boot_bin: paths.boot_bin,
        kernel_bin: paths.kernel_bin,
        program_bin: paths.assembler_bin,
        source_file: source_file.clone(),
        map,
    };
    create_bootable_floppy(&request)?;

    println!("Created OS disk at '{}'.", image.display());
    Ok(ExitCode::SUCCESS)
}
