//! The `compile-os` command: the four-stage assemble pipeline

use crate::args::load_sector_map;
use crate::prompter::ConsolePrompter;
use crate::tree;
use anyhow::Result;
use clap::{value_parser, Arg, ArgMatches, Command};
use floppyforge_disk::{compile_os, CompileOutcome, CompileRequest};
use std::path::PathBuf;
use std::process::ExitCode;

const AFTER_HELP: &str = "Assumes a source directory with the following format:\n\
    <src-dir>/asm/vX.Y and <src-dir>/os/vX.Y\n\n\
Each stage builds a floppy, waits for you to run it in an emulator, and \
copies the assembled output back out of the image.";

pub fn command() -> Command {
    Command::new("compile-os")
        .about("Compiles the bootloader and kernel source files through the emulator")
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
                .help("OS version to compile (in the form 'vX.Y')"),
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
    let asm_version = matches
        .get_one::<String>("asm-version")
        .expect("asm-version is required");
    let os_version = matches
        .get_one::<String>("os-version")
        .expect("os-version is required");

    let paths = tree::resolve_build_paths(src_dir, asm_version, os_version)?;
    let map = load_sector_map(matches.get_one::<PathBuf>("sector-map").map(PathBuf::as_path))?;

    let request = CompileRequest {
        image: image.clone(),
        assembler_bin: paths.assembler_bin,
        assembler_version: asm_version.clone(),
        boot_source: paths.os_dir.join("boot.asm"),
        kernel_source: paths.os_dir.join("kernel.asm"),
        kernel_test_source: paths.os_dir.join("kernel_test.asm"),
        boot_bin: paths.boot_bin,
        kernel_bin: paths.kernel_bin,
        kernel_test_bin: paths.os_dir.join("kernel_test.bin"),
        map,
    };

    let mut prompter = ConsolePrompter::new();
    match compile_os(&request, &mut prompter)? {
        CompileOutcome::Succeeded => {
            println!(
                "Compiled the bootloader, kernel, and kernel tests into '{}', '{}', and '{}'.",
                request.boot_bin.display(),
                request.kernel_bin.display(),
                request.kernel_test_bin.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        CompileOutcome::Aborted(stage) => {
            eprintln!("Build failed at the {stage} stage");
            Ok(ExitCode::FAILURE)
        }
    }
}
