//! The `interactive` command: guided floppy builds

use crate::prompter::ConsolePrompter;
use crate::tree::{self, SourceTree};
use anyhow::{bail, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use floppyforge_disk::{
    create_bootable_floppy, extract_assembled, FloppyBuildRequest, Prompter, SectorMap,
    SectorRange, VersionInfo,
};
use std::path::Path;
use std::process::ExitCode;

pub fn command() -> Command {
    Command::new("interactive")
        .about("Interactively compile and build an OS floppy disk")
        .arg(
            Arg::new("root-dir")
                .long("root-dir")
                .short('r')
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Root directory of the OS source tree"),
        )
}

pub fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let root = match matches.get_one::<std::path::PathBuf>("root-dir") {
        Some(dir) => dir.clone(),
        None => tree::find_root_dir()?,
    };
    let tree = SourceTree::new(root);
    let mut prompter = ConsolePrompter::new();

    println!("Let's build a version of the OS!\n");

    let choices = [
        "Compile boot.asm",
        "Compile kernel.asm",
        "Compile kernel_test.asm",
        "Compile the assembler itself",
    ];
    let Some(selection) = prompter.prompt_choice("What do you want to do?", &choices) else {
        return Ok(ExitCode::FAILURE);
    };

    // Distinct exit codes per target, for scripts wrapping the wizard
    let (base_name, is_os_file, failure_code) = match selection {
        0 => ("boot", true, 1),
        1 => ("kernel", true, 2),
        2 => ("kernel_test", true, 3),
        _ => ("asm", false, 4),
    };

    if compile_file(&tree, &mut prompter, base_name, is_os_file)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(failure_code))
    }
}

/// Walks the operator through one compile: version choices, sector layout,
/// then build/run/confirm rounds until the compile succeeds.
fn compile_file(
    tree: &SourceTree,
    prompter: &mut ConsolePrompter,
    base_name: &str,
    is_os_file: bool,
) -> Result<bool> {
    let os_versions = newest_first(tree.os_versions()?);
    let asm_versions = newest_first(tree.asm_versions()?);
    if os_versions.is_empty() || asm_versions.is_empty() {
        bail!("the source tree has no OS or assembler versions to build from");
    }

    let source_name = format!("{base_name}.asm");
    let version_pool = if is_os_file { &os_versions } else { &asm_versions };
    let message = format!("Which version of {source_name} do you want to compile?");
    let Some(index) = prompt_version(prompter, &message, version_pool) else {
        return Ok(false);
    };
    let source_file = if is_os_file {
        tree.os_file(version_pool[index], &source_name)
    } else {
        tree.asm_file(version_pool[index], &source_name)
    };

    let Some(request) =
        prompt_build_request(tree, prompter, &os_versions, &asm_versions, &source_file)?
    else {
        return Ok(false);
    };

    let dest_bin = source_file.with_extension("bin");

    loop {
        if let Err(err) = create_bootable_floppy(&request) {
            prompter.report_error(&err.to_string());
            return Ok(false);
        }

        prompter.report(&format!(
            "Now run the {} in an emulator to compile the {} file.",
            file_name(&request.image),
            file_name(&source_file)
        ));

        if prompter.prompt_yes_no("Did the compile succeed?") {
            if let Err(err) = extract_assembled(&request.image, &dest_bin, &request.map) {
                prompter.report_error(&err.to_string());
                return Ok(false);
            }
            prompter.report_success(&format!(
                "Extracted the compiled output to '{}'.",
                dest_bin.display()
            ));
            return Ok(true);
        }

        if !prompter.prompt_yes_no("Try the build again?") {
            return Ok(false);
        }
    }
}

fn prompt_build_request(
    tree: &SourceTree,
    prompter: &mut ConsolePrompter,
    os_versions: &[VersionInfo],
    asm_versions: &[VersionInfo],
    source_file: &Path,
) -> Result<Option<FloppyBuildRequest>> {
    let Some(index) = prompt_version(
        prompter,
        "Which version of boot.bin do you want to use?",
        os_versions,
    ) else {
        return Ok(None);
    };
    let boot_bin = tree.os_file(os_versions[index], "boot.bin");

    let Some(index) = prompt_version(
        prompter,
        "Which version of kernel.bin do you want to use?",
        os_versions,
    ) else {
        return Ok(None);
    };
    let kernel_bin = tree.os_file(os_versions[index], "kernel.bin");

    let Some(index) = prompt_version(
        prompter,
        "Which version of the assembler do you want to use?",
        asm_versions,
    ) else {
        return Ok(None);
    };
    let program_bin = tree.assembler_bin(asm_versions[index]);

    let Some(map) = prompt_sector_map(prompter) else {
        return Ok(None);
    };
    if let Err(err) = map.validate() {
        prompter.report_error(&err.to_string());
        return Ok(None);
    }

    Ok(Some(FloppyBuildRequest {
        image: tree.floppy_image(),
        boot_bin,
        kernel_bin,
        program_bin,
        source_file: source_file.to_path_buf(),
        map,
    }))
}

/// Asks for each section's placement, defaulting to the reference layout
/// chained after whatever the operator entered so far.
fn prompt_sector_map(prompter: &mut ConsolePrompter) -> Option<SectorMap> {
    let defaults = SectorMap::default();

    let boot = prompt_range(prompter, "bootloader", defaults.boot_sector)?;
    let kernel = prompt_range(
        prompter,
        "kernel",
        SectorRange::floppy(next_sector(&boot), defaults.kernel_sector.sector_count),
    )?;
    let program = prompt_range(
        prompter,
        "assembler",
        SectorRange::floppy(next_sector(&kernel), defaults.program_sector.sector_count),
    )?;
    let source_file = prompt_range(
        prompter,
        "source file",
        SectorRange::floppy(next_sector(&program), defaults.source_file_sector.sector_count),
    )?;
    let assembled = prompt_range(
        prompter,
        "output assembled file",
        SectorRange::floppy(
            next_sector(&source_file),
            defaults.assembled_file_sector.sector_count,
        ),
    )?;

    Some(SectorMap {
        boot_sector: boot,
        kernel_sector: kernel,
        program_sector: program,
        source_file_sector: source_file,
        assembled_file_sector: assembled,
    })
}

fn prompt_range(
    prompter: &mut ConsolePrompter,
    name: &str,
    default: SectorRange,
) -> Option<SectorRange> {
    let start = prompter.prompt_number(
        &format!("In which floppy sector is the {name}?"),
        default.start_sector,
    )?;
    let count = prompter.prompt_number(
        &format!("How many floppy sectors is the {name}?"),
        default.sector_count,
    )?;
    Some(SectorRange::floppy(start, count))
}

fn prompt_version(
    prompter: &mut ConsolePrompter,
    message: &str,
    versions: &[VersionInfo],
) -> Option<usize> {
    let labels: Vec<String> = versions.iter().map(VersionInfo::to_string).collect();
    let choices: Vec<&str> = labels.iter().map(String::as_str).collect();
    prompter.prompt_choice(message, &choices)
}

fn next_sector(range: &SectorRange) -> u64 {
    range.start_sector + range.sector_count
}

fn newest_first(mut versions: Vec<VersionInfo>) -> Vec<VersionInfo> {
    versions.reverse();
    versions
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
