//! Compile-orchestration pipeline
//!
//! Rebuilding the OS with its own assembler takes several emulator runs that
//! this tool cannot perform itself. The pipeline builds a floppy for each
//! stage, asks the operator (through the injected [`Prompter`]) to run it
//! and confirm the result, and on confirmation pulls the assembled output
//! back out of the image as the next stage's input.

use crate::error::Result;
use crate::floppy::{create_bootable_floppy, extract_assembled, FloppyBuildRequest};
use crate::map::SectorMap;
use crate::prompter::Prompter;
use std::fmt;
use std::path::{Path, PathBuf};

/// Stages of the OS compile pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStage {
    /// Assemble the bootloader source
    Bootloader,
    /// Assemble the kernel source
    Kernel,
    /// Assemble the kernel unit tests
    KernelTests,
    /// Build and run the floppy that carries the compiled kernel tests
    TestDisk,
}

impl fmt::Display for CompileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bootloader => "bootloader",
            Self::Kernel => "kernel",
            Self::KernelTests => "kernel tests",
            Self::TestDisk => "test disk",
        };
        write!(f, "{name}")
    }
}

/// Terminal result of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Every stage was confirmed
    Succeeded,
    /// The operator answered no at this stage; later stages were skipped
    Aborted(CompileStage),
}

/// Inputs for the full OS compile.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Floppy image rebuilt for every stage
    pub image: PathBuf,

    /// Assembler binary placed in the program section of each compile stage
    pub assembler_bin: PathBuf,

    /// Assembler version, only used in operator-facing messages
    pub assembler_version: String,

    /// Bootloader source file
    pub boot_source: PathBuf,

    /// Kernel source file
    pub kernel_source: PathBuf,

    /// Kernel unit-test source file
    pub kernel_test_source: PathBuf,

    /// Where the compiled bootloader lands (also the boot sector of every
    /// stage's floppy, so stage one's output boots stage two)
    pub boot_bin: PathBuf,

    /// Where the compiled kernel lands
    pub kernel_bin: PathBuf,

    /// Where the compiled kernel tests land
    pub kernel_test_bin: PathBuf,

    /// Layout shared by every stage's floppy
    pub map: SectorMap,
}

/// Runs the four-stage compile pipeline.
///
/// Each compile stage builds a floppy with the assembler in the program
/// section and the stage's source file in the source section, waits for the
/// operator to confirm the emulator run, and extracts the trimmed output to
/// the stage's binary. The final stage builds a floppy carrying the compiled
/// kernel tests and confirms the test run. A negative confirmation aborts
/// immediately; whatever earlier stages produced stays on disk.
pub fn compile_os(request: &CompileRequest, prompter: &mut dyn Prompter) -> Result<CompileOutcome> {
    // Bootloader
    prompter.report(&format!(
        "Compiling the bootloader using assembler {}...",
        request.assembler_version
    ));
    build_stage_floppy(request, &request.assembler_bin, &request.boot_source)?;
    if !confirm_emulator_run(request, &request.boot_source, prompter) {
        return abort(CompileStage::Bootloader, prompter);
    }
    extract_assembled(&request.image, &request.boot_bin, &request.map)?;

    // Kernel
    prompter.report(&format!(
        "Compiling the kernel using assembler {}...",
        request.assembler_version
    ));
    build_stage_floppy(request, &request.assembler_bin, &request.kernel_source)?;
    if !confirm_emulator_run(request, &request.kernel_source, prompter) {
        return abort(CompileStage::Kernel, prompter);
    }
    extract_assembled(&request.image, &request.kernel_bin, &request.map)?;

    // Kernel tests
    prompter.report(&format!(
        "Compiling the kernel tests using assembler {}...",
        request.assembler_version
    ));
    build_stage_floppy(request, &request.assembler_bin, &request.kernel_test_source)?;
    if !confirm_emulator_run(request, &request.kernel_test_source, prompter) {
        return abort(CompileStage::KernelTests, prompter);
    }
    extract_assembled(&request.image, &request.kernel_test_bin, &request.map)?;

    // Test disk: the compiled tests take the program slot
    prompter.report(&format!(
        "Creating a floppy disk with {} ready to run...",
        file_name(&request.kernel_test_bin)
    ));
    build_stage_floppy(request, &request.kernel_test_bin, &request.kernel_test_source)?;
    if !prompter.prompt_yes_no("Did the tests succeed?") {
        return abort(CompileStage::TestDisk, prompter);
    }

    Ok(CompileOutcome::Succeeded)
}

fn build_stage_floppy(
    request: &CompileRequest,
    program_bin: &Path,
    source_file: &Path,
) -> Result<()> {
    create_bootable_floppy(&FloppyBuildRequest {
        image: request.image.clone(),
        boot_bin: request.boot_bin.clone(),
        kernel_bin: request.kernel_bin.clone(),
        program_bin: program_bin.to_path_buf(),
        source_file: source_file.to_path_buf(),
        map: request.map.clone(),
    })
}

fn confirm_emulator_run(
    request: &CompileRequest,
    source_file: &Path,
    prompter: &mut dyn Prompter,
) -> bool {
    prompter.report(&format!(
        "Now run the {} in an emulator to compile the {} file.",
        file_name(&request.image),
        file_name(source_file)
    ));
    prompter.prompt_yes_no("Did the compile succeed?")
}

fn abort(stage: CompileStage, prompter: &mut dyn Prompter) -> Result<CompileOutcome> {
    prompter.report_error("Exiting early");
    Ok(CompileOutcome::Aborted(stage))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
