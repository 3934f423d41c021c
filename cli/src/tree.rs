//! Versioned source-tree discovery
//!
//! The OS project keeps one directory per released version:
//! `src/asm/vX.Y/` for the assembler and `src/os/vX.Y/` for the OS, with the
//! built floppy images under `disks/`.

use anyhow::{bail, Context, Result};
use floppyforge_disk::VersionInfo;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const ASM_DIR: &str = "asm";
const OS_DIR: &str = "os";

/// Source tree of the OS project.
pub struct SourceTree {
    root: PathBuf,
    asm_dir: PathBuf,
    os_dir: PathBuf,
}

impl SourceTree {
    /// Opens the tree rooted at `root` (no disk access yet).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let src = root.join("src");
        Self {
            asm_dir: src.join(ASM_DIR),
            os_dir: src.join(OS_DIR),
            root,
        }
    }

    /// Default floppy image location inside the tree.
    pub fn floppy_image(&self) -> PathBuf {
        self.root.join("disks").join("os.vfd")
    }

    /// Assembler versions present in the tree, oldest first.
    pub fn asm_versions(&self) -> Result<Vec<VersionInfo>> {
        versioned_directories(&self.asm_dir)
    }

    /// OS versions present in the tree, oldest first.
    pub fn os_versions(&self) -> Result<Vec<VersionInfo>> {
        versioned_directories(&self.os_dir)
    }

    /// Path of the assembler binary for `version`.
    pub fn assembler_bin(&self, version: VersionInfo) -> PathBuf {
        self.asm_file(version, "asm.bin")
    }

    /// Path of `file_name` in the given assembler version directory.
    pub fn asm_file(&self, version: VersionInfo, file_name: &str) -> PathBuf {
        self.asm_dir.join(version.to_string()).join(file_name)
    }

    /// Path of `file_name` in the given OS version directory.
    pub fn os_file(&self, version: VersionInfo, file_name: &str) -> PathBuf {
        self.os_dir.join(version.to_string()).join(file_name)
    }
}

fn versioned_directories(dir: &Path) -> Result<Vec<VersionInfo>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("cannot list version directories under '{}'", dir.display()))?;

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(version) = VersionInfo::try_parse(&entry.file_name().to_string_lossy()) {
            versions.push(version);
        }
    }

    versions.sort();
    debug!("found {} version directories under {}", versions.len(), dir.display());
    Ok(versions)
}

/// Resolved binary inputs for one floppy build.
#[derive(Debug)]
pub struct BuildPaths {
    /// Assembler binary for the requested version
    pub assembler_bin: PathBuf,
    /// Boot-sector binary for the requested OS version
    pub boot_bin: PathBuf,
    /// Kernel binary for the requested OS version
    pub kernel_bin: PathBuf,
    /// The requested OS version directory
    pub os_dir: PathBuf,
}

/// Resolves the assembler and OS files under a source directory that holds
/// `asm` and `os` version subdirectories.
pub fn resolve_build_paths(
    src_dir: &Path,
    asm_version: &str,
    os_version: &str,
) -> Result<BuildPaths> {
    let asm_version = VersionInfo::parse(asm_version)?;
    let os_version = VersionInfo::parse(os_version)?;

    let asm_dir = src_dir.join(ASM_DIR).join(asm_version.to_string());
    let os_dir = src_dir.join(OS_DIR).join(os_version.to_string());

    Ok(BuildPaths {
        assembler_bin: asm_dir.join("asm.bin"),
        boot_bin: os_dir.join("boot.bin"),
        kernel_bin: os_dir.join("kernel.bin"),
        os_dir,
    })
}

/// Walks up from the current directory to the first directory containing
/// both `src/asm` and `src/os`.
pub fn find_root_dir() -> Result<PathBuf> {
    let mut dir = std::env::current_dir()?;
    loop {
        if dir.join("src").join(ASM_DIR).is_dir() && dir.join("src").join(OS_DIR).is_dir() {
            return Ok(dir);
        }
        if !dir.pop() {
            bail!("could not find a source tree containing 'src/asm' and 'src/os' above the current directory");
        }
    }
}
