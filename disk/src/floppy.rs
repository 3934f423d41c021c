//! Bootable floppy assembly and extraction

use crate::error::{DiskError, Result};
use crate::image::{copy_block, create_blank_disk, CopyRequest};
use crate::map::SectorMap;
use crate::sector::{SectorRange, FLOPPY_SIZE};
use crate::trim::trim_trailing_zeros;
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Input files and layout for one bootable floppy image.
#[derive(Debug, Clone)]
pub struct FloppyBuildRequest {
    /// Destination floppy image
    pub image: PathBuf,

    /// Boot-sector binary
    pub boot_bin: PathBuf,

    /// Kernel binary
    pub kernel_bin: PathBuf,

    /// Program binary the kernel hands control to (assembler or test payload)
    pub program_bin: PathBuf,

    /// Source file for the program to consume
    pub source_file: PathBuf,

    /// Where each section lives on the image
    pub map: SectorMap,
}

/// Lays out a bootable floppy image from the four input files.
///
/// Blank-initializes the image at the fixed floppy size, then places the
/// boot sector, kernel, program, and source file at their mapped addresses,
/// in that order. Each input is checked against its section's capacity
/// before its copy runs; a failed section leaves the earlier sections
/// written (the image keeps its valid length, there is no rollback).
pub fn create_bootable_floppy(request: &FloppyBuildRequest) -> Result<()> {
    create_blank_disk(&request.image, FLOPPY_SIZE)?;

    copy_section(&request.image, &request.boot_bin, &request.map.boot_sector)?;
    copy_section(&request.image, &request.kernel_bin, &request.map.kernel_sector)?;
    copy_section(&request.image, &request.program_bin, &request.map.program_sector)?;
    copy_section(
        &request.image,
        &request.source_file,
        &request.map.source_file_sector,
    )?;

    Ok(())
}

/// Pulls the assembled-output section out of `image` into `dest` and trims
/// the trailing zeros from it.
///
/// Returns the trimmer's length delta for `dest`.
pub fn extract_assembled(image: &Path, dest: &Path, map: &SectorMap) -> Result<i64> {
    let range = &map.assembled_file_sector;
    copy_block(&CopyRequest {
        source: image.to_path_buf(),
        dest: dest.to_path_buf(),
        source_offset: range.start_address(),
        max_length: Some(range.total_bytes()),
        dest_offset: 0,
    })?;

    trim_trailing_zeros(dest)
}

/// Human-readable size for created disks.
pub fn friendly_size(size_in_bytes: u64) -> String {
    if size_in_bytes == FLOPPY_SIZE {
        "1.44 MB".to_string()
    } else {
        format!("{size_in_bytes} bytes")
    }
}

fn copy_section(image: &Path, source: &Path, range: &SectorRange) -> Result<()> {
    // Check the input against the section's capacity before copying anything.
    let limit = range.total_bytes();
    let size = file_size(source)?;
    if size > limit {
        return Err(DiskError::SizeExceeded {
            path: source.to_path_buf(),
            limit,
        });
    }

    copy_block(&CopyRequest {
        source: source.to_path_buf(),
        dest: image.to_path_buf(),
        source_offset: 0,
        max_length: Some(limit),
        dest_offset: range.start_address(),
    })?;

    info!(
        "placed {} ({size} bytes) at {:#08x}",
        source.display(),
        range.start_address()
    );
    Ok(())
}

fn file_size(path: &Path) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => DiskError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DiskError::Io(err),
    })?;
    Ok(metadata.len())
}
