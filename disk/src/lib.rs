//! Floppy Disk Image Assembly Engine
//!
//! Builds and manipulates the raw disk images used to bootstrap the OS and
//! its companion assembler on emulated floppy hardware.
//!
//! # Overview
//!
//! A floppy image is a flat binary file, byte-addressable, with no header;
//! structure comes entirely from a [`SectorMap`] that assigns named sector
//! ranges to the logical payload sections (boot sector, kernel, program,
//! source file, assembled output). This crate provides:
//! - Sector/address arithmetic over fixed-size sectors
//! - Blank-disk initialization and bounded block copies between files
//! - Trailing-zero trimming of extracted binaries to a 16-byte boundary
//! - Bootable floppy assembly from the four input binaries
//! - The operator-confirmed compile pipeline used to rebuild the OS with
//!   its own assembler
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Sector layer** - ranges, maps, and the fixed floppy geometry
//! 2. **Image layer** - blank-disk creation and raw block copies
//! 3. **Assembly layer** - section placement, extraction, and trimming
//! 4. **Pipeline layer** - the multi-stage compile orchestration
//!
//! # Usage
//!
//! ```ignore
//! use floppyforge_disk::{create_bootable_floppy, FloppyBuildRequest, SectorMap};
//!
//! create_bootable_floppy(&FloppyBuildRequest {
//!     image: "disks/os.vfd".into(),
//!     boot_bin: "boot.bin".into(),
//!     kernel_bin: "kernel.bin".into(),
//!     program_bin: "asm.bin".into(),
//!     source_file: "kernel.asm".into(),
//!     map: SectorMap::default(),
//! })?;
//! ```
//!
//! All operations are synchronous and single-threaded; the engine provides
//! no locking, so callers must not run concurrent operations against the
//! same image path.

#![warn(missing_docs)]

pub mod error;
pub mod sector;
pub mod map;
pub mod image;
pub mod trim;
pub mod floppy;
pub mod pipeline;
pub mod prompter;
pub mod version;

pub use error::{DiskError, Result};
pub use sector::{SectorRange, FLOPPY_BYTES_PER_SECTOR, FLOPPY_SIZE};
pub use map::SectorMap;

// High-level API exports
pub use image::{copy_block, create_blank_disk, CopyRequest};
pub use trim::trim_trailing_zeros;
pub use floppy::{create_bootable_floppy, extract_assembled, friendly_size, FloppyBuildRequest};
pub use pipeline::{compile_os, CompileOutcome, CompileRequest, CompileStage};
pub use prompter::{Prompter, ScriptedPrompter};
pub use version::VersionInfo;
