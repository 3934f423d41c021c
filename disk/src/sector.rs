//! Sector ranges and the fixed floppy geometry

use serde::{Deserialize, Serialize};

// For a standard IBM-formatted double-sided, high-density 3.5" diskette:
// data is recorded on two sides, each side has 80 tracks, each track has
// 18 sectors, and each sector holds 512 bytes.

/// Recording sides on a 3.5" high-density floppy
pub const FLOPPY_SIDE_COUNT: u64 = 2;

/// Tracks per side
pub const FLOPPY_TRACKS_PER_SIDE: u64 = 80;

/// Sectors per track
pub const FLOPPY_SECTORS_PER_TRACK: u64 = 18;

/// Bytes per floppy sector
pub const FLOPPY_BYTES_PER_SECTOR: u64 = 512;

/// Total bytes on a 1.44 MB floppy image (0x168000)
pub const FLOPPY_SIZE: u64 =
    FLOPPY_SIDE_COUNT * FLOPPY_TRACKS_PER_SIDE * FLOPPY_SECTORS_PER_TRACK * FLOPPY_BYTES_PER_SECTOR;

fn floppy_sector_size() -> u64 {
    FLOPPY_BYTES_PER_SECTOR
}

/// A contiguous run of fixed-size sectors on a disk image.
///
/// Pure value type: construction does not validate, and `sector_count`
/// must be nonzero for the derived addresses to be meaningful. Maps built
/// from untrusted input are checked by [`SectorMap::validate`].
///
/// [`SectorMap::validate`]: crate::map::SectorMap::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorRange {
    /// First sector of the range
    pub start_sector: u64,

    /// Number of sectors in the range
    pub sector_count: u64,

    /// Sector size in bytes (512 on a floppy)
    #[serde(default = "floppy_sector_size")]
    pub bytes_per_sector: u64,
}

impl SectorRange {
    /// Creates a range over `sector_count` sectors of `bytes_per_sector` bytes.
    pub fn new(start_sector: u64, sector_count: u64, bytes_per_sector: u64) -> Self {
        Self {
            start_sector,
            sector_count,
            bytes_per_sector,
        }
    }

    /// Creates a range of 512-byte floppy sectors.
    pub fn floppy(start_sector: u64, sector_count: u64) -> Self {
        Self::new(start_sector, sector_count, FLOPPY_BYTES_PER_SECTOR)
    }

    /// Last sector of the range.
    pub fn end_sector(&self) -> u64 {
        self.start_sector + self.sector_count - 1
    }

    /// Byte offset of the range's first sector within the image.
    pub fn start_address(&self) -> u64 {
        self.start_sector * self.bytes_per_sector
    }

    /// Capacity of the range in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.sector_count * self.bytes_per_sector
    }

    /// Whether the byte spans of two ranges intersect.
    pub fn overlaps(&self, other: &SectorRange) -> bool {
        let self_end = self.start_address() + self.total_bytes();
        let other_end = other.start_address() + other.total_bytes();
        self.start_address() < other_end && other.start_address() < self_end
    }
}
