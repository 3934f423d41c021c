//! Sector map describing what lives where on the floppy image

use crate::error::{DiskError, Result};
use crate::sector::SectorRange;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Sectors needed for a 28K section
pub const SECTORS_FOR_28K: u64 = 56;

/// Sectors needed for a 1 MB section
pub const SECTORS_FOR_1MB: u64 = 2000;

/// Named assignment of sector ranges to the logical payload sections of one
/// floppy image (each sector on a floppy is 512 bytes).
///
/// The default layout:
///
/// | Logical sectors | Address               | Description                     |
/// | --------------- | --------------------- | ------------------------------- |
/// | 0               | `0x000000-0x0001FF`   | Boot sector                     |
/// | 1-56            | `0x000200-0x0071FF`   | Kernel (28K, 56 sectors)        |
/// | 57-112          | `0x007200-0x00E1FF`   | Program (28K, 56 sectors)       |
/// | 113-2112        | `0x00E200-0x1081FF`   | Source file (1MB, 2000 sectors) |
/// | 2113-2168       | `0x108200-0x10F1FF`   | Assembled file (written) (28K)  |
///
/// The program section carries whichever binary the kernel hands control to:
/// the assembler during compile runs, or a compiled test payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorMap {
    /// Boot sector range
    pub boot_sector: SectorRange,

    /// Kernel binary range
    pub kernel_sector: SectorRange,

    /// Program binary range (assembler or test payload)
    pub program_sector: SectorRange,

    /// Source file range (input to the assembler)
    pub source_file_sector: SectorRange,

    /// Assembled output range (written by the assembler)
    pub assembled_file_sector: SectorRange,
}

impl Default for SectorMap {
    fn default() -> Self {
        let boot_sector = SectorRange::floppy(0, 1);
        let kernel_sector = SectorRange::floppy(boot_sector.end_sector() + 1, SECTORS_FOR_28K);
        let program_sector = SectorRange::floppy(kernel_sector.end_sector() + 1, SECTORS_FOR_28K);
        let source_file_sector =
            SectorRange::floppy(program_sector.end_sector() + 1, SECTORS_FOR_1MB);
        let assembled_file_sector =
            SectorRange::floppy(source_file_sector.end_sector() + 1, SECTORS_FOR_28K);

        Self {
            boot_sector,
            kernel_sector,
            program_sector,
            source_file_sector,
            assembled_file_sector,
        }
    }
}

impl SectorMap {
    /// Parses a map from its JSON form and validates it.
    ///
    /// Either the whole document parses into a valid map or the operation
    /// fails; there is no partial or defaulted merge.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let map: SectorMap = serde_json::from_str(json).map_err(|err| DiskError::InvalidSectorMap {
            detail: err.to_string(),
        })?;
        map.validate()?;
        Ok(map)
    }

    /// Reads and parses a map from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => DiskError::NotFound {
                path: path.to_path_buf(),
            },
            _ => DiskError::Io(err),
        })?;
        let map = Self::from_json_str(&json).map_err(|err| match err {
            DiskError::InvalidSectorMap { detail } => DiskError::InvalidSectorMap {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })?;
        debug!("loaded sector map from {}", path.display());
        Ok(map)
    }

    /// Checks that every section has a nonzero sector count and that no two
    /// sections overlap.
    pub fn validate(&self) -> Result<()> {
        let sections = self.sections();

        for (name, range) in &sections {
            if range.sector_count == 0 {
                return Err(DiskError::InvalidSectorMap {
                    detail: format!("section '{name}' has a zero sector count"),
                });
            }
        }

        for (i, (name, range)) in sections.iter().enumerate() {
            for (other_name, other) in &sections[i + 1..] {
                if range.overlaps(other) {
                    return Err(DiskError::InvalidSectorMap {
                        detail: format!("sections '{name}' and '{other_name}' overlap"),
                    });
                }
            }
        }

        Ok(())
    }

    /// The named sections in layout order.
    pub fn sections(&self) -> [(&'static str, SectorRange); 5] {
        [
            ("boot", self.boot_sector),
            ("kernel", self.kernel_sector),
            ("program", self.program_sector),
            ("source file", self.source_file_sector),
            ("assembled file", self.assembled_file_sector),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_contiguous() {
        let map = SectorMap::default();
        assert_eq!(map.boot_sector, SectorRange::floppy(0, 1));
        assert_eq!(map.kernel_sector, SectorRange::floppy(1, 56));
        assert_eq!(map.program_sector, SectorRange::floppy(57, 56));
        assert_eq!(map.source_file_sector, SectorRange::floppy(113, 2000));
        assert_eq!(map.assembled_file_sector, SectorRange::floppy(2113, 56));
    }

    #[test]
    fn default_layout_addresses() {
        let map = SectorMap::default();
        assert_eq!(map.kernel_sector.start_address(), 0x200);
        assert_eq!(map.program_sector.start_address(), 0x7200);
        assert_eq!(map.source_file_sector.start_address(), 0xE200);
        assert_eq!(map.assembled_file_sector.start_address(), 0x108200);
    }

    #[test]
    fn default_layout_validates() {
        SectorMap::default().validate().unwrap();
    }

    #[test]
    fn parses_the_documented_json_shape() {
        let json = r#"{
            "bootSector": { "startSector": 0, "sectorCount": 1 },
            "kernelSector": { "startSector": 1, "sectorCount": 1 },
            "programSector": { "startSector": 2, "sectorCount": 2 },
            "sourceFileSector": { "startSector": 4, "sectorCount": 3 },
            "assembledFileSector": { "startSector": 7, "sectorCount": 4 }
        }"#;

        let map = SectorMap::from_json_str(json).unwrap();
        assert_eq!(map.boot_sector, SectorRange::floppy(0, 1));
        assert_eq!(map.program_sector, SectorRange::floppy(2, 2));
        assert_eq!(map.assembled_file_sector, SectorRange::floppy(7, 4));
    }

    #[test]
    fn parses_an_explicit_sector_size() {
        let json = r#"{
            "bootSector": { "startSector": 0, "sectorCount": 1, "bytesPerSector": 128 },
            "kernelSector": { "startSector": 1, "sectorCount": 1, "bytesPerSector": 128 },
            "programSector": { "startSector": 2, "sectorCount": 2, "bytesPerSector": 128 },
            "sourceFileSector": { "startSector": 4, "sectorCount": 3, "bytesPerSector": 128 },
            "assembledFileSector": { "startSector": 7, "sectorCount": 4, "bytesPerSector": 128 }
        }"#;

        let map = SectorMap::from_json_str(json).unwrap();
        assert_eq!(map.kernel_sector.bytes_per_sector, 128);
        assert_eq!(map.kernel_sector.start_address(), 128);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SectorMap::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, DiskError::InvalidSectorMap { .. }));
    }

    #[test]
    fn rejects_a_missing_section() {
        let json = r#"{
            "bootSector": { "startSector": 0, "sectorCount": 1 },
            "kernelSector": { "startSector": 1, "sectorCount": 56 }
        }"#;

        let err = SectorMap::from_json_str(json).unwrap_err();
        assert!(matches!(err, DiskError::InvalidSectorMap { .. }));
    }

    #[test]
    fn rejects_overlapping_sections() {
        let json = r#"{
            "bootSector": { "startSector": 0, "sectorCount": 2 },
            "kernelSector": { "startSector": 1, "sectorCount": 56 },
            "programSector": { "startSector": 57, "sectorCount": 56 },
            "sourceFileSector": { "startSector": 113, "sectorCount": 2000 },
            "assembledFileSector": { "startSector": 2113, "sectorCount": 56 }
        }"#;

        let err = SectorMap::from_json_str(json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'boot' and 'kernel' overlap"), "{message}");
    }

    #[test]
    fn rejects_a_zero_sector_count() {
        let mut map = SectorMap::default();
        map.program_sector.sector_count = 0;
        let err = map.validate().unwrap_err();
        assert!(err.to_string().contains("zero sector count"));
    }
}
