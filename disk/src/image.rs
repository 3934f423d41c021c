//! Raw image primitives: blank-disk creation and bounded block copies

use crate::error::{DiskError, Result};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Chunk size for buffered copies
const BUFFER_SIZE: usize = 4096;

/// Creates a zero-filled file of exactly `size_in_bytes` bytes at `out_path`,
/// replacing whatever existed there.
///
/// The parent directory is created if needed, and the zeros are written in
/// bounded chunks rather than allocated up front.
pub fn create_blank_disk(out_path: &Path, size_in_bytes: u64) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut out = File::create(out_path)?;
    let buffer = [0u8; BUFFER_SIZE];
    let mut remaining = size_in_bytes;
    while remaining > 0 {
        let count = remaining.min(BUFFER_SIZE as u64) as usize;
        out.write_all(&buffer[..count])?;
        remaining -= count as u64;
    }

    debug!("created blank disk {} ({size_in_bytes} bytes)", out_path.display());
    Ok(())
}

/// Parameters for one bounded block copy between two files.
#[derive(Debug, Clone)]
pub struct CopyRequest {
    /// File to read from
    pub source: PathBuf,

    /// File to write into (created if missing, never truncated)
    pub dest: PathBuf,

    /// Offset into `source` from which to start copying
    pub source_offset: u64,

    /// Maximum number of bytes to copy; `None` copies through to EOF
    pub max_length: Option<u64>,

    /// Offset into `dest` at which to start writing
    pub dest_offset: u64,
}

impl CopyRequest {
    /// Requests copying the whole of `source` onto the start of `dest`.
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            source_offset: 0,
            max_length: None,
            dest_offset: 0,
        }
    }
}

/// Copies a block of data from the source file into the destination file,
/// returning the number of bytes copied.
///
/// Reads 4096-byte chunks starting at `source_offset` and writes them at the
/// corresponding destination position until `max_length` bytes have been
/// copied or the source is exhausted. Bytes of `dest` outside the written
/// region are untouched. Both files are closed on every exit path.
///
/// # Errors
///
/// - [`DiskError::NotFound`] when the source file does not exist
/// - [`DiskError::CopyMismatch`] when a chunk's write count differs from its
///   read count (a partial write the OS can legally return; never retried)
pub fn copy_block(request: &CopyRequest) -> Result<u64> {
    let mut source = open_for_read(&request.source)?;
    let mut dest = open_for_write(&request.dest)?;

    source.seek(SeekFrom::Start(request.source_offset))?;
    dest.seek(SeekFrom::Start(request.dest_offset))?;

    let limit = request.max_length.unwrap_or(u64::MAX);
    let mut buffer = [0u8; BUFFER_SIZE];
    let mut total_copied: u64 = 0;

    loop {
        let chunk = limit.saturating_sub(total_copied).min(BUFFER_SIZE as u64) as usize;
        if chunk == 0 {
            break;
        }

        let read = source.read(&mut buffer[..chunk])?;
        if read == 0 {
            break;
        }

        let written = dest.write(&buffer[..read])?;
        if written != read {
            return Err(DiskError::CopyMismatch { read, written });
        }

        total_copied += read as u64;
    }

    debug!(
        "copied {total_copied} bytes from {} to {}",
        request.source.display(),
        request.dest.display()
    );
    Ok(total_copied)
}

fn open_for_read(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => DiskError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DiskError::Io(err),
    })
}

fn open_for_write(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;
    Ok(file)
}
