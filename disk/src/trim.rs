//! Trailing-zero trimming for binaries extracted from an image

use crate::error::Result;
use log::debug;
use std::fs;
use std::path::Path;

/// Alignment boundary for trimmed output
const ALIGNMENT: usize = 16;

/// Truncates the trailing zeros from the file, keeping enough zeros to fill
/// out the final 16-byte block.
///
/// The file is scanned backward from the end for the last non-zero byte;
/// everything after it is padding to discard. The remaining content is then
/// zero-padded up to the next multiple of 16 (content already on a boundary
/// gets no padding). The file is rewritten only if its length changed.
///
/// An all-zero file trims to an empty file, which sits on the boundary
/// already.
///
/// Returns `original length - final length`: positive when bytes were
/// dropped, negative when padding grew the file, zero when unchanged.
pub fn trim_trailing_zeros(path: &Path) -> Result<i64> {
    let data = fs::read(path)?;

    let content_len = data
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |last| last + 1);

    let padding = (ALIGNMENT - content_len % ALIGNMENT) % ALIGNMENT;
    let final_len = content_len + padding;

    if final_len != data.len() {
        let mut trimmed = data[..content_len].to_vec();
        trimmed.resize(final_len, 0);
        fs::write(path, &trimmed)?;
    }

    let removed = data.len() as i64 - final_len as i64;
    debug!("trimmed {} by {removed} bytes", path.display());
    Ok(removed)
}
