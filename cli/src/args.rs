//! Argument parsing helpers shared by the commands

use anyhow::{anyhow, Result};
use floppyforge_disk::SectorMap;
use std::path::Path;

/// Parses a byte count with an optional radix suffix: `h` for hexadecimal,
/// `d` (or nothing) for decimal.
pub fn parse_size(input: &str) -> Result<u64> {
    let text = input.trim();
    let parsed = if let Some(hex) = text.strip_suffix(&['h', 'H'][..]) {
        u64::from_str_radix(hex, 16)
    } else {
        text.strip_suffix(&['d', 'D'][..]).unwrap_or(text).parse()
    };

    parsed.map_err(|_| anyhow!("size '{input}' cannot be converted to a number"))
}

/// Loads the sector map from `path`, or the default layout when no file is
/// given.
pub fn load_sector_map(path: Option<&Path>) -> Result<SectorMap> {
    match path {
        Some(path) => Ok(SectorMap::from_json_file(path)?),
        None => Ok(SectorMap::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_without_a_suffix() {
        assert_eq!(parse_size("123").unwrap(), 123);
    }

    #[test]
    fn parses_decimal_with_a_d_suffix() {
        assert_eq!(parse_size("123d").unwrap(), 123);
    }

    #[test]
    fn parses_hexadecimal_with_an_h_suffix() {
        assert_eq!(parse_size("10h").unwrap(), 0x10);
        assert_eq!(parse_size("168000h").unwrap(), 1_474_560);
    }

    #[test]
    fn rejects_text_that_is_not_a_number() {
        let err = parse_size("what?").unwrap_err();
        assert_eq!(err.to_string(), "size 'what?' cannot be converted to a number");
    }

    #[test]
    fn defaults_to_the_reference_layout_without_a_file() {
        assert_eq!(load_sector_map(None).unwrap(), SectorMap::default());
    }
}
