// SPDX-License-Identifier: PMPL-1.0-or-later
//! Byte normalizer: BOM sniffing and UTF-16 re-encoding.
//!
//! Runs before parsing and before every extractor. A UTF-16 document left
//! untranscoded would corrupt all downstream text-based detection, so this
//! step is neither optional nor retried.

use crate::error::{Error, Result};
use crate::facts::{Fact, FactKey, Reason};
use tracing::debug;

/// Recognized byte-order marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bom {
    /// `EF BB BF`
    Utf8,
    /// `FE FF`
    Utf16Be,
    /// `FF FE`
    Utf16Le,
}

impl Bom {
    /// Canonical encoding name for this mark
    pub fn name(&self) -> &'static str {
        match self {
            Bom::Utf8 => "UTF-8",
            Bom::Utf16Be => "UTF-16BE",
            Bom::Utf16Le => "UTF-16LE",
        }
    }
}

impl std::fmt::Display for Bom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inspect the first bytes of a document for a byte-order mark.
///
/// The three-byte UTF-8 pattern is checked before the two-byte UTF-16
/// patterns; detection is exclusive by construction.
pub fn sniff_bom(bytes: &[u8]) -> Option<Bom> {
    if bytes.len() >= 3 && bytes[0] == 0xEF && bytes[1] == 0xBB && bytes[2] == 0xBF {
        return Some(Bom::Utf8);
    }
    if bytes.len() >= 2 {
        if bytes[0] == 0xFE && bytes[1] == 0xFF {
            return Some(Bom::Utf16Be);
        }
        if bytes[0] == 0xFF && bytes[1] == 0xFE {
            return Some(Bom::Utf16Le);
        }
    }
    None
}

/// Decode raw document bytes to the canonical internal text form.
///
/// UTF-16LE/BE documents are transcoded to UTF-8 wholesale, BOM included;
/// everything else is decoded as UTF-8, replacing undecodable bytes. The
/// detected mark is returned alongside so the `charset_bom` fact can be
/// recorded before parsing.
pub fn decode(bytes: &[u8]) -> Result<(String, Option<Bom>)> {
    let bom = sniff_bom(bytes);
    if let Some(b) = bom {
        debug!("byte-order mark detected: {}", b);
    }
    let markup = match bom {
        Some(Bom::Utf16Le) => from_utf16(bytes, u16::from_le_bytes)?,
        Some(Bom::Utf16Be) => from_utf16(bytes, u16::from_be_bytes)?,
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok((markup, bom))
}

fn from_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::InvalidUtf16(format!(
            "odd byte length {} cannot form UTF-16 code units",
            bytes.len()
        )));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16_lossy(&units))
}

/// Build the `charset_bom` fact for a sniff result.
pub fn bom_fact(bom: Option<Bom>) -> Fact {
    match bom {
        Some(b) => Fact::new(FactKey::CharsetBom).with_record(
            Some(format!("Byte-order mark: {}", b.name())),
            vec![b.name().to_string()],
        ),
        None => Fact::new(FactKey::CharsetBom).with_reason(Reason::SourceMissing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_utf8_bom() {
        assert_eq!(sniff_bom(&[0xEF, 0xBB, 0xBF, b'<']), Some(Bom::Utf8));
    }

    #[test]
    fn test_sniff_utf16_boms() {
        assert_eq!(sniff_bom(&[0xFE, 0xFF, 0x00, 0x3C]), Some(Bom::Utf16Be));
        assert_eq!(sniff_bom(&[0xFF, 0xFE, 0x3C, 0x00]), Some(Bom::Utf16Le));
    }

    #[test]
    fn test_sniff_none() {
        assert_eq!(sniff_bom(b"<!DOCTYPE html>"), None);
        assert_eq!(sniff_bom(&[]), None);
        assert_eq!(sniff_bom(&[0xEF, 0xBB]), None);
    }

    #[test]
    fn test_utf16le_roundtrips_ascii() {
        let text = "\u{feff}<html lang=\"en\"></html>";
        let bytes: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        let (markup, bom) = decode(&bytes).expect("decode succeeds");
        assert_eq!(bom, Some(Bom::Utf16Le));
        assert_eq!(markup, text);
    }

    #[test]
    fn test_utf16be_decodes() {
        let text = "\u{feff}<p>ok</p>";
        let bytes: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
        let (markup, bom) = decode(&bytes).expect("decode succeeds");
        assert_eq!(bom, Some(Bom::Utf16Be));
        assert_eq!(markup, text);
    }

    #[test]
    fn test_odd_length_utf16_is_fatal() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend("<p>".encode_utf16().flat_map(|u| u.to_le_bytes()));
        bytes.push(0x00);
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_utf8_bom_leaves_bytes_unchanged() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"<html></html>");
        let (markup, bom) = decode(&bytes).expect("decode succeeds");
        assert_eq!(bom, Some(Bom::Utf8));
        assert!(markup.starts_with('\u{feff}'));
        assert!(markup.contains("<html></html>"));
    }

    #[test]
    fn test_bom_fact_shapes() {
        let found = bom_fact(Some(Bom::Utf16Le));
        assert_eq!(found.first_value(), Some("UTF-16LE"));
        assert_eq!(found.first_code(), Some("Byte-order mark: UTF-16LE"));

        let missing = bom_fact(None);
        assert!(!missing.has_values());
        assert_eq!(missing.reason, Some(Reason::SourceMissing));
    }
}
