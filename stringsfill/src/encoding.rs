//! Byte-level encoding detection for `.strings` files.
//!
//! Real-world `.strings` files come as UTF-8 or UTF-16 in either byte order,
//! with or without a byte-order mark. The detected encoding is recorded so
//! that writes reproduce the same bytes the file was read from.

use std::fmt::Display;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use serde::{Deserialize, Serialize};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];

/// Text encodings a `.strings` file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    /// The byte-order mark for this encoding.
    pub fn bom(self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8 => UTF8_BOM,
            TextEncoding::Utf16Le => UTF16_LE_BOM,
            TextEncoding::Utf16Be => UTF16_BE_BOM,
        }
    }

    fn as_encoding_rs(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Utf16Le => UTF_16LE,
            TextEncoding::Utf16Be => UTF_16BE,
        }
    }
}

impl Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_encoding_rs().name())
    }
}

/// Decoded file content together with how it was encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// The text, without the byte-order mark.
    pub text: String,
    pub encoding: TextEncoding,
    pub has_bom: bool,
}

/// Decodes raw file bytes.
///
/// Any zero byte means UTF-16: little-endian is tried first and big-endian
/// is the fallback, unless a leading big-endian BOM says otherwise. Without
/// zero bytes the content must be valid UTF-8.
///
/// Returns `None` when no applicable encoding decodes the bytes.
pub fn decode(bytes: &[u8]) -> Option<DecodedText> {
    let candidates: &[TextEncoding] = if bytes.contains(&0x00) {
        if bytes.starts_with(UTF16_BE_BOM) {
            &[TextEncoding::Utf16Be, TextEncoding::Utf16Le]
        } else {
            &[TextEncoding::Utf16Le, TextEncoding::Utf16Be]
        }
    } else {
        &[TextEncoding::Utf8]
    };

    candidates
        .iter()
        .find_map(|&encoding| decode_as(bytes, encoding))
}

fn decode_as(bytes: &[u8], encoding: TextEncoding) -> Option<DecodedText> {
    let has_bom = bytes.starts_with(encoding.bom());
    let body = if has_bom {
        &bytes[encoding.bom().len()..]
    } else {
        bytes
    };

    let text = encoding
        .as_encoding_rs()
        .decode_without_bom_handling_and_without_replacement(body)?;

    Some(DecodedText {
        text: text.into_owned(),
        encoding,
        has_bom,
    })
}

/// Encodes text with the given encoding, optionally prefixed with its BOM.
pub fn encode(text: &str, encoding: TextEncoding, with_bom: bool) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() * 2 + 3);
    if with_bom {
        bytes.extend_from_slice(encoding.bom());
    }

    match encoding {
        TextEncoding::Utf8 => bytes.extend_from_slice(text.as_bytes()),
        TextEncoding::Utf16Le => bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes)),
        TextEncoding::Utf16Be => bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes)),
    }

    bytes
}
