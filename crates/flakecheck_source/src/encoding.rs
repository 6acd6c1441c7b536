//! Text encodings a Python source file may declare.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A character encoding used to turn source text into parser input bytes.
///
/// Labels follow the names Python accepts for the same codecs, so an
/// editor's declared file encoding can be passed straight through
/// [`from_label`](Self::from_label).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// UTF-8 without a byte order mark.
    Utf8,
    /// UTF-16, little-endian with a leading byte order mark.
    Utf16,
    /// UTF-16 little-endian, no byte order mark.
    Utf16Le,
    /// UTF-16 big-endian, no byte order mark.
    Utf16Be,
    /// ISO-8859-1: every code point below U+0100 maps to one byte.
    Latin1,
    /// 7-bit ASCII.
    Ascii,
}

/// A character that the target encoding cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{encoding}' codec can't encode character {ch:?} in position {position}")]
pub struct EncodeError {
    /// The encoding that rejected the character.
    pub encoding: TextEncoding,
    /// Character index (not byte offset) of the offending character.
    pub position: usize,
    /// The offending character.
    pub ch: char,
}

/// Bytes that are not valid in the given encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{encoding}' codec can't decode byte at position {position}")]
pub struct DecodeError {
    /// The encoding used for decoding.
    pub encoding: TextEncoding,
    /// Byte offset of the first invalid sequence.
    pub position: usize,
}

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

impl TextEncoding {
    /// Every supported encoding.
    pub const ALL: [TextEncoding; 6] = [
        TextEncoding::Utf8,
        TextEncoding::Utf16,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
        TextEncoding::Latin1,
        TextEncoding::Ascii,
    ];

    /// Resolves an encoding label such as `"utf-8"`, `"UTF8"` or `"latin-1"`.
    ///
    /// Matching ignores case and `-`, `_` and space separators. Returns `None`
    /// for labels that name no supported encoding.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" | "u8" | "utf" | "cp65001" => Some(TextEncoding::Utf8),
            "utf16" | "u16" => Some(TextEncoding::Utf16),
            "utf16le" => Some(TextEncoding::Utf16Le),
            "utf16be" => Some(TextEncoding::Utf16Be),
            "latin1" | "latin" | "l1" | "iso88591" | "8859" | "cp819" => {
                Some(TextEncoding::Latin1)
            }
            "ascii" | "usascii" | "646" => Some(TextEncoding::Ascii),
            _ => None,
        }
    }

    /// Returns the canonical label for this encoding.
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf16Le => "utf-16-le",
            TextEncoding::Utf16Be => "utf-16-be",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// Encodes `text` into bytes.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodeError> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Utf16 => {
                let mut out = UTF16_LE_BOM.to_vec();
                out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                Ok(out)
            }
            TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Latin1 => self.encode_single_byte(text, 0xFF),
            TextEncoding::Ascii => self.encode_single_byte(text, 0x7F),
        }
    }

    /// Decodes `bytes` into text.
    ///
    /// Plain `utf-16` honors a leading byte order mark in either order and
    /// falls back to little-endian without one.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|e| DecodeError {
                    encoding: self,
                    position: e.valid_up_to(),
                }),
            TextEncoding::Utf16 => {
                if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
                    self.decode_utf16(rest, 2, u16::from_le_bytes)
                } else if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
                    self.decode_utf16(rest, 2, u16::from_be_bytes)
                } else {
                    self.decode_utf16(bytes, 0, u16::from_le_bytes)
                }
            }
            TextEncoding::Utf16Le => self.decode_utf16(bytes, 0, u16::from_le_bytes),
            TextEncoding::Utf16Be => self.decode_utf16(bytes, 0, u16::from_be_bytes),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err(DecodeError {
                    encoding: self,
                    position,
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
        }
    }

    fn encode_single_byte(self, text: &str, max: u32) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(text.len());
        for (position, ch) in text.chars().enumerate() {
            let code = u32::from(ch);
            if code > max {
                return Err(EncodeError {
                    encoding: self,
                    position,
                    ch,
                });
            }
            out.push(code as u8);
        }
        Ok(out)
    }

    fn decode_utf16(
        self,
        bytes: &[u8],
        offset: usize,
        to_unit: fn([u8; 2]) -> u16,
    ) -> Result<String, DecodeError> {
        if bytes.len() % 2 != 0 {
            return Err(DecodeError {
                encoding: self,
                position: offset + bytes.len() - 1,
            });
        }
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| to_unit([pair[0], pair[1]]))
            .collect();
        let mut out = String::with_capacity(units.len());
        for (index, decoded) in char::decode_utf16(units.iter().copied()).enumerate() {
            match decoded {
                Ok(ch) => out.push(ch),
                Err(_) => {
                    return Err(DecodeError {
                        encoding: self,
                        position: offset + index * 2,
                    })
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
