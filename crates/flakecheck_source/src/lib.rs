//! Source units and text encodings for Python files handed to the checker.
//!
//! This crate provides the [`SourceUnit`] bundle (text, identifier, declared
//! encoding) consumed by the diagnostics adapter, and the [`TextEncoding`]
//! codecs used to turn that text into the bytes the parser sees.

#![warn(missing_docs)]

pub mod encoding;
pub mod source_unit;

pub use encoding::{DecodeError, EncodeError, TextEncoding};
pub use source_unit::SourceUnit;
