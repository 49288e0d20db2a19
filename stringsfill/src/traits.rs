//! Traits for parsing and serializing string tables.

use std::io::{BufRead, Cursor, Write};

use crate::error::Error;

/// A trait for parsing and writing a string table from/to text.
///
/// Byte-level decoding is not part of this trait: readers and writers carry
/// UTF-8 text. See [`crate::encoding`] for the on-disk representation.
///
/// # Example
///
/// ```rust
/// use stringsfill::traits::Parser;
/// use stringsfill::formats::StringsFormat;
///
/// let format = StringsFormat::from_str("\"hello\" = \"Bonjour\";")?;
/// let mut out = Vec::new();
/// format.to_writer(&mut out)?;
/// assert_eq!(out, b"\"hello\" = \"Bonjour\";");
/// Ok::<(), stringsfill::Error>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}
