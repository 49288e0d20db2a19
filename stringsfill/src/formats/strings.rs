//! Support for the Apple `.strings` key/value format.
//!
//! A file is a sequence of `"KEY" = "VALUE";` statements. Anything between
//! statements (comments, blank lines, stray text) is ignored and is never
//! reproduced on output.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, traits::Parser};

lazy_static! {
    // Quoted key (no quotes or newlines), `=`, opening quote of the value.
    static ref STATEMENT_HEAD: Regex = Regex::new(r#""([^"\n]*)"\s*=\s*""#).unwrap();
    // A value ends at the first quote followed by optional whitespace and `;`.
    static ref VALUE_END: Regex = Regex::new(r#""\s*;"#).unwrap();
}

/// Represents the statements of one `.strings` file, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// All key-value pairs, duplicates included.
    pub pairs: Vec<Pair>,
}

impl Format {
    /// Parses every well-formed statement in `content`.
    ///
    /// Malformed statements are skipped, so this never fails.
    pub fn parse(content: &str) -> Self {
        let mut pairs = Vec::new();
        let mut cursor = 0;

        while let Some(head) = STATEMENT_HEAD.captures_at(content, cursor) {
            let (Some(whole), Some(key)) = (head.get(0), head.get(1)) else {
                break;
            };
            // Without a terminator after this value no later statement can
            // terminate either.
            let Some(end) = VALUE_END.find_at(content, whole.end()) else {
                break;
            };

            pairs.push(Pair {
                key: key.as_str().to_string(),
                value: content[whole.end()..end.start()].to_string(),
            });
            cursor = end.end();
        }

        Format { pairs }
    }

    /// Builds the statements for `map`.
    ///
    /// With `order`, keys follow that order; order entries missing from the
    /// map are skipped and repeated ones emitted once. Without it, keys are
    /// sorted.
    pub fn from_map(map: &BTreeMap<String, String>, order: Option<&[String]>) -> Self {
        let pairs = match order {
            Some(order) => {
                let mut seen = HashSet::new();
                order
                    .iter()
                    .filter(|key| seen.insert(key.as_str()))
                    .filter_map(|key| {
                        map.get(key).map(|value| Pair {
                            key: key.clone(),
                            value: value.clone(),
                        })
                    })
                    .collect()
            }
            None => map
                .iter()
                .map(|(key, value)| Pair {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        };

        Format { pairs }
    }

    /// Keys in file order, duplicates included.
    pub fn keys(&self) -> Vec<String> {
        self.pairs.iter().map(|pair| pair.key.clone()).collect()
    }

    /// Keys in order of first appearance.
    pub fn unique_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.pairs
            .iter()
            .filter(|pair| seen.insert(pair.key.as_str()))
            .map(|pair| pair.key.clone())
            .collect()
    }

    /// Key to value mapping; the last occurrence of a key wins.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.pairs
            .iter()
            .map(|pair| (pair.key.clone(), pair.value.clone()))
            .collect()
    }
}

impl Display for Format {
    /// One statement per line, no trailing newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, pair) in self.pairs.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", pair)?;
        }
        Ok(())
    }
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Format::parse(&content))
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(self.to_string().as_bytes())
            .map_err(Error::Io)
    }
}

/// A single key-value statement of a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// The key for this localization entry.
    pub key: String,
    /// The value, verbatim (escape sequences are not interpreted).
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Pair {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" = \"{}\";", self.key, self.value)
    }
}
