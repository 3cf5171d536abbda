//! # Version tags
//!
//! Prompt files carry their revision in the file name:
//! `<use_case>_v<major>[.<minor>]<ext>`, e.g. `technical_doc_v2.md` or
//! `email_response_v1.5.md`.
//!
//! Tags are ordered by a normalized numeric key, `major + minor / 10`. The key
//! is kept for compatibility with existing prompt trees even though multi-digit
//! minors overflow into the major: `1.10` ranks together with `2.0`, and `1.20`
//! (key 3.0) ranks above `2.9`. When two tags share a key the verbatim version
//! strings are compared lexicographically, so the order is total and never
//! depends on directory enumeration order.
//!
//! Components are read as `f64`, so arbitrarily long digit runs still parse.

use nom::IResult;
use nom::Parser;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map_res, opt};
use nom::sequence::preceded;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A parsed `<major>[.<minor>]` version tag.
#[derive(Debug, Clone)]
pub struct VersionTag {
    raw: String,
    major: f64,
    minor: Option<f64>,
}

impl VersionTag {
    /// Parses a bare version string such as `"2"` or `"1.5"`.
    ///
    /// Returns `None` unless the whole input is `\d+(\.\d+)?`.
    pub fn parse(raw: &str) -> Option<VersionTag> {
        let (_, (major, minor)) = all_consuming(parse_version).parse(raw).ok()?;
        Some(VersionTag {
            raw: raw.to_string(),
            major,
            minor,
        })
    }

    /// The version exactly as written in the file name.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> f64 {
        self.major
    }

    pub fn minor(&self) -> Option<f64> {
        self.minor
    }

    /// The normalized comparison key: `major + minor / 10`.
    pub fn key(&self) -> f64 {
        self.major + self.minor.map_or(0.0, |minor| minor / 10.0)
    }
}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key()
            .total_cmp(&other.key())
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionTag {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionTag {}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for VersionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(digit1, |digits: &str| digits.parse::<f64>()).parse(input)
}

pub fn parse_version(input: &str) -> IResult<&str, (f64, Option<f64>)> {
    (number, opt(preceded(char('.'), number))).parse(input)
}

/// Splits a versioned file name into its use case and version tag.
///
/// `extension` must include its leading dot (or be empty). The use case is
/// everything before the last `_v`, and must not be empty.
pub fn split_versioned_name<'a>(
    file_name: &'a str,
    extension: &str,
) -> Option<(&'a str, VersionTag)> {
    let stem = file_name.strip_suffix(extension)?;
    let marker = stem.rfind("_v")?;
    let use_case = &stem[..marker];
    if use_case.is_empty() {
        return None;
    }
    let version = VersionTag::parse(&stem[marker + 2..])?;
    Some((use_case, version))
}
