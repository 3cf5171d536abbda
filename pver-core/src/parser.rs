//! # Prompt file parser
//!
//! Prompt files are written in a small markdown dialect:
//!
//! ````text
//! # Customer Operations Email Response Prompt v1.0
//!
//! ## Business Unit
//! Customer Operations
//!
//! ## Prompt Content
//! ```
//! Craft a professional customer service email response.
//! ```
//!
//! ## Status
//! Active
//! ````
//!
//! [`parse`] turns such a document into a metadata map (one entry per `##`
//! section plus the `# ` title) and the text of the fenced block under
//! `## Prompt Content`. Parsing never fails: unexpected input only results in
//! missing metadata or empty content.
//!
//! Fences inside the Prompt Content section toggle capture on and off, so a
//! section with more than one fenced block captures every other stretch of
//! lines between fences, and an unclosed fence captures everything up to the
//! end of the document.

use crate::artifact::{Metadata, MetadataValue};
use nom::IResult;
use nom::Parser;
use nom::bytes::complete::tag;
use nom::combinator::{recognize, rest};
use nom::sequence::preceded;
use std::collections::BTreeMap;

const PROMPT_CONTENT_HEADING: &str = "Prompt Content";
const TITLE_KEY: &str = "title";

/// The result of parsing one prompt file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPrompt {
    pub metadata: Metadata,
    pub content: String,
}

/// A single trimmed line of a prompt file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line<'a> {
    Fence,
    Section(&'a str),
    Title(&'a str),
    Text(&'a str),
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Preamble,
    Section(String),
    PromptContent,
}

pub fn parse_fence(input: &str) -> IResult<&str, &str> {
    recognize(preceded(tag("```"), rest)).parse(input)
}

pub fn parse_section_heading(input: &str) -> IResult<&str, &str> {
    preceded(tag("## "), rest).parse(input)
}

pub fn parse_title_heading(input: &str) -> IResult<&str, &str> {
    preceded(tag("# "), rest).parse(input)
}

/// Classifies an already trimmed line.
pub fn classify_line(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }

    if parse_fence(line).is_ok() {
        return Line::Fence;
    }
    if let Ok((_, heading)) = parse_section_heading(line) {
        return Line::Section(heading.trim());
    }
    if let Ok((_, title)) = parse_title_heading(line) {
        return Line::Title(title.trim());
    }
    Line::Text(line)
}

/// Turns heading text into a metadata key: `"Business Unit"` -> `"business_unit"`.
///
/// Every space becomes an underscore, so runs of spaces are kept as runs.
pub fn section_key(heading: &str) -> String {
    heading.to_lowercase().replace(' ', "_")
}

/// Parses the text of a prompt file.
pub fn parse(raw: &str) -> ParsedPrompt {
    let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut content: Vec<&str> = Vec::new();
    let mut mode = Mode::Preamble;
    let mut in_fence = false;

    for line in raw.split('\n').map(str::trim) {
        let classified = classify_line(line);

        if in_fence {
            match classified {
                Line::Fence => in_fence = false,
                _ => content.push(line),
            }
            continue;
        }

        match classified {
            Line::Section(heading) if heading == PROMPT_CONTENT_HEADING => {
                mode = Mode::PromptContent;
            }
            Line::Section(heading) => {
                mode = Mode::Section(section_key(heading));
            }
            Line::Title(title) if mode == Mode::Preamble => {
                sections.insert(TITLE_KEY.to_string(), vec![title.to_string()]);
            }
            Line::Fence if mode == Mode::PromptContent => in_fence = true,
            Line::Fence | Line::Blank => {}
            Line::Title(_) | Line::Text(_) => {
                if let Mode::Section(name) = &mode {
                    sections
                        .entry(name.clone())
                        .or_default()
                        .push(line.to_string());
                }
            }
        }
    }

    let metadata = sections
        .into_iter()
        .map(|(key, mut lines)| {
            let value = if lines.len() == 1 {
                MetadataValue::Scalar(lines.remove(0))
            } else {
                MetadataValue::List(lines)
            };
            (key, value)
        })
        .collect();

    ParsedPrompt {
        metadata,
        content: content.join("\n"),
    }
}
