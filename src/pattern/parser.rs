//! Route pattern parser.
//!
//! # Responsibilities
//! - Reject patterns without a leading `/`, with a trailing `/` or with empty segments
//! - Recognise `{name}`, `{name}+` and `{name}*` variable segments
//! - Canonicalize literal segments (decode, then re-encode)
//!
//! # Design Decisions
//! - Fail fast with the byte offset of the first problem
//! - Variable names must be unique within a pattern, since each name is
//!   a single binding slot at match time

use std::collections::HashSet;

use crate::error::SyntaxError;
use crate::pattern::encoding::{canonicalize_segment, encode_component, DecodeError};
use crate::pattern::{ParsedRoute, Quantifier, Segment};

/// Parse a route pattern.
///
/// With `literal` set, every segment is taken verbatim and percent-encoded
/// as data; `{`, `}`, `+`, `*` and `%` carry no meaning.
pub fn parse(definition: &str, literal: bool) -> Result<ParsedRoute, SyntaxError> {
    if !definition.starts_with('/') {
        return Err(SyntaxError::new(
            "Routes must start with \"/\"",
            definition,
            0,
        ));
    }
    if definition == "/" {
        return Ok(ParsedRoute {
            segments: vec![Segment::Literal(String::new())],
            source: definition.to_string(),
        });
    }
    if definition.ends_with('/') {
        return Err(SyntaxError::new(
            "Routes with trailing \"/\" not supported",
            definition,
            definition.len() - 1,
        ));
    }

    let mut segments = Vec::new();
    let mut names = HashSet::new();
    let mut start = 1;

    for raw in definition[1..].split('/') {
        if raw.is_empty() {
            return Err(SyntaxError::new(
                "Routes with empty segments not supported",
                definition,
                start - 1,
            ));
        }

        let segment = if literal {
            Segment::Literal(encode_component(raw))
        } else {
            let is_last = start + raw.len() == definition.len();
            parse_segment(definition, raw, start, is_last, &mut names)?
        };

        segments.push(segment);
        start += raw.len() + 1;
    }

    Ok(ParsedRoute {
        segments,
        source: definition.to_string(),
    })
}

fn parse_segment<'a>(
    definition: &str,
    raw: &'a str,
    start: usize,
    is_last: bool,
    names: &mut HashSet<&'a str>,
) -> Result<Segment, SyntaxError> {
    if !raw.starts_with('{') {
        if let Some(index) = raw.find('{') {
            return Err(SyntaxError::new(
                "Route contains illegal token \"{\"",
                definition,
                start + index,
            ));
        }
        return canonicalize_segment(raw)
            .map(Segment::Literal)
            .map_err(|e| {
                let offset = match e {
                    DecodeError::Malformed(offset) => start + offset,
                    DecodeError::NotUtf8 => start,
                };
                SyntaxError::new("Route contains malformed percent-encodings", definition, offset)
            });
    }

    let close = raw[1..].find('}').map(|i| i + 1).ok_or_else(|| {
        SyntaxError::new(
            "Route variable is missing a matching \"}\"",
            definition,
            start,
        )
    })?;

    let name = &raw[1..close];
    if name.is_empty() {
        return Err(SyntaxError::new(
            "Route variable name must not be empty",
            definition,
            start,
        ));
    }
    if let Some(index) = name.find('{') {
        return Err(SyntaxError::new(
            "Route contains illegal token \"{\"",
            definition,
            start + 1 + index,
        ));
    }

    let tail_start = close + 1;
    let quantifier = match &raw[tail_start..] {
        "" => None,
        "+" => Some(Quantifier::Plus),
        "*" => Some(Quantifier::Star),
        tail => {
            // "+x" and "*x" are blamed on the character after the quantifier.
            let skip = usize::from(tail.starts_with(|c| c == '+' || c == '*'));
            let token = tail[skip..].chars().next().unwrap_or_default();
            return Err(SyntaxError::new(
                format!("Route contains illegal token \"{token}\""),
                definition,
                start + tail_start + skip,
            ));
        }
    };

    if quantifier.is_some() && !is_last {
        return Err(SyntaxError::new(
            "Quantified route variables must be the last segment",
            definition,
            start + tail_start,
        ));
    }
    if !names.insert(name) {
        return Err(SyntaxError::new(
            format!("Route contains duplicate variable \"{name}\""),
            definition,
            start,
        ));
    }

    Ok(Segment::Variable {
        name: name.to_string(),
        quantifier,
    })
}
