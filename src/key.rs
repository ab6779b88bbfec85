//! Decomposes dotted metric keys into a metric name plus dimensions.
//!
//! Keys are laid out as `application.host.metric[.query.status]`:
//!
//! ```
//! use metriqs_cloudwatch::key::parse;
//!
//! let parsed = parse("appA.host1.getUsers.GET.200");
//! assert_eq!(&*parsed.metric_name, "getUsers");
//! assert_eq!(parsed.dimension("status"), Some("200"));
//! ```

use nom::branch::alt;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{opt, recognize};
use nom::sequence::{pair, preceded};
use nom::IResult;
use string_cache::DefaultAtom as Atom;

use super::metric::{Dimension, ParsedName};

/// Stands in for any segment the key does not provide.
pub const UNKNOWN: &str = "unknown";

pub const APPLICATION: &str = "application";
pub const HOST: &str = "host";
pub const QUERY: &str = "query";
pub const STATUS: &str = "status";

/// Parse a metric key. Every string has a result; malformed keys degrade to
/// `"unknown"` placeholders rather than failing.
pub fn parse(key: &str) -> ParsedName {
    let segments: Vec<&str> = key.split('.').collect();

    let application = segment_or_unknown(&segments, 0);
    let host = segment_or_unknown(&segments, 1);

    // The last two segments are a query method and status code when the key
    // ends in something integer-like. Needs more than two segments.
    let operation = match segments.len() {
        count if count > 2 && is_integer_like(segments[count - 1]) => {
            Some((segments[count - 2], segments[count - 1]))
        }
        _ => None,
    };

    let end = match operation {
        Some(_) => segments.len() - 2,
        None => segments.len(),
    };
    let residual = if end > 2 {
        segments[2..end].join(".")
    } else {
        String::new()
    };

    let metric_name = if !residual.is_empty() {
        Atom::from(residual)
    } else if !key.is_empty() {
        Atom::from(key)
    } else {
        Atom::from(UNKNOWN)
    };

    let mut dimensions: Vec<Dimension> = vec![
        (Atom::from(APPLICATION), application),
        (Atom::from(HOST), host),
    ];
    if let Some((query, status)) = operation {
        dimensions.push((Atom::from(QUERY), Atom::from(query)));
        dimensions.push((Atom::from(STATUS), Atom::from(status)));
    }

    ParsedName {
        metric_name,
        dimensions,
    }
}

fn segment_or_unknown(segments: &[&str], index: usize) -> Atom {
    match segments.get(index) {
        Some(segment) if !segment.is_empty() => Atom::from(*segment),
        _ => Atom::from(UNKNOWN),
    }
}

/// Whether the segment starts with an integer, `parseInt`-style: leading
/// whitespace and a sign are allowed and anything after the digits is
/// ignored, so `"200abc"` counts.
fn is_integer_like(segment: &str) -> bool {
    leading_integer(segment).is_ok()
}

fn leading_integer(input: &str) -> IResult<&str, &str> {
    preceded(
        multispace0,
        recognize(pair(opt(alt((char('+'), char('-')))), digit1)),
    )(input)
}
