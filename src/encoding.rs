//! Compact textual state encoding.
//!
//! A [`DrawRequest`] serializes to five hyphen-separated fields,
//! `x1-y1-x2-y2-strategyName`, suitable for embedding in a URL fragment.
//! Everything after the fourth hyphen is the strategy name, so names
//! containing `-` round-trip unchanged. A missing name selects `Null`;
//! unknown names are kept as-is and resolve to the fallback at lookup
//! time, not here.

use crate::error::{Error, Result};
use crate::geometry::Line;
use crate::orchestrator::DrawRequest;
use crate::registry::NULL_STRATEGY;

/// Encode a request as `x1-y1-x2-y2-strategyName`.
#[must_use]
pub fn encode(request: &DrawRequest) -> String {
    let Line { start, end } = request.line;
    format!(
        "{}-{}-{}-{}-{}",
        start.x, start.y, end.x, end.y, request.strategy
    )
}

/// Decode a state string.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] when fewer than four fields are
/// present or a coordinate does not parse as an integer. Callers are
/// expected to recover with [`DrawRequest::random`].
pub fn decode(input: &str) -> Result<DrawRequest> {
    let fields: Vec<&str> = input.split('-').collect();
    if fields.len() < 4 {
        return Err(Error::InvalidEncoding(input.to_string()));
    }

    let mut coords = [0i32; 4];
    for (slot, field) in coords.iter_mut().zip(&fields[..4]) {
        *slot = field
            .parse()
            .map_err(|_| Error::InvalidEncoding(input.to_string()))?;
    }

    let strategy = if fields.len() > 4 {
        fields[4..].join("-")
    } else {
        NULL_STRATEGY.to_string()
    };

    Ok(DrawRequest::new(
        Line::from_coords(coords[0], coords[1], coords[2], coords[3]),
        strategy,
    ))
}

/// Build a shareable location: `base` with any existing fragment
/// stripped, then `#` plus the encoded request.
#[must_use]
pub fn fragment_url(base: &str, request: &DrawRequest) -> String {
    let base = base.split('#').next().unwrap_or(base);
    format!("{base}#{}", encode(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_full_state() {
        let request = decode("5-5-50-50-Null").unwrap();
        assert_eq!(request.line, Line::from_coords(5, 5, 50, 50));
        assert_eq!(request.strategy, "Null");
    }

    #[test]
    fn test_decode_without_name_selects_null() {
        let request = decode("1-2-3-4").unwrap();
        assert_eq!(request.line, Line::from_coords(1, 2, 3, 4));
        assert_eq!(request.strategy, NULL_STRATEGY);
    }

    #[test]
    fn test_too_few_fields_rejected() {
        assert!(decode("1-2-3").is_err());
        assert!(decode("").is_err());
        assert!(decode("12").is_err());
    }

    #[test]
    fn test_non_numeric_coordinate_rejected() {
        assert!(decode("a-2-3-4").is_err());
        assert!(decode("1-2-3-b-Null").is_err());
    }

    #[test]
    fn test_unknown_name_survives_decoding() {
        let request = decode("0-0-10-10-DoesNotExist").unwrap();
        assert_eq!(request.strategy, "DoesNotExist");
    }

    #[test]
    fn test_encode_round_trip() {
        let request = DrawRequest::new(Line::from_coords(3, 7, 120, 44), "Bresenham");
        assert_eq!(decode(&encode(&request)).unwrap(), request);
    }

    #[test]
    fn test_hyphenated_name_round_trips() {
        let request = DrawRequest::new(Line::from_coords(0, 0, 1, 1), "my-fancy-drawer");
        assert_eq!(decode(&encode(&request)).unwrap(), request);
    }

    #[test]
    fn test_fragment_url_strips_existing_fragment() {
        let request = DrawRequest::new(Line::from_coords(5, 5, 50, 50), "Null");
        assert_eq!(
            fragment_url("https://example.test/app#1-1-2-2-Old", &request),
            "https://example.test/app#5-5-50-50-Null"
        );
        assert_eq!(
            fragment_url("https://example.test/app", &request),
            "https://example.test/app#5-5-50-50-Null"
        );
    }

    proptest! {
        /// Encoding then decoding returns the original request exactly.
        #[test]
        fn prop_round_trip(
            x1 in 0i32..2000,
            y1 in 0i32..2000,
            x2 in 0i32..2000,
            y2 in 0i32..2000,
            name in "[A-Za-z][A-Za-z0-9_-]{0,24}"
        ) {
            let request = DrawRequest::new(
                Line::from_coords(x1, y1, x2, y2),
                name,
            );
            prop_assert_eq!(decode(&encode(&request)).unwrap(), request);
        }
    }
}
