//! Encoded polyline format (precision 1e5)
//!
//! Each coordinate is stored as the signed delta from the previous point,
//! latitude first. A delta is zig-zag encoded and split into 5-bit groups,
//! least significant first; every group except the last carries the
//! continuation bit `0x20`, and each group is offset by 63 so the output
//! stays in the printable range `?`..=`~`.
//!
//! Decoding is strict: a byte outside that range, a group that never
//! terminates, or a dangling latitude without its longitude is an error
//! rather than a silently wrong point.

use thiserror::Error;

use crate::value_objects::Coordinate;

const PRECISION: f64 = 1e5;
const OFFSET: u8 = 63;
const CONTINUATION: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
/// Seven 5-bit groups cover every delta a valid coordinate can produce
const MAX_SHIFT: u32 = 30;

/// Errors produced while decoding an encoded polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// Input ended inside a value or between latitude and longitude
    #[error("polyline truncated at position {position}")]
    Truncated {
        /// Byte offset where more input was expected
        position: usize,
    },

    /// Byte outside the `63..=126` encoding window
    #[error("invalid polyline byte 0x{byte:02x} at position {position}")]
    InvalidCharacter {
        /// Byte offset of the offending byte
        position: usize,
        /// The offending byte
        byte: u8,
    },

    /// A single value spans more groups than any coordinate delta needs
    #[error("polyline value overflows at position {position}")]
    Overflow {
        /// Byte offset where the overflow was detected
        position: usize,
    },

    /// Accumulated point lies outside the valid coordinate range
    #[error("polyline point {index} is out of range")]
    OutOfRange {
        /// Zero-based index of the offending point
        index: usize,
    },
}

/// Decode an encoded polyline into coordinates
///
/// An empty string decodes to an empty vector.
///
/// # Errors
///
/// Returns a [`PolylineError`] for malformed input.
#[allow(clippy::cast_precision_loss)] // accumulated values stay well below 2^52
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut position = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while position < bytes.len() {
        lat += next_delta(bytes, &mut position)?;
        if position >= bytes.len() {
            return Err(PolylineError::Truncated { position });
        }
        lng += next_delta(bytes, &mut position)?;

        let point = Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION)
            .map_err(|_| PolylineError::OutOfRange {
                index: points.len(),
            })?;
        points.push(point);
    }

    Ok(points)
}

/// Encode coordinates as a polyline, rounding each to 5 decimal places
#[must_use]
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat = 0;
    let mut prev_lng = 0;

    for point in points {
        let lat = to_fixed(point.lat());
        let lng = to_fixed(point.lng());
        push_delta(lat - prev_lat, &mut out);
        push_delta(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn next_delta(bytes: &[u8], position: &mut usize) -> Result<i64, PolylineError> {
    let mut value: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*position) else {
            return Err(PolylineError::Truncated {
                position: *position,
            });
        };
        if !(OFFSET..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                position: *position,
                byte,
            });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow {
                position: *position,
            });
        }

        let chunk = i64::from(byte - OFFSET);
        value |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *position += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    Ok(if value & 1 == 0 {
        value >> 1
    } else {
        !(value >> 1)
    })
}

#[allow(clippy::cast_possible_truncation)] // |value| <= 18_000_000
fn to_fixed(value: f64) -> i64 {
    (value * PRECISION).round() as i64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // values are masked to 0..64
fn push_delta(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= CONTINUATION {
        out.push(char::from(((CONTINUATION | (value & CHUNK_MASK)) as u8) + OFFSET));
        value >>= 5;
    }
    out.push(char::from((value as u8) + OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn point(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn empty_input_is_empty_path() {
        assert_eq!(decode("").unwrap(), Vec::new());
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn decodes_canonical_vector() {
        let points = decode(CANONICAL).unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        assert_eq!(points.len(), expected.len());
        for (p, (lat, lng)) in points.iter().zip(expected) {
            assert!((p.lat() - lat).abs() < 1e-9, "lat {} != {lat}", p.lat());
            assert!((p.lng() - lng).abs() < 1e-9, "lng {} != {lng}", p.lng());
        }
    }

    #[test]
    fn encodes_canonical_vector() {
        let points = [
            point(38.5, -120.2),
            point(40.7, -120.95),
            point(43.252, -126.453),
        ];
        assert_eq!(encode(&points), CANONICAL);
    }

    #[test]
    fn truncated_inside_value() {
        // 'i' carries the continuation bit and nothing follows
        assert_eq!(
            decode("_p~i"),
            Err(PolylineError::Truncated { position: 4 })
        );
    }

    #[test]
    fn latitude_without_longitude() {
        assert_eq!(
            decode("_p~iF"),
            Err(PolylineError::Truncated { position: 5 })
        );
    }

    #[test]
    fn rejects_bytes_outside_window() {
        assert!(matches!(
            decode("_p~iF ps|U"),
            Err(PolylineError::InvalidCharacter { position: 5, byte: b' ' })
        ));
        assert!(matches!(
            decode("_p~iF~ps|Ué"),
            Err(PolylineError::InvalidCharacter { position: 10, .. })
        ));
    }

    #[test]
    fn rejects_endless_group() {
        assert!(matches!(
            decode("~~~~~~~~~~"),
            Err(PolylineError::Overflow { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_point() {
        // latitude delta of +100 degrees
        let encoded = encode(&[point(50.0, 0.0)]) + &encode(&[point(50.0, 0.0)]);
        assert_eq!(decode(&encoded), Err(PolylineError::OutOfRange { index: 1 }));
    }
}
