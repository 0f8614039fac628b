//! Encoded-polyline codec for route geometry.
//!
//! Implements the Google polyline algorithm at `1e-5` precision: two
//! interleaved signed-delta streams (latitude, longitude), each delta
//! zig-zag encoded into 5-bit groups with continuation bit `0x20` and
//! offset 63. Route geometry arrives from the directions provider in this
//! form; the decoded coordinate sequence is the in-core representation.
//!
//! Malformed input decodes to an explicit [`PolylineError`] rather than
//! panicking or producing garbage coordinates.

use geo::Coord;
use thiserror::Error;

/// Scale factor between degrees and encoded integer units.
const PRECISION: f64 = 1e5;

/// Errors raised while decoding an encoded polyline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    /// A byte outside the printable encoding alphabet (`?`..`~`).
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidByte {
        /// Offending byte value.
        byte: u8,
        /// Byte offset within the encoded string.
        offset: usize,
    },
    /// Input ended in the middle of a 5-bit group sequence.
    #[error("unterminated coordinate group at offset {offset}")]
    UnterminatedGroup {
        /// Byte offset where input ran out.
        offset: usize,
    },
    /// A group sequence carried more bits than a coordinate delta can hold.
    #[error("coordinate group overflow at offset {offset}")]
    GroupOverflow {
        /// Byte offset of the overflowing group.
        offset: usize,
    },
    /// A latitude delta had no matching longitude delta.
    #[error("dangling latitude with no longitude at offset {offset}")]
    MissingLongitude {
        /// Byte offset where the longitude was expected.
        offset: usize,
    },
}

/// Decode an encoded polyline into an ordered coordinate sequence.
///
/// An empty input yields an empty path.
///
/// # Errors
/// Returns [`PolylineError`] when the input contains a byte outside the
/// encoding alphabet, ends mid-group, or pairs a latitude with no
/// longitude.
///
/// # Examples
/// ```
/// use roadside_core::polyline;
///
/// let path = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@")?;
/// assert_eq!(path.len(), 3);
/// assert!((path[0].y - 38.5).abs() < 1e-9);
/// assert!((path[0].x - -120.2).abs() < 1e-9);
/// # Ok::<(), polyline::PolylineError>(())
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coord<f64>>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut pos = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;
    let mut path = Vec::new();

    while pos < bytes.len() {
        lat += read_delta(bytes, &mut pos)?;
        if pos >= bytes.len() {
            return Err(PolylineError::MissingLongitude { offset: pos });
        }
        lng += read_delta(bytes, &mut pos)?;
        path.push(to_degrees(lat, lng));
    }

    Ok(path)
}

/// Encode a coordinate sequence into the polyline wire form.
///
/// Inverse of [`decode`] at `1e-5` precision: decoding the result yields
/// the input path with each coordinate rounded to five decimal places.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use roadside_core::polyline;
///
/// let path = vec![
///     Coord { x: -120.2, y: 38.5 },
///     Coord { x: -120.95, y: 40.7 },
///     Coord { x: -126.453, y: 43.252 },
/// ];
/// assert_eq!(polyline::encode(&path), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// ```
#[must_use]
pub fn encode(path: &[Coord<f64>]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in path {
        let lat = to_units(point.y);
        let lng = to_units(point.x);
        write_delta(lat - prev_lat, &mut out);
        write_delta(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Read one zig-zag encoded delta, advancing `pos` past its groups.
fn read_delta(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut shift = 0u32;
    let mut acc = 0i64;

    loop {
        let Some(&raw) = bytes.get(*pos) else {
            return Err(PolylineError::UnterminatedGroup { offset: *pos });
        };
        if !(63..=126).contains(&raw) {
            return Err(PolylineError::InvalidByte {
                byte: raw,
                offset: *pos,
            });
        }
        if shift > 60 {
            return Err(PolylineError::GroupOverflow { offset: *pos });
        }
        *pos += 1;

        let group = i64::from(raw - 63);
        acc |= (group & 0x1f) << shift;
        shift += 5;
        if group < 0x20 {
            break;
        }
    }

    // Zig-zag: the low bit carries the sign.
    if acc & 1 == 1 {
        Ok(!(acc >> 1))
    } else {
        Ok(acc >> 1)
    }
}

/// Append one delta as zig-zag 5-bit groups.
fn write_delta(delta: i64, out: &mut String) {
    let mut value = (delta << 1) ^ (delta >> 63);
    while value >= 0x20 {
        out.push(group_char((value & 0x1f) | 0x20));
        value >>= 5;
    }
    out.push(group_char(value));
}

/// Map a 6-bit group value onto the printable alphabet.
fn group_char(group: i64) -> char {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "group is masked to six bits before the offset is applied"
    )]
    let byte = (group + 63) as u8;
    char::from(byte)
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "encoded units stay far below f64's integer precision limit"
)]
fn to_degrees(lat: i64, lng: i64) -> Coord<f64> {
    Coord {
        x: lng as f64 / PRECISION,
        y: lat as f64 / PRECISION,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::float_arithmetic,
    reason = "degrees scaled by 1e5 fit comfortably in i64"
)]
fn to_units(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}
