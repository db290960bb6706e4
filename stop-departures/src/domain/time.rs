//! NexTrip departure time decoding.
//!
//! NexTrip encodes departure times in the legacy ASP.NET JSON date format,
//! e.g. `"\/Date(1500000000000-0500)\/"`. The value is a millisecond count
//! since the Unix epoch followed by an informational UTC offset. We decode
//! from the raw JSON token (quotes and escaped slashes included), which is
//! always 30 bytes long for any instant between 2001 and 2286.

use std::num::ParseIntError;
use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Length of an encoded departure time token, in bytes.
pub const ENCODED_LEN: usize = 30;

/// Byte range holding the epoch seconds: the first ten digits after `"\/Date(`.
const EPOCH_DIGITS: Range<usize> = 8..18;

/// Error returned when a departure time token cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTimestamp {
    /// The token is not exactly [`ENCODED_LEN`] bytes.
    #[error("date is wrong length: {actual} expected {expected}")]
    WrongLength { actual: usize, expected: usize },

    /// The epoch digits are not a base-10 integer.
    #[error("invalid epoch seconds {digits:?}: {source}")]
    InvalidEpoch {
        digits: String,
        #[source]
        source: ParseIntError,
    },

    /// The epoch seconds do not fit in a `DateTime<Utc>`.
    #[error("epoch seconds {0} out of range")]
    OutOfRange(i64),
}

/// Decode a raw departure time token into a UTC instant.
///
/// # Examples
///
/// ```
/// use stop_departures::domain::decode_departure_time;
///
/// let t = decode_departure_time(r#""\/Date(1500000000000-0500)\/""#).unwrap();
/// assert_eq!(t.to_rfc3339(), "2017-07-14T02:40:00+00:00");
///
/// assert!(decode_departure_time("/Date(1500000000000-0500)/").is_err());
/// ```
pub fn decode_departure_time(raw: &str) -> Result<DateTime<Utc>, MalformedTimestamp> {
    if raw.len() != ENCODED_LEN {
        return Err(MalformedTimestamp::WrongLength {
            actual: raw.len(),
            expected: ENCODED_LEN,
        });
    }

    // Slice bytes so a multi-byte character can't panic on a char boundary.
    // Lossy conversion turns any such byte into a replacement char, which
    // then fails the integer parse below.
    let digits = String::from_utf8_lossy(&raw.as_bytes()[EPOCH_DIGITS]);
    let seconds: i64 = digits
        .parse()
        .map_err(|source| MalformedTimestamp::InvalidEpoch {
            digits: digits.to_string(),
            source,
        })?;

    DateTime::from_timestamp(seconds, 0).ok_or(MalformedTimestamp::OutOfRange(seconds))
}

/// Serde adapter: decode `DepartureTime` from its raw JSON token.
pub(crate) fn deserialize_departure_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    decode_departure_time(raw.get()).map_err(serde::de::Error::custom)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_ten_digit_epoch_decodes(seconds in 1_000_000_000i64..10_000_000_000, millis in 0u32..1000) {
            let raw = format!(r#""\/Date({seconds}{millis:03}-0600)\/""#);
            prop_assert_eq!(raw.len(), ENCODED_LEN);
            let t = decode_departure_time(&raw).unwrap();
            prop_assert_eq!(t.timestamp(), seconds);
        }

        #[test]
        fn other_lengths_are_rejected(raw in "\\PC{0,60}") {
            prop_assume!(raw.len() != ENCODED_LEN);
            let is_wrong_length = matches!(
                decode_departure_time(&raw),
                Err(MalformedTimestamp::WrongLength { actual, expected: ENCODED_LEN }) if actual == raw.len()
            );
            prop_assert!(is_wrong_length);
        }
    }
}
