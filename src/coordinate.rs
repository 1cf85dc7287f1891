use std::fmt;

use strum_macros::Display;
use thiserror::Error;

const DEGREE_SYMBOL: char = '°';
const SEPARATOR: &str = ", ";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum MalformedReason {
    #[strum(serialize = "missing separator")]
    MissingSeparator,
    #[strum(serialize = "missing degree symbol")]
    MissingDegreeSymbol,
    #[strum(serialize = "invalid number")]
    InvalidNumber,
    #[strum(serialize = "out of range")]
    OutOfRange,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("malformed coordinate {text:?}: {reason}")]
    MalformedCoordinate {
        text: String,
        reason: MalformedReason,
    },
}

impl DecodeError {
    fn malformed(text: &str, reason: MalformedReason) -> Self {
        DecodeError::MalformedCoordinate {
            text: text.to_owned(),
            reason,
        }
    }

    pub fn reason(&self) -> MalformedReason {
        match self {
            DecodeError::MalformedCoordinate { reason, .. } => *reason,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting anything outside [-90, 90] x [-180, 180].
    /// Values are never clamped.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DecodeError> {
        if !in_range(latitude, 90.0) || !in_range(longitude, 180.0) {
            return Err(DecodeError::malformed(
                &format!("{latitude}{DEGREE_SYMBOL}{SEPARATOR}{longitude}{DEGREE_SYMBOL}"),
                MalformedReason::OutOfRange,
            ));
        }
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }

    // exact bit pattern, used for coincidence checks
    pub(crate) fn bits_key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DEGREE_SYMBOL}{SEPARATOR}{}{DEGREE_SYMBOL}",
            self.latitude, self.longitude
        )
    }
}

fn in_range(value: f64, limit: f64) -> bool {
    value.is_finite() && (-limit..=limit).contains(&value)
}

/// Decodes the exporter's textual form, e.g. `"43.2606921°, -80.0979546°"`.
///
/// The grammar is narrow on purpose: exactly one `", "` separator and a
/// trailing degree symbol on both components.
pub fn decode(text: &str) -> Result<Coordinate, DecodeError> {
    let parts: Vec<&str> = text.split(SEPARATOR).collect();
    let [lat_part, lng_part] = parts.as_slice() else {
        return Err(DecodeError::malformed(text, MalformedReason::MissingSeparator));
    };
    let latitude = decode_component(text, lat_part)?;
    let longitude = decode_component(text, lng_part)?;
    if !in_range(latitude, 90.0) || !in_range(longitude, 180.0) {
        return Err(DecodeError::malformed(text, MalformedReason::OutOfRange));
    }
    Ok(Coordinate {
        latitude,
        longitude,
    })
}

fn decode_component(text: &str, part: &str) -> Result<f64, DecodeError> {
    let number = part
        .strip_suffix(DEGREE_SYMBOL)
        .ok_or_else(|| DecodeError::malformed(text, MalformedReason::MissingDegreeSymbol))?;
    if !is_plain_decimal(number) {
        return Err(DecodeError::malformed(text, MalformedReason::InvalidNumber));
    }
    number
        .parse::<f64>()
        .map_err(|_| DecodeError::malformed(text, MalformedReason::InvalidNumber))
}

// `f64::from_str` also takes "inf", "NaN" and exponents, none of which the
// exporter produces.
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let all_digits = |x: &str| x.bytes().all(|b| b.is_ascii_digit());
    match unsigned.split_once('.') {
        None => !unsigned.is_empty() && all_digits(unsigned),
        Some((int_part, frac_part)) => {
            !frac_part.is_empty() && all_digits(int_part) && all_digits(frac_part)
        }
    }
}
