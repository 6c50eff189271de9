//! Parameter value parsing with unit suffixes.

use crate::error::{Result, StompError};

/// Recognized unit suffixes and their scale factors.
///
/// The table is scanned in order and the first suffix found anywhere in the
/// token wins, so `meg` must stay ahead of `m` and `g` to keep `100meg`
/// parsing as 1e8 rather than 1e-1 or 1e11.
const UNIT_SCALES: [(&str, f64); 9] = [
    ("meg", 1e6),
    ("f", 1e-15),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("m", 1e-3),
    ("k", 1e3),
    ("g", 1e9),
    ("t", 1e12),
];

/// Parse a parameter token into a number.
///
/// The numeric portion is the leading run of ASCII digits; an optional unit
/// suffix from [`UNIT_SCALES`] scales it. `100meg` parses to 1e8, `47u` to
/// 4.7e-5, `1000` to 1000.0. A token with no leading digits is rejected.
pub fn parse_value(token: &str, line: usize) -> Result<f64> {
    let mut scale = 1.0;
    for (unit, factor) in UNIT_SCALES {
        if token.contains(unit) {
            scale = factor;
            break;
        }
    }

    let digits: String = token.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(StompError::invalid_value(token, line));
    }
    let numeric: f64 = digits
        .parse()
        .map_err(|_| StompError::invalid_value(token, line))?;

    Ok(numeric * scale)
}
