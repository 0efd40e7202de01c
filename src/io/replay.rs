//! Recorded azimuth files for replay mode.
//!
//! One azimuth (degrees, sensor-relative) per line, in sensor-slot order.
//! Each line is read up to its leading number, so `12.5 deg` reads as 12.5.
//! Reading stops at the first line that does not begin with a number;
//! anything after it is ignored.

use std::fs;
use std::path::Path;

/// Parse azimuths from angle-file contents.
pub fn parse_angles(contents: &str) -> Vec<f64> {
    contents.lines().map_while(leading_number).collect()
}

/// Read and parse an angle file.
pub fn load_angles<P: AsRef<Path>>(path: P) -> crate::Result<Vec<f64>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let angles = parse_angles(&contents);
    log::debug!(
        "Loaded {} replay angles from {}",
        angles.len(),
        path.as_ref().display()
    );
    Ok(angles)
}

/// Finite number at the start of `line`, after leading whitespace.
fn leading_number(line: &str) -> Option<f64> {
    let token = line.trim_start();
    let end = numeric_prefix_len(token.as_bytes());
    if end == 0 {
        return None;
    }
    token[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Length of the decimal literal `[+-]digits[.digits][(e|E)[+-]digits]`
/// starting `bytes`, or 0 if it has no mantissa digit.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_from(end);
    end += integer;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer + fraction == 0 {
        return 0;
    }

    // Exponent only counts with at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}
