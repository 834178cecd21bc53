//! Fixed-point decimal formatting for the text exporters.
//!
//! Ties round away from zero, decided on the exact binary value: `12.0625`
//! prints as `12.063` at 3 digits and `2.25` as `2.3` at 1 digit. Rust's
//! `{:.N}` rounds those ties to even instead.

/// Fraction digits needed to print any `f32` exactly (smallest subnormal is 2^-149).
const EXACT_F32_DIGITS: usize = 149;

/// Format `value` with exactly `digits` fraction digits.
///
/// `-0.0` prints without a sign; any other negative value keeps it, even when
/// it rounds to zero (`-0.0001` gives `-0.000`).
pub(crate) fn to_fixed(value: f32, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let exact = format!("{:.*}", EXACT_F32_DIGITS, f64::from(value.abs()));
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|&next| next >= b'5');
    if round_up {
        increment(&mut kept);
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..int_len].iter().map(|&d| d as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[int_len..].iter().map(|&d| d as char));
    }
    out
}

/// Add one unit in the last place of an ASCII digit string.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(to_fixed(12.0625, 3), "12.063");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
        assert_eq!(to_fixed(-0.1875, 3), "-0.188");
        assert_eq!(to_fixed(-12.0625, 3), "-12.063");
        assert_eq!(to_fixed(2.25, 1), "2.3");
        assert_eq!(to_fixed(0.5, 0), "1");
    }

    #[test]
    fn test_non_ties_use_the_exact_value() {
        // 10.04f32 is 10.03999996..., 20.06f32 is 20.05999946...
        assert_eq!(to_fixed(10.04, 1), "10.0");
        assert_eq!(to_fixed(20.06, 1), "20.1");
        assert_eq!(to_fixed(1.0, 3), "1.000");
        assert_eq!(to_fixed(-300.0, 3), "-300.000");
    }

    #[test]
    fn test_carry_into_integer_part() {
        assert_eq!(to_fixed(9.99951, 3), "10.000");
        assert_eq!(to_fixed(99.96875, 1), "100.0");
    }

    #[test]
    fn test_zero_signs() {
        assert_eq!(to_fixed(0.0, 3), "0.000");
        assert_eq!(to_fixed(-0.0, 3), "0.000");
        assert_eq!(to_fixed(-0.0001, 3), "-0.000");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(to_fixed(f32::NAN, 3), "NaN");
        assert_eq!(to_fixed(f32::INFINITY, 1), "Infinity");
        assert_eq!(to_fixed(f32::NEG_INFINITY, 1), "-Infinity");
    }
}
