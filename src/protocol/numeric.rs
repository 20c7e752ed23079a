//! Lenient numeric argument parsing.
//!
//! Command arguments are parsed from their longest leading numeric prefix,
//! `[ws][+-]digits[.digits][(e|E)[+-]digits]`.  Trailing garbage is ignored
//! and input with no digits at all yields `0.0`.  Results that do not fit a
//! finite `f32` also yield `0.0`, so a calibration factor is always finite.

/// Parse the leading numeric prefix of `input`, defaulting to `0.0`.
pub fn parse_lenient(input: &[u8]) -> f32 {
    let start = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len());
    let s = &input[start..];

    let end = numeric_prefix_len(s);
    if end == 0 {
        return 0.0;
    }

    let Ok(text) = core::str::from_utf8(&s[..end]) else {
        return 0.0;
    };
    match text.parse::<f32>() {
        Ok(v) => {
            // -0.0 would print as "-0.000"
            if !v.is_finite() || v == 0.0 { 0.0 } else { v }
        }
        Err(_) => 0.0,
    }
}

/// Length of the numeric prefix of `s`, or 0 when it has no mantissa digits.
fn numeric_prefix_len(s: &[u8]) -> usize {
    let mut end = usize::from(matches!(s.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&s[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if s.get(end) == Some(&b'.') {
        frac_digits = count_digits(&s[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(s.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(s.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&s[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    end
}

fn count_digits(s: &[u8]) -> usize {
    s.iter().take_while(|b| b.is_ascii_digit()).count()
}
