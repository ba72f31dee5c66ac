use crate::decode::{Decoded, Decomposed, Float};
use crate::dragon::{Cutoff, dragon4};

/// Layout of the formatted number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// `123.456`
    Positional,
    /// `1.23456e+02`
    Scientific,
}

// Longest exponent suffix, "e-324".
const EXPONENT_MAX_LEN: usize = 5;

// i2a is the formatting of 00..99 concatenated,
// a lookup table for formatting [0, 99].
const I2A: [u8; 200] = *b"\
    00010203040506070809\
    10111213141516171819\
    20212223242526272829\
    30313233343536373839\
    40414243444546474849\
    50515253545556575859\
    60616263646566676869\
    70717273747576777879\
    80818283848586878889\
    90919293949596979899";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Formats `value` into `buffer` and returns the number of bytes written,
/// not counting the NUL terminator that always follows them.
///
/// A negative `precision` selects the shortest digits that read back as the
/// same float. Otherwise `precision` is the number of digits after the
/// decimal point: of the whole value for [`Format::Positional`], or after the
/// leading digit for [`Format::Scientific`]. Missing digits are padded with
/// zeros.
///
/// Infinities print as `Inf` and NaNs as `NaN` followed by the payload bits in
/// hex, both with a `-` prefix when the sign bit is set.
///
/// Output never goes past the end of `buffer`. If the text does not fit, it is
/// cut short and the count reflects what was written; an empty buffer receives
/// nothing and 0 is returned.
pub fn format_float<F: Float>(
    buffer: &mut [u8],
    value: F,
    format: Format,
    precision: i32,
) -> usize {
    // The last byte is reserved for the terminator.
    let Some(capacity) = buffer.len().checked_sub(1) else {
        return 0;
    };

    let decomposed = value.decompose();
    let mut len = 0;
    if decomposed.is_negative() && capacity > 0 {
        buffer[0] = b'-';
        len = 1;
    }

    let out = &mut buffer[len..capacity];
    if !out.is_empty() {
        len += match decomposed {
            Decomposed::Infinite { .. } => copy_truncated(out, b"Inf"),
            Decomposed::Nan { payload, .. } => format_nan(out, payload, F::PAYLOAD_HEX_DIGITS),
            // Zero prints bare in every layout and precision.
            Decomposed::Finite(decoded) if decoded.mantissa == 0 => copy_truncated(out, b"0"),
            Decomposed::Finite(decoded) => match format {
                Format::Positional => format_positional(out, &decoded, precision),
                Format::Scientific => format_scientific(out, &decoded, precision),
            },
        };
    }

    buffer[len] = 0;
    len
}

fn copy_truncated(out: &mut [u8], text: &[u8]) -> usize {
    let len = text.len().min(out.len());
    out[..len].copy_from_slice(&text[..len]);
    len
}

fn format_nan(out: &mut [u8], payload: u64, hex_digits: usize) -> usize {
    let mut len = copy_truncated(out, b"NaN");
    for nibble in (0..hex_digits).rev() {
        if len == out.len() {
            break;
        }
        out[len] = HEX_DIGITS[((payload >> (4 * nibble)) & 0xF) as usize];
        len += 1;
    }
    len
}

// Appends zeros after `fraction_digits` digits already following a decimal
// point (or none yet) until there are `precision` of them, within `limit`.
fn pad_fraction(
    out: &mut [u8],
    mut len: usize,
    fraction_digits: usize,
    precision: i32,
    limit: usize,
) -> usize {
    let Ok(precision) = usize::try_from(precision) else {
        return len;
    };
    let needs_point = fraction_digits == 0;
    if precision <= fraction_digits || len + usize::from(needs_point) >= limit {
        return len;
    }
    if needs_point {
        out[len] = b'.';
        len += 1;
    }
    let end = (len + (precision - fraction_digits)).min(limit);
    out[len..end].fill(b'0');
    end
}

// How many leading digits survive once the decimal point and any leading
// zeros are laid out in `capacity` bytes.
fn positional_visible_digits(num_digits: usize, exponent: i32, capacity: usize) -> usize {
    match usize::try_from(exponent) {
        Ok(exponent) if num_digits > exponent + 1 => capacity - 1,
        Ok(_) => num_digits,
        Err(_) if capacity > 2 => {
            let leading_zeros = (exponent.unsigned_abs() as usize - 1).min(capacity - 2);
            capacity - 2 - leading_zeros
        }
        Err(_) => 0,
    }
}

// Positional layout in place: digits are generated at the start of `out`,
// then moved to make room for the decimal point and any leading zeros.
fn format_positional(out: &mut [u8], decoded: &Decoded, precision: i32) -> usize {
    let capacity = out.len();
    let cutoff = match u32::try_from(precision) {
        Ok(precision) => Cutoff::FractionDigits(precision),
        Err(_) => Cutoff::Unique,
    };
    let (mut num_digits, mut exponent) = dragon4(decoded, cutoff, out);
    let visible = positional_visible_digits(num_digits, exponent, capacity);
    if 0 < visible && visible < num_digits {
        // Regenerate fewer digits so the last visible one is rounded.
        (num_digits, exponent) = dragon4(decoded, cutoff, &mut out[..visible]);
    }

    let mut fraction_digits = 0;
    let len = if let Ok(exponent) = usize::try_from(exponent) {
        let whole_digits = exponent + 1;
        if num_digits <= whole_digits {
            // Zeros up to the decimal point.
            let len = whole_digits.min(capacity);
            out[num_digits..len].fill(b'0');
            len
        } else {
            fraction_digits = (num_digits - whole_digits).min(capacity - whole_digits - 1);
            if fraction_digits == 0 {
                whole_digits
            } else {
                out.copy_within(whole_digits..whole_digits + fraction_digits, whole_digits + 1);
                out[whole_digits] = b'.';
                whole_digits + 1 + fraction_digits
            }
        }
    } else if capacity > 2 {
        // 0.000ddd
        let leading_zeros = (exponent.unsigned_abs() as usize - 1).min(capacity - 2);
        let start = 2 + leading_zeros;
        let shown_digits = num_digits.min(capacity - start);
        out.copy_within(..shown_digits, start);
        out[..2].copy_from_slice(b"0.");
        out[2..start].fill(b'0');
        fraction_digits = leading_zeros + shown_digits;
        start + shown_digits
    } else {
        out[0] = b'0';
        1
    };

    pad_fraction(out, len, fraction_digits, precision, capacity)
}

// Scientific layout: one digit, optional fraction, exponent suffix. The
// suffix always gets its room; digits that would not fit beside it are
// regenerated with a smaller budget so the last one shown is rounded.
fn format_scientific(out: &mut [u8], decoded: &Decoded, precision: i32) -> usize {
    let capacity = out.len();
    let cutoff = match u32::try_from(precision) {
        Ok(precision) => Cutoff::TotalDigits(precision.saturating_add(1)),
        Err(_) => Cutoff::Unique,
    };
    let (mut num_digits, mut exponent) = dragon4(decoded, cutoff, out);

    // Space left for "d.ddd" in front of the suffix.
    let mut body_capacity = capacity.saturating_sub(exponent_len(exponent));
    let visible = if body_capacity >= 3 { body_capacity - 1 } else { 1 };
    if visible < num_digits {
        (num_digits, exponent) = dragon4(decoded, cutoff, &mut out[..visible]);
        // A carry collapses the digits to a single "1" and may lengthen the
        // suffix, as from e+99 to e+100.
        body_capacity = capacity.saturating_sub(exponent_len(exponent));
    }

    let mut suffix = [0u8; EXPONENT_MAX_LEN];
    let suffix_len = format_exponent(&mut suffix, exponent);

    let mut len = 1;
    let mut fraction_digits = 0;
    if num_digits > 1 {
        fraction_digits = num_digits - 1;
        out.copy_within(1..num_digits, 2);
        out[1] = b'.';
        len = 2 + fraction_digits;
    }

    len = pad_fraction(out, len, fraction_digits, precision, body_capacity.max(1));

    let suffix_len = suffix_len.min(capacity - len);
    out[len..len + suffix_len].copy_from_slice(&suffix[..suffix_len]);
    len + suffix_len
}

fn exponent_len(exponent: i32) -> usize {
    if exponent.unsigned_abs() < 100 { 4 } else { 5 }
}

// Writes "e+dd", or "e+ddd" when the magnitude reaches 100.
fn format_exponent(out: &mut [u8; EXPONENT_MAX_LEN], exponent: i32) -> usize {
    out[0] = b'e';
    out[1] = if exponent < 0 { b'-' } else { b'+' };
    let exponent = exponent.unsigned_abs() as usize;
    debug_assert!(exponent < 1000);
    if exponent < 100 {
        out[2..4].copy_from_slice(&I2A[exponent * 2..exponent * 2 + 2]);
        return 4;
    }
    out[2] = b'0' + (exponent / 100) as u8;
    out[3..5].copy_from_slice(&I2A[(exponent % 100) * 2..(exponent % 100) * 2 + 2]);
    5
}
