//! Exact float to decimal digit generation.
//!
//! This is the Dragon4 algorithm of Steele and White ("How to Print
//! Floating-Point Numbers Accurately", 1990) in the free-format form that
//! stops at the shortest digit string which reads back as the same float, with
//! optional cutoffs for fixed-precision output. All arithmetic is exact on
//! fixed-capacity big integers: the value and its rounding margins are kept as
//! numerators over a common `scale`, and each iteration peels one decimal digit
//! off the numerator.

use crate::bigint::Big;
use crate::decode::Decoded;
use std::cmp::Ordering;

const LOG10_2: f64 = 0.301_029_995_663_981_2;

/// When to stop generating digits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cutoff {
    /// Shortest digits that uniquely identify the float.
    Unique,
    /// At most this many significant digits. Zero is treated as one.
    TotalDigits(u32),
    /// At most this many digits after the decimal point.
    FractionDigits(u32),
}

// The value and its margins as numerators over `scale`, doubled (or
// quadrupled for unequal margins) so that the half-ulp margins are integers.
struct Scaled {
    value: Big,
    scale: Big,
    margin_low: Big,
    // Separate upper margin, present only when it is twice the lower one.
    margin_high: Option<Big>,
}

impl Scaled {
    fn new(decoded: &Decoded) -> Self {
        let mantissa = decoded.mantissa;
        let exponent = decoded.exponent;
        let shift = exponent.unsigned_abs();

        if decoded.has_unequal_margins {
            if exponent > 0 {
                // value = 4 * mantissa * 2**exponent, scale = 4,
                // margins 2**exponent and 2**(exponent+1).
                let mut value = Big::from_u64(4 * mantissa);
                value.shift_left(shift);
                Scaled {
                    value,
                    scale: Big::from_u32(4),
                    margin_low: Big::pow2(shift),
                    margin_high: Some(Big::pow2(shift + 1)),
                }
            } else {
                // value = 4 * mantissa, scale = 4 * 2**-exponent,
                // margins 1 and 2.
                Scaled {
                    value: Big::from_u64(4 * mantissa),
                    scale: Big::pow2(shift + 2),
                    margin_low: Big::from_u32(1),
                    margin_high: Some(Big::from_u32(2)),
                }
            }
        } else if exponent > 0 {
            // value = 2 * mantissa * 2**exponent, scale = 2, margin 2**exponent.
            let mut value = Big::from_u64(2 * mantissa);
            value.shift_left(shift);
            Scaled {
                value,
                scale: Big::from_u32(2),
                margin_low: Big::pow2(shift),
                margin_high: None,
            }
        } else {
            // value = 2 * mantissa, scale = 2 * 2**-exponent, margin 1.
            Scaled {
                value: Big::from_u64(2 * mantissa),
                scale: Big::pow2(shift + 1),
                margin_low: Big::from_u32(1),
                margin_high: None,
            }
        }
    }

    fn margin_high(&self) -> &Big {
        self.margin_high.as_ref().unwrap_or(&self.margin_low)
    }

    fn sync_margin_high(&mut self) {
        if let Some(margin_high) = &mut self.margin_high {
            *margin_high = self.margin_low.multiply2();
        }
    }

    // Scales the numerators by 10**exponent, or the denominator by
    // 10**-exponent.
    fn divide_pow10(&mut self, exponent: i32) {
        match exponent.cmp(&0) {
            Ordering::Greater => self.scale = self.scale.multiply_pow10(exponent.unsigned_abs()),
            Ordering::Less => {
                let pow10 = Big::pow10(exponent.unsigned_abs());
                self.value = self.value.multiply(&pow10);
                self.margin_low = self.margin_low.multiply(&pow10);
                self.sync_margin_high();
            }
            Ordering::Equal => {}
        }
    }

    fn multiply10(&mut self) {
        self.value.multiply10_in_place();
        self.margin_low.multiply10_in_place();
        self.sync_margin_high();
    }

    fn shift_left(&mut self, shift: u32) {
        self.scale.shift_left(shift);
        self.value.shift_left(shift);
        self.margin_low.shift_left(shift);
        self.sync_margin_high();
    }
}

// Whether lhs reaches past rhs: `>` normally, `>=` when the boundary itself
// rounds to the float.
fn reaches(lhs: &Big, rhs: &Big, inclusive: bool) -> bool {
    match lhs.compare(rhs) {
        Ordering::Greater => true,
        Ordering::Equal => inclusive,
        Ordering::Less => false,
    }
}

/// Writes the decimal digits of `decoded` into `digits` as ASCII and returns
/// the digit count together with the base-10 exponent of the first digit.
///
/// The value is `0.d1d2d3... * 10**(exponent + 1)`. At most `digits.len()`
/// digits are produced; if the buffer runs out before the cutoff, the last
/// digit that fits is correctly rounded. A zero mantissa yields `"0"` with
/// exponent 0.
///
/// # Panics
///
/// Panics if `digits` is empty or the mantissa has more than 62 bits.
pub fn dragon4(decoded: &Decoded, cutoff: Cutoff, digits: &mut [u8]) -> (usize, i32) {
    assert!(!digits.is_empty(), "digit buffer must not be empty");
    // The scaled value starts as 4 * mantissa in 64 bits.
    assert!(
        decoded.mantissa >> 62 == 0,
        "mantissa {:#x} is wider than 62 bits",
        decoded.mantissa,
    );

    if decoded.mantissa == 0 {
        digits[0] = b'0';
        return (1, 0);
    }

    let mut s = Scaled::new(decoded);

    // Boundary values round to the float itself when its mantissa is even.
    let inclusive = decoded.mantissa & 1 == 0;

    // Estimate the exponent k with 10**(k-1) <= value < 10**k. The bias
    // makes the estimate exact or one too small, never too large.
    let mut digit_exponent = (f64::from(decoded.highest_bit_index as i32 + decoded.exponent)
        * LOG10_2
        - 0.69)
        .ceil() as i32;

    // Values below the first printed fraction digit still print one digit
    // at that position.
    if let Cutoff::FractionDigits(n) = cutoff {
        let n = n.min(i32::MAX as u32) as i32;
        if digit_exponent <= -n {
            digit_exponent = -n + 1;
        }
    }

    s.divide_pow10(digit_exponent);

    // Fix up an estimate that came out one too small. In unique mode the
    // whole rounding interval has to fit below the scale, otherwise the
    // shortest output may be a power of ten one digit longer.
    let too_low = match cutoff {
        Cutoff::Unique => reaches(&s.value.add(s.margin_high()), &s.scale, inclusive),
        Cutoff::TotalDigits(_) | Cutoff::FractionDigits(_) => s.value >= s.scale,
    };
    if too_low {
        digit_exponent += 1;
    } else {
        s.multiply10();
    }

    // Exponent of the digit position at which to stop. The buffer size is
    // always a limit.
    let capacity = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let buffer_cutoff = digit_exponent.saturating_sub(capacity);
    let cutoff_exponent = match cutoff {
        Cutoff::Unique => buffer_cutoff,
        Cutoff::TotalDigits(n) => {
            let n = n.clamp(1, i32::MAX as u32) as i32;
            buffer_cutoff.max(digit_exponent.saturating_sub(n))
        }
        Cutoff::FractionDigits(n) => buffer_cutoff.max(-(n.min(i32::MAX as u32) as i32)),
    };

    let mut exponent = digit_exponent - 1;

    // The quotient estimate in divide_with_remainder_max_quotient_9 needs the
    // high block of the scale in [8, 429496729]; the upper bound also keeps
    // 10 * remainder within as many blocks as the scale. Put the highest bit
    // at index 27.
    let high_block = s.scale.high_block();
    if !(8..=429_496_729).contains(&high_block) {
        let shift = (32 + 27 - high_block.ilog2()) % 32;
        s.shift_left(shift);
    }

    let mut len = 0;
    let (digit, low, high) = match cutoff {
        Cutoff::Unique => loop {
            digit_exponent -= 1;
            let digit = s.value.divide_with_remainder_max_quotient_9(&s.scale);

            // low: the digits so far are within the lower margin.
            // high: the digits so far plus one are within the upper margin.
            let low = reaches(&s.margin_low, &s.value, inclusive);
            let high = reaches(&s.value.add(s.margin_high()), &s.scale, inclusive);
            if low || high || digit_exponent == cutoff_exponent {
                break (digit, low, high);
            }

            digits[len] = b'0' + digit as u8;
            len += 1;
            s.multiply10();
        },
        Cutoff::TotalDigits(_) | Cutoff::FractionDigits(_) => loop {
            digit_exponent -= 1;
            let digit = s.value.divide_with_remainder_max_quotient_9(&s.scale);
            if s.value.is_zero() || digit_exponent == cutoff_exponent {
                break (digit, false, false);
            }

            digits[len] = b'0' + digit as u8;
            len += 1;
            s.value.multiply10_in_place();
        },
    };

    // Round the final digit. If only one direction stays inside the margins
    // take it, otherwise round to nearest with ties to even.
    let round_down = if low == high {
        match s.value.multiply2().compare(&s.scale) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => digit & 1 == 0,
        }
    } else {
        low
    };

    if round_down {
        digits[len] = b'0' + digit as u8;
        len += 1;
    } else if digit < 9 {
        digits[len] = b'0' + digit as u8 + 1;
        len += 1;
    } else {
        // Carry through trailing nines, which become implicit zeros.
        loop {
            if len == 0 {
                digits[0] = b'1';
                len = 1;
                exponent += 1;
                break;
            }
            len -= 1;
            if digits[len] != b'9' {
                digits[len] += 1;
                len += 1;
                break;
            }
        }
    }

    (len, exponent)
}
