// A finite float split into the inputs of the digit generator.
//
// The value is mantissa * 2**exponent. Zero has a zero mantissa, and
// `dragon4` accepts mantissas below 2**62.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub mantissa: u64,
    pub exponent: i32,
    /// Index of the highest set bit of `mantissa`.
    pub highest_bit_index: u32,
    /// The upper rounding margin is twice the lower one. True for normalized
    /// values sitting exactly on a power of two, other than the smallest
    /// normalized binade.
    pub has_unequal_margins: bool,
    pub is_negative: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decomposed {
    Finite(Decoded),
    Infinite { is_negative: bool },
    Nan { is_negative: bool, payload: u64 },
}

impl Decomposed {
    pub fn is_negative(&self) -> bool {
        match *self {
            Decomposed::Finite(decoded) => decoded.is_negative,
            Decomposed::Infinite { is_negative } | Decomposed::Nan { is_negative, .. } => {
                is_negative
            }
        }
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// An IEEE binary float that can be formatted: `f32` or `f64`.
///
/// This trait is sealed and cannot be implemented for other types.
pub trait Float: Copy + private::Sealed {
    /// Hex digits needed to print every payload bit of a NaN.
    const PAYLOAD_HEX_DIGITS: usize;

    fn decompose(self) -> Decomposed;
}

impl Float for f32 {
    const PAYLOAD_HEX_DIGITS: usize = 6;

    fn decompose(self) -> Decomposed {
        decompose_bits(u64::from(self.to_bits()), 23, 8)
    }
}

impl Float for f64 {
    const PAYLOAD_HEX_DIGITS: usize = 13;

    fn decompose(self) -> Decomposed {
        decompose_bits(self.to_bits(), 52, 11)
    }
}

// decompose_bits splits the raw bits of a float with the given field widths.
fn decompose_bits(bits: u64, fraction_bits: u32, exponent_bits: u32) -> Decomposed {
    let is_negative = (bits >> (fraction_bits + exponent_bits)) & 1 != 0;
    let fraction = bits & ((1 << fraction_bits) - 1);
    let biased_exponent = ((bits >> fraction_bits) & ((1 << exponent_bits) - 1)) as i32;

    if biased_exponent == (1 << exponent_bits) - 1 {
        return if fraction == 0 {
            Decomposed::Infinite { is_negative }
        } else {
            Decomposed::Nan {
                is_negative,
                payload: fraction,
            }
        };
    }

    // Bias of the exponent when the mantissa is read as an integer,
    // 1075 for f64 and 150 for f32.
    let bias = (1 << (exponent_bits - 1)) - 1 + fraction_bits as i32;

    let decoded = if biased_exponent != 0 {
        Decoded {
            mantissa: (1 << fraction_bits) | fraction,
            exponent: biased_exponent - bias,
            highest_bit_index: fraction_bits,
            has_unequal_margins: biased_exponent != 1 && fraction == 0,
            is_negative,
        }
    } else {
        // Subnormal: no implicit bit, and neighbors are equally spaced.
        Decoded {
            mantissa: fraction,
            exponent: 1 - bias,
            highest_bit_index: fraction.checked_ilog2().unwrap_or(0),
            has_unequal_margins: false,
            is_negative,
        }
    };
    Decomposed::Finite(decoded)
}

#[cfg(test)]
mod tests {
    use super::{Decoded, Decomposed, Float};

    fn finite<F: Float>(value: F) -> Decoded {
        match value.decompose() {
            Decomposed::Finite(decoded) => decoded,
            other => panic!("not finite: {other:?}"),
        }
    }

    #[test]
    fn normal_f64() {
        let one = finite(1.0f64);
        assert_eq!(one.mantissa, 1 << 52);
        assert_eq!(one.exponent, -52);
        assert_eq!(one.highest_bit_index, 52);
        assert!(one.has_unequal_margins);
        assert!(!one.is_negative);

        let d = finite(-1.5f64);
        assert_eq!(d.mantissa, 3 << 51);
        assert_eq!(d.exponent, -52);
        assert!(!d.has_unequal_margins);
        assert!(d.is_negative);
    }

    #[test]
    fn normal_f32() {
        let d = finite(100.0f32);
        assert_eq!(d.mantissa as f64 * 2f64.powi(d.exponent), 100.0);
        assert_eq!(d.highest_bit_index, 23);
        assert!(!d.has_unequal_margins);
        assert!(finite(0.5f32).has_unequal_margins);
    }

    #[test]
    fn smallest_normal_has_equal_margins() {
        assert!(!finite(f64::MIN_POSITIVE).has_unequal_margins);
        assert!(!finite(f32::MIN_POSITIVE).has_unequal_margins);
        assert!(finite(f64::MIN_POSITIVE * 2.0).has_unequal_margins);
    }

    #[test]
    fn subnormals() {
        let tiny = finite(f64::from_bits(1));
        assert_eq!(tiny.mantissa, 1);
        assert_eq!(tiny.exponent, -1074);
        assert_eq!(tiny.highest_bit_index, 0);
        assert!(!tiny.has_unequal_margins);

        let d = finite(f32::from_bits(0x0004_0000));
        assert_eq!(d.mantissa, 0x0004_0000);
        assert_eq!(d.exponent, -149);
        assert_eq!(d.highest_bit_index, 18);
    }

    #[test]
    fn zero() {
        let zero = finite(0.0f64);
        assert_eq!(zero.mantissa, 0);
        assert!(!zero.is_negative);
        assert!(finite(-0.0f32).is_negative);
    }

    #[test]
    fn specials() {
        assert_eq!(
            f64::INFINITY.decompose(),
            Decomposed::Infinite { is_negative: false },
        );
        assert_eq!(
            f32::NEG_INFINITY.decompose(),
            Decomposed::Infinite { is_negative: true },
        );
        assert_eq!(
            f64::from_bits(0x7ff8_0000_0000_0001).decompose(),
            Decomposed::Nan {
                is_negative: false,
                payload: 0x8_0000_0000_0001,
            },
        );
        assert!(f32::from_bits(0xffc0_0000).decompose().is_negative());
    }
}
