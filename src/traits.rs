use std::fmt::{Debug, LowerExp};
use std::str::FromStr;

// A float type the harness can sample, re-round and parse back.
pub trait Float: Copy + PartialEq + LowerExp + FromStr<Err: Debug> + dragon4::Float {
    type Bits;

    // Significant digits that always round-trip: 9 for f32, 17 for f64.
    const MAX_DIGITS: usize;

    fn from_bits(bits: Self::Bits) -> Self;
    fn is_finite(self) -> bool;
}

impl Float for f32 {
    type Bits = u32;
    const MAX_DIGITS: usize = 9;

    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Float for f64 {
    type Bits = u64;
    const MAX_DIGITS: usize = 17;

    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}
