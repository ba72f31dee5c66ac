//! Exact conversion of `f32` and `f64` to decimal text.
//!
//! Digits come from the Dragon4 algorithm running on fixed-capacity big
//! integers, so every result is exact: the shortest digits that read back as
//! the same float, or the correctly rounded digits for a requested precision.
//! Nothing allocates.
//!
//! ```
//! let mut buffer = dragon4::Buffer::new();
//! assert_eq!(buffer.format(0.1f64), "0.1");
//! assert_eq!(buffer.format_exp(123.456f64), "1.23456e+02");
//! assert_eq!(buffer.format_with(-123.456f64, dragon4::Format::Positional, 2), "-123.46");
//! ```
//!
//! [`format_float`] writes into a caller-provided byte slice and always leaves
//! a NUL terminator behind the text, cutting the output short when the slice
//! is too small.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::must_use_candidate,
    clippy::unreadable_literal
)]

pub mod bigint;
mod decode;
mod dragon;
mod format;
mod pow10;

pub use crate::decode::{Decoded, Decomposed, Float};
pub use crate::dragon::{Cutoff, dragon4};
pub use crate::format::{Format, format_float};

// Room for the longest shortest-positional f64, "-0.000...0005" for the
// smallest subnormal, plus the terminator.
const BUFFER_SIZE: usize = 328;

/// Inline storage for one formatted float.
///
/// ```
/// let mut buffer = dragon4::Buffer::new();
/// let printed = buffer.format(1.5f32);
/// assert_eq!(printed, "1.5");
/// ```
pub struct Buffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Buffer {
            bytes: [0; BUFFER_SIZE],
        }
    }

    /// Shortest positional digits, e.g. `0.001`, `1e21` printed in full.
    pub fn format<F: Float>(&mut self, value: F) -> &str {
        self.format_with(value, Format::Positional, -1)
    }

    /// Shortest digits in scientific notation, e.g. `1e-03`.
    pub fn format_exp<F: Float>(&mut self, value: F) -> &str {
        self.format_with(value, Format::Scientific, -1)
    }

    /// Formats with an explicit layout and precision, as [`format_float`].
    /// Output past the buffer's capacity is cut off.
    pub fn format_with<F: Float>(&mut self, value: F, format: Format, precision: i32) -> &str {
        let len = format_float(&mut self.bytes, value, format, precision);
        // format_float writes only ASCII.
        unsafe { str::from_utf8_unchecked(&self.bytes[..len]) }
    }
}
