//! Fixed-capacity arbitrary-precision unsigned integers.
//!
//! A `BigInt<N>` stores up to `N` base 2<sup>32</sup> blocks inline, least
//! significant first, together with the count of significant blocks. It never
//! allocates; every intermediate value of the float formatter lives on the
//! stack.
//!
//! Operations are infallible. Running out of blocks is a bug in the caller,
//! caught by `debug_assert!` in debug builds and by slice bounds checks
//! otherwise, so a result is never silently truncated.

use crate::pow10::{POW10_BIG, POW10_U32};
use std::cmp::Ordering;
use std::fmt::{self, Debug};

/// Block capacity sufficient for every intermediate value produced while
/// formatting an `f64`.
pub const MAX_BLOCKS: usize = 40;

/// The integer type used by the float formatter.
pub type Big = BigInt<MAX_BLOCKS>;

#[derive(Copy, Clone)]
pub struct BigInt<const N: usize> {
    // Number of significant blocks. blocks[length - 1] != 0 when length > 0,
    // and length == 0 represents zero. Blocks at and above `length` hold
    // unspecified values.
    length: usize,
    blocks: [u32; N],
}

impl<const N: usize> BigInt<N> {
    pub const ZERO: Self = BigInt {
        length: 0,
        blocks: [0; N],
    };

    pub fn from_u32(value: u32) -> Self {
        let mut big = Self::ZERO;
        big.set_u32(value);
        big
    }

    pub fn from_u64(value: u64) -> Self {
        let mut big = Self::ZERO;
        big.set_u64(value);
        big
    }

    /// Builds a value from little-endian blocks. High zero blocks are
    /// allowed and trimmed.
    pub fn from_blocks(blocks: &[u32]) -> Self {
        debug_assert!(blocks.len() <= N, "{} blocks exceed capacity {N}", blocks.len());
        let mut big = Self::ZERO;
        big.blocks[..blocks.len()].copy_from_slice(blocks);
        big.length = blocks.len();
        big.trim();
        big
    }

    pub fn set_u32(&mut self, value: u32) {
        self.blocks[0] = value;
        self.length = usize::from(value != 0);
    }

    pub fn set_u64(&mut self, value: u64) {
        if value > u64::from(u32::MAX) {
            self.blocks[0] = value as u32;
            self.blocks[1] = (value >> 32) as u32;
            self.length = 2;
        } else {
            self.set_u32(value as u32);
        }
    }

    /// 2**exponent.
    pub fn pow2(exponent: u32) -> Self {
        let block_index = (exponent / 32) as usize;
        let mut big = Self::ZERO;
        big.blocks[block_index] = 1 << (exponent % 32);
        big.length = block_index + 1;
        big
    }

    /// 10**exponent, for exponent < 512.
    pub fn pow10(exponent: u32) -> Self {
        debug_assert!(exponent < 512, "10**{exponent} is beyond the power table");
        Self::from_u32(POW10_U32[(exponent & 7) as usize]).multiply_pow10_big(exponent >> 3)
    }

    pub fn is_zero(&self) -> bool {
        self.length == 0
    }

    /// Number of significant blocks.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The significant blocks, least significant first.
    pub fn blocks(&self) -> &[u32] {
        &self.blocks[..self.length]
    }

    /// The most significant block, or 0 for zero.
    pub fn high_block(&self) -> u32 {
        self.blocks().last().copied().unwrap_or(0)
    }

    fn trim(&mut self) {
        while self.length > 0 && self.blocks[self.length - 1] == 0 {
            self.length -= 1;
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        // With no high zero blocks, more blocks means a larger value.
        self.length
            .cmp(&other.length)
            .then_with(|| self.blocks().iter().rev().cmp(other.blocks().iter().rev()))
    }

    pub fn add(&self, other: &Self) -> Self {
        let (large, small) = if self.length < other.length {
            (other, self)
        } else {
            (self, other)
        };

        let mut result = Self::ZERO;
        let mut carry = 0u64;
        for (i, &block) in large.blocks().iter().enumerate() {
            let addend = small.blocks().get(i).copied().unwrap_or(0);
            let sum = u64::from(block) + u64::from(addend) + carry;
            result.blocks[i] = sum as u32;
            carry = sum >> 32;
        }
        result.length = large.length;

        if carry != 0 {
            debug_assert!(result.length < N, "addition overflows {N} blocks");
            result.blocks[result.length] = 1;
            result.length += 1;
        }
        result
    }

    pub fn multiply(&self, other: &Self) -> Self {
        let (large, small) = if self.length < other.length {
            (other, self)
        } else {
            (self, other)
        };

        let max_length = large.length + small.length;
        debug_assert!(max_length <= N, "multiplication may overflow {N} blocks");

        let mut result = Self::ZERO;
        for (i, &multiplier) in small.blocks().iter().enumerate() {
            if multiplier == 0 {
                continue;
            }
            let mut carry = 0u64;
            for (j, &block) in large.blocks().iter().enumerate() {
                // At most (2**32-1) + (2**32-1)**2 + (2**32-1) = 2**64-1.
                let product = u64::from(result.blocks[i + j])
                    + u64::from(block) * u64::from(multiplier)
                    + carry;
                result.blocks[i + j] = product as u32;
                carry = product >> 32;
            }
            result.blocks[i + large.length] = carry as u32;
        }

        result.length = max_length;
        result.trim();
        result
    }

    pub fn multiply_u32(&self, multiplier: u32) -> Self {
        let mut result = Self::ZERO;
        let mut carry = 0u64;
        for (i, &block) in self.blocks().iter().enumerate() {
            let product = u64::from(block) * u64::from(multiplier) + carry;
            result.blocks[i] = product as u32;
            carry = product >> 32;
        }
        result.length = self.length;

        if carry != 0 {
            debug_assert!(result.length < N, "multiplication overflows {N} blocks");
            result.blocks[result.length] = carry as u32;
            result.length += 1;
        }
        result.trim();
        result
    }

    pub fn multiply2(&self) -> Self {
        let mut result = *self;
        result.multiply2_in_place();
        result
    }

    pub fn multiply2_in_place(&mut self) {
        let mut carry = 0;
        for block in &mut self.blocks[..self.length] {
            let cur = *block;
            *block = (cur << 1) | carry;
            carry = cur >> 31;
        }
        if carry != 0 {
            debug_assert!(self.length < N, "doubling overflows {N} blocks");
            self.blocks[self.length] = carry;
            self.length += 1;
        }
    }

    pub fn multiply10_in_place(&mut self) {
        let mut carry = 0u64;
        for block in &mut self.blocks[..self.length] {
            let product = u64::from(*block) * 10 + carry;
            *block = product as u32;
            carry = product >> 32;
        }
        if carry != 0 {
            debug_assert!(self.length < N, "multiplication overflows {N} blocks");
            self.blocks[self.length] = carry as u32;
            self.length += 1;
        }
    }

    /// self * 10**exponent, for exponent < 512.
    pub fn multiply_pow10(&self, exponent: u32) -> Self {
        debug_assert!(exponent < 512, "10**{exponent} is beyond the power table");
        let small = exponent & 7;
        let head = if small == 0 {
            *self
        } else {
            self.multiply_u32(POW10_U32[small as usize])
        };
        head.multiply_pow10_big(exponent >> 3)
    }

    // Multiplies by 10**(8 * exponent) using the big power table, one entry
    // per set bit of exponent.
    fn multiply_pow10_big(self, mut exponent: u32) -> Self {
        let mut result = self;
        let mut table_index = 0;
        while exponent != 0 {
            if exponent & 1 != 0 {
                result = result.multiply(&Self::from_blocks(POW10_BIG[table_index]));
            }
            table_index += 1;
            exponent >>= 1;
        }
        result
    }

    pub fn shift_left(&mut self, shift: u32) {
        if self.length == 0 {
            return;
        }

        let block_shift = (shift / 32) as usize;
        let bit_shift = shift % 32;
        let in_length = self.length;

        if bit_shift == 0 {
            self.blocks.copy_within(..in_length, block_shift);
            self.length = in_length + block_shift;
        } else {
            // Work from high to low so no block is read after being
            // overwritten.
            let carry_out = self.blocks[in_length - 1] >> (32 - bit_shift);
            if carry_out != 0 {
                self.blocks[in_length + block_shift] = carry_out;
            }
            for i in (1..in_length).rev() {
                self.blocks[i + block_shift] =
                    (self.blocks[i] << bit_shift) | (self.blocks[i - 1] >> (32 - bit_shift));
            }
            self.blocks[block_shift] = self.blocks[0] << bit_shift;
            self.length = in_length + block_shift + usize::from(carry_out != 0);
        }

        self.blocks[..block_shift].fill(0);
    }

    /// Divides `self` by `divisor` in place, leaving the remainder in `self`
    /// and returning the quotient, which must be at most 9.
    ///
    /// The divisor's high block must lie in `[8, 0xFFFFFFFE]` and `self` must
    /// not have more blocks than the divisor. The quotient is estimated from
    /// the high blocks alone; the estimate is exact or one too small, so one
    /// extra subtraction corrects it.
    pub fn divide_with_remainder_max_quotient_9(&mut self, divisor: &Self) -> u32 {
        debug_assert!(!divisor.is_zero());
        debug_assert!((8..u32::MAX).contains(&divisor.high_block()));
        debug_assert!(self.length <= divisor.length);

        let length = divisor.length;
        if self.length < length {
            return 0;
        }

        let mut quotient = self.blocks[length - 1] / (divisor.blocks[length - 1] + 1);
        debug_assert!(quotient <= 9);

        if quotient != 0 {
            self.subtract_multiple(divisor, quotient);
        }

        if self.compare(divisor) != Ordering::Less {
            quotient += 1;
            self.subtract_multiple(divisor, 1);
        }

        debug_assert!(quotient <= 9);
        quotient
    }

    // self -= multiplier * other. The result must be non-negative.
    fn subtract_multiple(&mut self, other: &Self, multiplier: u32) {
        let mut borrow = 0u64;
        let mut carry = 0u64;
        for (i, &block) in other.blocks().iter().enumerate() {
            let product = u64::from(block) * u64::from(multiplier) + carry;
            carry = product >> 32;
            let difference = u64::from(self.blocks[i])
                .wrapping_sub(product & 0xFFFF_FFFF)
                .wrapping_sub(borrow);
            borrow = (difference >> 32) & 1;
            self.blocks[i] = difference as u32;
        }
        // The subtrahend has as many blocks as self here, so any leftover
        // borrow or carry would mean a negative result.
        debug_assert!(borrow == 0 && carry == 0);
        self.trim();
    }
}

impl<const N: usize> PartialEq for BigInt<N> {
    fn eq(&self, other: &Self) -> bool {
        self.blocks() == other.blocks()
    }
}

impl<const N: usize> Eq for BigInt<N> {}

impl<const N: usize> PartialOrd for BigInt<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for BigInt<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<const N: usize> Debug for BigInt<N> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let Some((high, rest)) = self.blocks().split_last() else {
            return formatter.write_str("0x0");
        };
        write!(formatter, "{high:#x}")?;
        for block in rest.iter().rev() {
            write!(formatter, "_{block:08x}")?;
        }
        Ok(())
    }
}
