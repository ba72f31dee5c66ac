#![allow(clippy::float_cmp)]

use dragon4::{Buffer, Cutoff, Decomposed, Float, Format, dragon4, format_float};
use rand::rngs::SmallRng;
use rand::{Rng as _, RngCore as _, SeedableRng as _};

const N: usize = if cfg!(miri) {
    500
} else if cfg!(debug_assertions) {
    20_000
} else {
    1_000_000
};

// Splits decimal text into its significant digits and the base-10 exponent
// of the first one: "0.0125" -> ("125", -2), "1.5e30" -> ("15", 30).
fn significant(text: &str) -> (String, i32) {
    let text = text.trim_start_matches('-');
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap()),
        None => (text, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all = format!("{whole}{fraction}");
    let leading_zeros = all.len() - all.trim_start_matches('0').len();
    let digits = all.trim_start_matches('0').trim_end_matches('0');
    let exponent = exponent + whole.len() as i32 - 1 - leading_zeros as i32;
    (digits.to_owned(), exponent)
}

fn finite<F: Float>(value: F) -> dragon4::Decoded {
    match value.decompose() {
        Decomposed::Finite(decoded) => decoded,
        other => panic!("not finite: {other:?}"),
    }
}

#[test]
fn roundtrip_f64() {
    let mut buffer = Buffer::new();
    let mut rng = SmallRng::from_os_rng();
    let mut fail = 0;

    for _ in 0..N {
        let float = f64::from_bits(rng.next_u64());
        if !float.is_finite() {
            continue;
        }
        for printed in [buffer.format(float).to_owned(), buffer.format_exp(float).to_owned()] {
            let matches = printed
                .parse::<f64>()
                .is_ok_and(|roundtrip| roundtrip.to_bits() == float.to_bits());
            if !matches {
                eprintln!("{float:?} DRAGON4={printed}");
                fail += 1;
            }
        }
    }

    assert!(fail == 0, "{fail} mismatches");
}

#[test]
fn roundtrip_f32() {
    let mut buffer = Buffer::new();
    let mut rng = SmallRng::from_os_rng();
    let mut fail = 0;

    for _ in 0..N {
        let float = f32::from_bits(rng.next_u32());
        if !float.is_finite() {
            continue;
        }
        let printed = buffer.format(float);
        let matches = printed
            .parse::<f32>()
            .is_ok_and(|roundtrip| roundtrip.to_bits() == float.to_bits());
        if !matches {
            eprintln!("{float:?} DRAGON4={printed}");
            fail += 1;
        }
    }

    assert!(fail == 0, "{fail} mismatches");
}

#[test]
fn shortest_matches_ryu() {
    let mut buffer = Buffer::new();
    let mut ryu_buffer = ryu::Buffer::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let mut fail = 0;

    for i in 0..N {
        // Every third sample is an exact power of two, where the margins
        // are unequal.
        let float = if i % 3 == 0 {
            f64::from_bits(rng.random_range(1..2047u64) << 52)
        } else {
            f64::from_bits(rng.next_u64())
        };
        if !float.is_finite() || float == 0.0 {
            continue;
        }
        let expected = significant(ryu_buffer.format_finite(float));
        let actual = significant(buffer.format_exp(float));
        if actual != expected {
            eprintln!("{float:?} DRAGON4={actual:?} RYU={expected:?}");
            fail += 1;
        }

        let float = float as f32;
        if !float.is_finite() || float == 0.0 {
            continue;
        }
        let expected = significant(ryu_buffer.format_finite(float));
        let actual = significant(buffer.format_exp(float));
        if actual != expected {
            eprintln!("{float:?} DRAGON4={actual:?} RYU={expected:?}");
            fail += 1;
        }
    }

    assert!(fail == 0, "{fail} mismatches");
}

#[test]
fn digit_count_respects_cutoff() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut digits = [0u8; 1100];

    for _ in 0..N / 100 {
        let float = f64::from_bits(rng.next_u64());
        if !float.is_finite() {
            continue;
        }
        let decoded = finite(float);

        let n = rng.random_range(0..40u32);
        let (num_digits, _) = dragon4(&decoded, Cutoff::TotalDigits(n), &mut digits);
        assert!(num_digits <= n.max(1) as usize, "{float:?} {n}");

        let (num_digits, exponent) = dragon4(&decoded, Cutoff::FractionDigits(n), &mut digits);
        if decoded.mantissa != 0 {
            // Position of the last digit relative to the decimal point.
            let last = exponent - num_digits as i32 + 1;
            assert!(last >= -(n as i32), "{float:?} {n}");
        }
    }
}

#[test]
fn fixed_precision_matches_core() {
    let mut buffer = Buffer::new();
    let mut rng = SmallRng::seed_from_u64(3);

    for _ in 0..N / 100 {
        let precision = rng.random_range(0..20usize);

        let float = f64::from_bits(rng.next_u64());
        if float.is_finite() && float != 0.0 {
            let expected = significant(&format!("{float:.precision$e}"));
            let actual =
                significant(buffer.format_with(float, Format::Scientific, precision as i32));
            assert_eq!(actual, expected, "{float:?} .{precision}");
        }

        let float = rng.random_range(-1e6..1e6) * 10f64.powi(rng.random_range(-12..6));
        let expected = format!("{float:.precision$}");
        let actual = buffer.format_with(float, Format::Positional, precision as i32);
        assert_eq!(actual, expected, "{float:?} .{precision}");
    }
}

#[test]
fn concrete() {
    let mut buffer = Buffer::new();
    assert_eq!(buffer.format(100.0f32), "100");
    assert_eq!(buffer.format(0.1f64), "0.1");
    assert_eq!(buffer.format_with(1.0f32, Format::Scientific, 2), "1.00e+00");
    assert_eq!(buffer.format_with(-123.456f64, Format::Positional, 2), "-123.46");
    assert_eq!(buffer.format_with(9.999f32, Format::Positional, 2), "10.00");

    let mut digits = [0u8; 32];
    let (num_digits, exponent) = dragon4(&finite(100.0f32), Cutoff::Unique, &mut digits);
    assert_eq!(&digits[..num_digits], b"1");
    assert_eq!(exponent, 2);
}

#[test]
fn specials() {
    let mut buffer = Buffer::new();
    for format in [Format::Positional, Format::Scientific] {
        for precision in [-1, 0, 3] {
            assert_eq!(buffer.format_with(0.0f64, format, precision), "0");
            assert_eq!(buffer.format_with(f64::INFINITY, format, precision), "Inf");
            assert!(buffer.format_with(f32::NAN, format, precision).starts_with("NaN"));
        }
    }
}

#[test]
fn extremes() {
    let mut buffer = Buffer::new();
    let min_positive = f64::from_bits(1);
    assert_eq!(buffer.format_exp(min_positive), "5e-324");
    assert_eq!(buffer.format_exp(-f64::MAX), "-1.7976931348623157e+308");
    assert_eq!(buffer.format_exp(f32::MAX), "3.4028235e+38");
    assert_eq!(buffer.format_exp(f32::from_bits(1)), "1e-45");

    let printed = buffer.format(-min_positive);
    assert_eq!(printed.len(), 327);
    assert!(printed.starts_with("-0.000"));
    assert!(printed.ends_with("5"));
    assert_eq!(printed.parse::<f64>().unwrap(), -min_positive);

    let printed = buffer.format(f64::MAX);
    assert_eq!(printed.len(), 309);
    assert_eq!(printed.parse::<f64>().unwrap(), f64::MAX);
}

#[test]
fn terminator_within_slice() {
    let mut rng = SmallRng::seed_from_u64(4);
    for _ in 0..N / 100 {
        let float = f64::from_bits(rng.next_u64());
        let size = rng.random_range(0..40);
        let mut bytes = vec![0xffu8; size];
        let format = if rng.random_bool(0.5) {
            Format::Positional
        } else {
            Format::Scientific
        };
        let precision = rng.random_range(-1..12);
        let len = format_float(&mut bytes, float, format, precision);
        if size == 0 {
            assert_eq!(len, 0);
        } else {
            assert!(len < size);
            assert_eq!(bytes[len], 0);
            assert!(bytes[..len].is_ascii());
        }
    }
}
