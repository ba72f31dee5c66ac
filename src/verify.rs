use crate::traits::Float;
use crate::{F, IMPLS};
use rand::SeedableRng as _;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::SmallRng;

const VERIFY_RANDOM_COUNT: usize = if cfg!(miri) { 40 } else { 100_000 };

// Formats `value` and checks that the text parses back to the same value.
// Returns the length of the text, or None on mismatch.
fn verify_value<T: Float>(value: T, f: F<T>) -> Option<usize> {
    let mut len = None;

    f(value, &mut |actual| {
        let Ok(roundtrip) = actual.parse::<T>() else {
            eprintln!("Error: failed to parse {actual}");
            return;
        };

        if roundtrip != value {
            eprintln!("Error: roundtrip fail {value:e} -> {actual:?} -> {roundtrip:e}");
            return;
        }

        len = Some(actual.len());
    });

    len
}

// Returns the number of failures.
fn verify<T>(f: F<T>, name: &str, boundary: &[T]) -> usize
where
    T: Float,
    StandardUniform: Distribution<T::Bits>,
{
    print!("Verifying {name:20} {:3} ... ", std::any::type_name::<T>());

    let mut fail = 0;
    for &value in boundary {
        fail += usize::from(verify_value(value, f).is_none());
    }

    let mut rng = SmallRng::seed_from_u64(1);
    let mut len_sum = 0u64;
    let mut len_max = 0usize;
    for _i in 0..VERIFY_RANDOM_COUNT {
        let value = loop {
            let value = T::from_bits(StandardUniform.sample(&mut rng));
            if value.is_finite() {
                break value;
            }
        };
        match verify_value(value, f) {
            Some(len) => {
                len_sum += len as u64;
                len_max = usize::max(len_max, len);
            }
            None => fail += 1,
        }
    }

    let len_avg = len_sum as f64 / VERIFY_RANDOM_COUNT as f64;
    if fail == 0 {
        println!("OK. Length Avg = {len_avg:.3}, Max = {len_max}");
    } else {
        println!("{fail} FAILED");
    }
    fail
}

// Round-trips boundary and random values through every implementation that
// claims to print shortest digits. Returns the total number of failures.
pub fn verify_all() -> usize {
    let boundary_f64 = [
        0.0,
        0.1,
        0.12,
        0.123,
        0.1234,
        1.2345,
        1.0 / 3.0,
        2.0 / 3.0,
        10.0 / 3.0,
        20.0 / 3.0,
        9.999,
        1e21,
        1e-7,
        f64::MIN,
        f64::MAX,
        f64::MIN_POSITIVE,
        0.0f64.next_up(),
    ];
    let boundary_f32 = [
        0.0,
        0.1,
        1.0 / 3.0,
        100.0,
        9.999,
        f32::MIN,
        f32::MAX,
        f32::MIN_POSITIVE,
        0.0f32.next_up(),
    ];

    let mut fail = 0;
    for imp in IMPLS.iter().filter(|imp| imp.shortest) {
        if let Some(f) = imp.f64 {
            fail += verify(f, imp.name, &boundary_f64);
        }
        if let Some(f) = imp.f32 {
            fail += verify(f, imp.name, &boundary_f32);
        }
    }
    fail
}

#[test]
fn shortest_impls_roundtrip() {
    assert_eq!(verify_all(), 0);
}
