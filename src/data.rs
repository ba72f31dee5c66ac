use crate::traits::Float;
use rand::SeedableRng as _;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom as _;

pub struct Data {
    pub f32: Samples<f32>,
    pub f64: Samples<f64>,
}

// Inputs for one float type. by_digits[i] holds values with exactly i+1
// significant digits. In unpredictable mode every list is shuffled together
// with `mixed`, whose own timing is subtracted as a baseline.
pub struct Samples<T> {
    pub count: usize,
    pub mixed: Vec<T>,
    pub by_digits: Vec<Vec<T>>,
}

impl Data {
    pub fn random(count: usize, unpredictable: bool) -> Self {
        let mut rng = SmallRng::seed_from_u64(1);
        Data {
            f32: Samples::random(&mut rng, count, unpredictable),
            f64: Samples::random(&mut rng, count, unpredictable),
        }
    }
}

impl<T> Samples<T>
where
    T: Float,
    StandardUniform: Distribution<T::Bits>,
{
    fn random(rng: &mut SmallRng, count: usize, unpredictable: bool) -> Self {
        let mixed = if unpredictable {
            let mut mixed: Vec<T> = (0..count)
                .map(|i| with_digits(rng, i % T::MAX_DIGITS + 1))
                .collect();
            mixed.shuffle(rng);
            mixed
        } else {
            Vec::new()
        };

        let by_digits = (1..=T::MAX_DIGITS)
            .map(|digits| {
                let mut vec = Vec::with_capacity(mixed.len() + count);
                vec.extend_from_slice(&mixed);
                vec.extend((0..count).map(|_| with_digits::<T>(rng, digits)));
                if unpredictable {
                    vec.shuffle(rng);
                }
                vec
            })
            .collect();

        Samples {
            count,
            mixed,
            by_digits,
        }
    }
}

// A random finite float rounded to `digits` significant decimal digits.
fn with_digits<T>(rng: &mut SmallRng, digits: usize) -> T
where
    T: Float,
    StandardUniform: Distribution<T::Bits>,
{
    let prec = digits - 1;
    loop {
        let float = T::from_bits(StandardUniform.sample(rng));
        if float.is_finite() {
            // The printed form is valid float syntax, so parsing cannot fail.
            return format!("{float:.prec$e}").parse().unwrap();
        }
    }
}
