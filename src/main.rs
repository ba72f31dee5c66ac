#![allow(
    clippy::cast_precision_loss,
    clippy::float_cmp,
    clippy::unreadable_literal
)]

mod args;
mod data;
mod traits;
mod verify;

use crate::args::Type;
use crate::data::{Data, Samples};
use anyhow::ensure;
use arrayvec::ArrayString;
use dragon4::Format;
use std::any;
use std::fmt::Write as _;
use std::hint;
use std::time::{Duration, Instant};

const COUNT: usize = if cfg!(miri) { 10 } else { 100_000 };
const TRIALS: usize = if cfg!(miri) { 1 } else { 3 };
const PASSES: usize = if cfg!(miri) { 1 } else { 12 };

type F<T> = fn(T, &mut dyn FnMut(&str));

struct Impl {
    name: &'static str,
    f32: Option<F<f32>>,
    f64: Option<F<f64>>,
    // Prints the shortest round-tripping digits.
    shortest: bool,
}

static IMPLS: &[Impl] = &[
    Impl {
        name: "core[Display]",
        f32: Some(|value, f| {
            let mut buffer = ArrayString::<327>::new();
            write!(buffer, "{value}").unwrap();
            f(&buffer);
        }),
        f64: Some(|value, f| {
            let mut buffer = ArrayString::<327>::new();
            write!(buffer, "{value}").unwrap();
            f(&buffer);
        }),
        shortest: true,
    },
    Impl {
        name: "core[LowerExp]",
        f32: Some(|value, f| {
            let mut buffer = ArrayString::<24>::new();
            write!(buffer, "{value:e}").unwrap();
            f(&buffer);
        }),
        f64: Some(|value, f| {
            let mut buffer = ArrayString::<24>::new();
            write!(buffer, "{value:e}").unwrap();
            f(&buffer);
        }),
        shortest: true,
    },
    Impl {
        name: "dragon4",
        f32: Some(|value, f| f(dragon4::Buffer::new().format(value))),
        f64: Some(|value, f| f(dragon4::Buffer::new().format(value))),
        shortest: true,
    },
    Impl {
        name: "dragon4[e]",
        f32: Some(|value, f| f(dragon4::Buffer::new().format_exp(value))),
        f64: Some(|value, f| f(dragon4::Buffer::new().format_exp(value))),
        shortest: true,
    },
    Impl {
        name: "dragon4[.6]",
        f32: Some(|value, f| f(dragon4::Buffer::new().format_with(value, Format::Positional, 6))),
        f64: Some(|value, f| f(dragon4::Buffer::new().format_with(value, Format::Positional, 6))),
        shortest: false,
    },
    Impl {
        name: "dtoa",
        f32: Some(|value, f| f(dtoa::Buffer::new().format_finite(value))),
        f64: Some(|value, f| f(dtoa::Buffer::new().format_finite(value))),
        shortest: true,
    },
    Impl {
        name: "ryu",
        f32: Some(|value, f| f(ryu::Buffer::new().format_finite(value))),
        f64: Some(|value, f| f(ryu::Buffer::new().format_finite(value))),
        shortest: true,
    },
    #[cfg(not(miri))] // https://github.com/andrepd/teju-jagua-rs/issues/1
    Impl {
        name: "teju",
        f32: Some(|value, f| f(teju::Buffer::new().format_finite(value))),
        f64: Some(|value, f| f(teju::Buffer::new().format_finite(value))),
        shortest: true,
    },
    Impl {
        name: "zmij",
        f32: Some(|value, f| f(zmij::Buffer::new().format_finite(value))),
        f64: Some(|value, f| f(zmij::Buffer::new().format_finite(value))),
        shortest: true,
    },
    Impl {
        name: "null",
        f32: Some(|_value, f| f("")),
        f64: Some(|_value, f| f("")),
        shortest: false,
    },
];

// Best of TRIALS runs, each formatting every value PASSES times.
fn time<T: Copy>(values: &[T], f: F<T>) -> Duration {
    let mut best = Duration::MAX;
    for _trial in 0..TRIALS {
        let begin = Instant::now();
        for _pass in 0..PASSES {
            for &value in values {
                f(value, &mut |repr| {
                    hint::black_box(repr);
                });
            }
        }
        best = Ord::min(best, begin.elapsed());
    }
    best
}

fn measure<T: traits::Float>(samples: &Samples<T>, f: F<T>) {
    println!("  {}", any::type_name::<T>());
    let baseline = if samples.mixed.is_empty() {
        Duration::ZERO
    } else {
        time(&samples.mixed, f)
    };
    for (i, values) in samples.by_digits.iter().enumerate() {
        let duration = time(values, f).saturating_sub(baseline);
        println!(
            "    ({}, {:.2})",
            i + 1,
            duration.as_secs_f64() * 1e9 / (PASSES * samples.count) as f64,
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = args::parse()?;

    let fail = verify::verify_all();
    ensure!(fail == 0, "{fail} values did not round-trip");

    let data = Data::random(COUNT, args.unpredictable);

    let mut current = None;
    for (name, ty) in args.benchmark {
        if current != Some(name) {
            println!("\n{name}");
            current = Some(name);
        }
        match ty {
            Type::F32(f) => measure(&data.f32, f),
            Type::F64(f) => measure(&data.f64, f),
        }
    }
    Ok(())
}
