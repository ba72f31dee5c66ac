use crate::{F, IMPLS, Impl};
use anyhow::{Result, bail};
use std::env;

pub struct Args {
    pub benchmark: Vec<(&'static str, Type)>,
    pub unpredictable: bool,
}

pub enum Type {
    F32(F<f32>),
    F64(F<f64>),
}

// Parses `[--unpredictable] [NAME[:f32|:f64]]...`. With no names, every
// implementation is benchmarked on every type it supports.
pub fn parse() -> Result<Args> {
    let mut benchmark = Vec::new();
    let mut unpredictable = false;

    for arg in env::args_os().skip(1) {
        let Some(arg) = arg.to_str() else {
            bail!("unsupported: {}", arg.display());
        };
        if arg == "--unpredictable" {
            unpredictable = true;
            continue;
        }
        let (name, ty) = match arg.split_once(':') {
            Some((name, ty)) => (name, Some(ty)),
            None => (arg, None),
        };
        let Some(imp) = IMPLS.iter().find(|imp| imp.name == name) else {
            bail!("unknown implementation: {name}");
        };
        let before = benchmark.len();
        match ty {
            None => push_all(&mut benchmark, imp),
            Some("f32") => benchmark.extend(imp.f32.map(|f| (imp.name, Type::F32(f)))),
            Some("f64") => benchmark.extend(imp.f64.map(|f| (imp.name, Type::F64(f)))),
            Some(ty) => bail!("unsupported type: {ty}"),
        }
        if benchmark.len() == before {
            bail!("{name} does not support {arg}");
        }
    }

    if benchmark.is_empty() {
        for imp in IMPLS {
            push_all(&mut benchmark, imp);
        }
    }

    Ok(Args {
        benchmark,
        unpredictable,
    })
}

fn push_all(benchmark: &mut Vec<(&'static str, Type)>, imp: &Impl) {
    benchmark.extend(imp.f32.map(|f| (imp.name, Type::F32(f))));
    benchmark.extend(imp.f64.map(|f| (imp.name, Type::F64(f))));
}
