//! Module for testing using fuzzing (quickcheck)

use std::fmt::Debug;

use crate::*;
use quickcheck::Arbitrary;

mod basic;

#[derive(Debug, PartialEq, Clone, Copy)]
enum Operation<K, T> {
    Add(K, T),
    Remove(K),
}

const DEFAULT_NUM_TESTS: usize = if cfg!(miri) { 10 } else { 10000 };
const DEFAULT_GEN_SIZE: usize = 100;

fn env_or(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|x| x.parse().ok())
        .unwrap_or(default)
}

/// Run `f` on `QUICKCHECK_TESTS` random inputs and panic with a shrunken input on failure.
fn proptest_runner<A: Arbitrary + Debug, F: Fn(A) -> bool>(f: F) {
    let mut gen = quickcheck::Gen::new(env_or("QUICKCHECK_GENERATOR_SIZE", DEFAULT_GEN_SIZE));
    for _ in 0..env_or("QUICKCHECK_TESTS", DEFAULT_NUM_TESTS) {
        let input = A::arbitrary(&mut gen);
        if !f(input.clone()) {
            panic!(
                "[QUICKCHECK] Test case failed!\n  Minimal input:\n    {:?}",
                minimize(&f, input)
            );
        }
    }
}

/// Shrink a failing input until none of its shrunken versions fails anymore.
fn minimize<A: Arbitrary, F: Fn(A) -> bool>(f: &F, mut input: A) -> A {
    while let Some(smaller) = input.shrink().find(|i| !f(i.clone())) {
        input = smaller;
    }
    input
}

macro_rules! qc {
    ($name:ident, $f:ident) => {
        #[test]
        fn $name() {
            proptest_runner($f)
        }
    };
}
pub(crate) use qc;

impl<K: Arbitrary, T: Arbitrary> Arbitrary for Operation<K, T> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let k = K::arbitrary(g);
        if g.choose(&[true, true, true, true, true, true, false, false, false, false])
            .copied()
            .unwrap_or_default()
        {
            Self::Add(k, T::arbitrary(g))
        } else {
            Self::Remove(k)
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Operation::Add(k, t) => {
                let t = t.clone();
                Box::new(k.shrink().map(move |k| Operation::Add(k, t.clone())))
            }
            Operation::Remove(k) => Box::new(k.shrink().map(Operation::Remove)),
        }
    }
}

/// Prefix over 32 bits whose host bits are always cleared, so it can be used directly as a key in
/// the naive model.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
struct TestPrefix(u32, u8);

impl Arbitrary for TestPrefix {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // short prefixes collide often, which exercises glue nodes and collapsing.
        #[rustfmt::skip]
        let len: u8 = *g
            .choose(&[
                0,
                1, 1,
                2, 2, 2,
                3, 3, 3, 3,
                4, 4, 4, 4, 4,
                5, 5, 5, 5, 5, 5,
                6, 6, 6, 6, 6, 6, 6,
                7, 7, 7, 7, 7, 7, 7, 7,
                8, 8, 8, 8, 8, 8, 8, 8, 8,
                9, 9, 9, 9, 9, 9, 9, 9, 9, 9,
                32,
            ])
            .unwrap_or(&0);
        let x = u32::arbitrary(g);
        Self::from_repr_len(x, len)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        if self.1 == 0 {
            quickcheck::empty_shrinker()
        } else {
            quickcheck::single_shrinker(Self::from_repr_len(self.0, self.1 - 1))
        }
    }
}

impl Key for TestPrefix {
    type R = u32;

    fn repr(&self) -> u32 {
        self.0
    }

    fn bit_len(&self) -> u8 {
        self.1
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        Self(Key::mask(&(repr, len)), len)
    }
}
