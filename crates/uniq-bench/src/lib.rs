//! Benchmark workloads for the uniq ownership primitives.
//!
//! Provides a deterministic, seed-driven mixed-operation workload so the
//! churn benchmarks measure the same op sequence on every run:
//!
//! - [`op_sequence`]: generate a reproducible sequence of pointer ops
//! - [`run_ops`]: drive a pointer through a sequence, returning a checksum

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use uniq::UniquePtr;

/// One step of the mixed ownership workload.
///
/// Only safe-surface operations appear here; the unchecked surface is
/// covered by the core crate's own tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Replace the working pointer with a fresh allocation of this value.
    Wrap(i32),
    /// Read the pointee (no-op when empty).
    Read,
    /// Move the resource out and back in via a second owner.
    Bounce,
    /// Swap the working pointer with the spare slot.
    Swap,
    /// Release the held resource and go empty.
    Clear,
}

/// Generate a reproducible op sequence from `seed`.
///
/// The distribution is deliberately wrap-heavy so the workload exercises
/// allocation and release more than bookkeeping.
pub fn op_sequence(seed: u64, len: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| match rng.random_range(0..8) {
            0..=2 => Op::Wrap(rng.random_range(0..1_000)),
            3..=4 => Op::Read,
            5 => Op::Bounce,
            6 => Op::Swap,
            _ => Op::Clear,
        })
        .collect()
}

/// Drive a pointer (plus one spare slot) through `ops`.
///
/// Returns a checksum of every value read, so the optimizer cannot discard
/// the work and determinism is easy to assert.
pub fn run_ops(ops: &[Op]) -> i64 {
    let mut current: UniquePtr<i32> = UniquePtr::empty();
    let mut spare: UniquePtr<i32> = UniquePtr::empty();
    let mut checksum = 0_i64;

    for op in ops {
        match *op {
            Op::Wrap(v) => current = UniquePtr::new(v),
            Op::Read => {
                if let Some(v) = current.as_ref() {
                    checksum = checksum.wrapping_add(i64::from(*v));
                }
            }
            Op::Bounce => {
                let mut moved = current.take();
                moved.swap(&mut current);
            }
            Op::Swap => current.swap(&mut spare),
            Op::Clear => current.clear(),
        }
    }

    checksum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_sequence_is_deterministic() {
        let a = op_sequence(42, 500);
        let b = op_sequence(42, 500);
        assert_eq!(a, b);
    }

    #[test]
    fn op_sequence_mixes_operations() {
        let ops = op_sequence(7, 1_000);
        assert!(ops.iter().any(|o| matches!(o, Op::Wrap(_))));
        assert!(ops.iter().any(|o| matches!(o, Op::Swap)));
        assert!(ops.iter().any(|o| matches!(o, Op::Clear)));
    }

    #[test]
    fn run_ops_is_deterministic() {
        let ops = op_sequence(42, 2_000);
        assert_eq!(run_ops(&ops), run_ops(&ops));
    }
}
