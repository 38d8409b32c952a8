//! String hashing and the double-hashing probe sequence

/// Base of the primary hash; a prime above the byte range
pub const PRIME_1: usize = 151;
/// Base of the secondary hash, which sets the probe step
pub const PRIME_2: usize = 163;

/// Hashes `key` as a base-`base` number whose digits are the key bytes,
/// reduced modulo `modulus` after every digit.
///
/// `modulus` must be non-zero; a zero modulus yields 0.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn hash(key: &str, base: usize, modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }

    let base = widen(base);
    let modulus = widen(modulus);
    let hash = key
        .bytes()
        .fold(0_u128, |acc, byte| (acc * base + u128::from(byte)) % modulus);

    narrow(hash)
}

/// Computes the index visited on `attempt` for `key` in a table of
/// `num_buckets` slots.
///
/// The index is `(hash_a + attempt * step) mod num_buckets`, where `step` is
/// `hash_b + 1` folded into `1..num_buckets` so it can never be 0.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn probe(key: &str, num_buckets: usize, attempt: usize) -> usize {
    if num_buckets == 0 {
        return 0;
    }

    let (start, step) = start_and_step(key, num_buckets);
    let n = widen(num_buckets);
    narrow((widen(start) + widen(attempt) * widen(step)) % n)
}

/// Returns the attempt-0 index and the probe step for `key`
#[allow(clippy::arithmetic_side_effects)]
fn start_and_step(key: &str, num_buckets: usize) -> (usize, usize) {
    let hash_a = hash(key, PRIME_1, num_buckets);
    let hash_b = hash(key, PRIME_2, num_buckets);
    // hash_b + 1 == num_buckets would be a zero step
    let step = match num_buckets {
        0 | 1 => 1,
        n => hash_b % (n - 1) + 1,
    };
    (hash_a, step)
}

/// Lossless `usize` to `u128`
fn widen(value: usize) -> u128 {
    value as u128
}

/// `u128` back to `usize`; callers only pass values already below a `usize` modulus
#[allow(clippy::cast_possible_truncation)]
fn narrow(value: u128) -> usize {
    value as usize
}

/// Iterator over the probe indices for one key
///
/// Yields exactly `num_buckets` indices, attempts `0, 1, 2, ...` in order.
/// When `num_buckets` is prime every index appears exactly once.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    /// Index of the next attempt
    index: usize,
    /// Distance between consecutive attempts, in `1..num_buckets`
    step: usize,
    /// Table size the indices are reduced by
    num_buckets: usize,
    /// Attempts left to yield
    remaining: usize,
}

impl ProbeSequence {
    /// Creates the probe sequence of `key` over `num_buckets` slots
    #[must_use]
    pub fn new(key: &str, num_buckets: usize) -> Self {
        if num_buckets == 0 {
            return Self { index: 0, step: 1, num_buckets: 0, remaining: 0 };
        }
        let (index, step) = start_and_step(key, num_buckets);
        Self { index, step, num_buckets, remaining: num_buckets }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.index;
        // index and step are both below num_buckets, so subtracting avoids overflow
        let gap = self.num_buckets - self.step;
        self.index = if current >= gap { current - gap } else { current + self.step };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
