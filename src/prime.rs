//! Prime helpers used to size the table

/// Result of a primality check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    /// Primality is not defined for values below 2
    Undefined,
    /// The value has a divisor other than 1 and itself
    Composite,
    /// The value is prime
    Prime,
}

impl Primality {
    /// Returns true only for [`Primality::Prime`]
    #[must_use]
    pub fn is_prime(self) -> bool {
        self == Self::Prime
    }
}

/// Checks whether `n` is prime by trial division up to `sqrt(n)`
#[must_use]
pub fn is_prime(n: usize) -> Primality {
    if n < 2 {
        return Primality::Undefined;
    }
    if n < 4 {
        return Primality::Prime;
    }
    if n % 2 == 0 {
        return Primality::Composite;
    }

    let mut divisor: usize = 3;
    // `divisor <= n / divisor` is `divisor * divisor <= n` without the overflow
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return Primality::Composite;
        }
        divisor = divisor.saturating_add(2);
    }

    Primality::Prime
}

/// Returns the smallest prime greater than or equal to `n`
///
/// Values below 2 yield 2.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate).is_prime() {
        candidate = candidate.saturating_add(1);
    }
    candidate
}
