//! Quadratic probe sequence and prime capacity arithmetic

/// Candidate indices `(home + j²) mod capacity` for `j = 0, 1, 2, …`.
///
/// The sequence is cut off after `capacity` candidates. With a prime
/// capacity the first `(capacity + 1) / 2` candidates are pairwise distinct,
/// so a table kept below half occupancy always reaches an open cell well
/// before the cut-off.
#[derive(Debug, Clone)]
pub(crate) struct QuadraticProbe {
    /// Next candidate to hand out
    index: usize,
    /// Number of candidates handed out so far
    attempt: usize,
    /// Table length the indices wrap around
    capacity: usize,
}

impl QuadraticProbe {
    /// Starts a probe walk at `home`, which must already be below `capacity`
    pub(crate) const fn new(home: usize, capacity: usize) -> Self {
        Self { index: home, attempt: 0, capacity }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= self.capacity {
            return None;
        }
        let current = self.index;
        // (j + 1)² - j² = 2j + 1, so each step grows by two
        let step = self.attempt.saturating_mul(2).saturating_add(1);
        self.index = add_mod(current, step.checked_rem(self.capacity).unwrap_or(0), self.capacity);
        self.attempt = self.attempt.saturating_add(1);
        Some(current)
    }
}

/// `(a + b) mod m` for `a, b < m` without overflowing
const fn add_mod(a: usize, b: usize, m: usize) -> usize {
    let gap = m.saturating_sub(a);
    if b >= gap { b.saturating_sub(gap) } else { a.saturating_add(b) }
}

/// Reduces a key digest to its home index in a table of `capacity` cells
pub(crate) fn home_slot(digest: u64, capacity: usize) -> usize {
    let modulus = u64::try_from(capacity).unwrap_or(u64::MAX);
    let slot = digest.checked_rem(modulus).unwrap_or(0);
    usize::try_from(slot).unwrap_or(0)
}

/// Returns true if `n` is prime
pub(crate) fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor: usize = 3;
    while divisor.saturating_mul(divisor) <= n {
        if n.checked_rem(divisor) == Some(0) {
            return false;
        }
        divisor = divisor.saturating_add(2);
    }
    true
}

/// Smallest prime greater than or equal to `n`
pub(crate) fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        match candidate.checked_add(1) {
            Some(next) => candidate = next,
            None => break,
        }
    }
    candidate
}

/// Capacity a table of `capacity` cells grows to: the first prime at or above 1.5x
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    next_prime(capacity.saturating_add(capacity.div_ceil(2)))
}
