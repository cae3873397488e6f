//! Keys with caller-chosen digests, used to force collisions in tests

use std::{
    fmt,
    hash::{BuildHasherDefault, Hash, Hasher},
};

/// Hasher reporting the last `u64` written to it as the digest
#[derive(Debug, Default)]
pub(crate) struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(byte);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

/// Builder for [`IdentityHasher`]
pub(crate) type IdentityState = BuildHasherDefault<IdentityHasher>;

/// Key whose digest is chosen independently of its identity
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Collider {
    /// Identity compared by `Eq`
    id: u32,
    /// Digest reported to the hasher
    digest: u64,
}

impl Hash for Collider {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest);
    }
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

impl fmt::Display for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Builds a key with identity `id` that hashes to `digest`
pub(crate) const fn collider(id: u32, digest: u64) -> Collider {
    Collider { id, digest }
}
