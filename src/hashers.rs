#![cfg(test)]

// Deterministic hashers for tests that need to control home slots.

use std::hash::{BuildHasher, Hasher};

/// Every key hashes to 0, so every key collides.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ConstBuildHasher;

pub(crate) struct ConstHasher;

impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}

impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

/// Integers hash to themselves, so key `k` has home `k % capacity`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct IdentityBuildHasher;

#[derive(Default)]
pub(crate) struct IdentityHasher(u64);

impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;
    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher::default()
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(b);
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = n.into();
    }

    fn write_i32(&mut self, n: i32) {
        self.0 = n as u32 as u64;
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = n as u64;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

mod tests {
    use super::*;

    #[test]
    fn identity_hasher_passes_integers_through() {
        assert_eq!(IdentityBuildHasher.hash_one(6i32), 6);
        assert_eq!(IdentityBuildHasher.hash_one(29u64), 29);
        assert_eq!(IdentityBuildHasher.hash_one(3usize), 3);
    }

    #[test]
    fn const_hasher_collides_everything() {
        assert_eq!(ConstBuildHasher.hash_one("a"), ConstBuildHasher.hash_one(17u64));
    }
}
