//! Seeded randomness for sampling cells and ops.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Seeded generator handed to every sampling routine.
///
/// Remembers the seed it was built from so that experiments can record it
/// and derive independent child streams, either by number
/// ([`RngHandle::substream`]) or by name ([`RngHandle::labelled`]). No
/// routine in this workspace draws from OS entropy.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Generator seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Child generator number `id`; unaffected by draws already made from `self`.
    pub fn substream(&self, id: u64) -> Self {
        Self::from_seed(derive_substream_seed(self.seed, id))
    }

    /// Child generator keyed by a human-readable experiment label.
    pub fn labelled(&self, label: &str) -> Self {
        let mut hasher = SipHasher13::new_with_keys(self.seed, 0);
        hasher.write(label.as_bytes());
        Self::from_seed(hasher.finish())
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// SipHash-1-3 of `(master_seed, id)` under zero keys.
pub fn derive_substream_seed(master_seed: u64, id: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(id);
    hasher.finish()
}
