//! Random keys shared by the binaries.

use rand::{Rng, seq::IndexedRandom};

/// Characters random keys are drawn from
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Builds a random lowercase key of `length` characters
pub fn random_key(rng: &mut impl Rng, length: usize) -> String {
    (0..length).filter_map(|_| CHARSET.choose(&mut *rng)).map(|&byte| char::from(byte)).collect()
}
