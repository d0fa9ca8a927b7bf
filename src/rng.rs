//! Seed constructors for pseudo-random generators. Both are wall-clock
//! derived at second resolution and deliberately non-cryptographic.

use chrono::Utc;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Simple RNG seeded from the current Unix timestamp. Two calls within the
/// same second return generators producing identical sequences.
pub fn wall_clock() -> StdRng {
    seeded_at(Utc::now().timestamp())
}

fn seeded_at(secs: i64) -> StdRng {
    StdRng::seed_from_u64(secs as u64)
}

/// RNG seeded from a shuffled decimal expansion of pi. A wall-clock-seeded
/// generator picks a permutation of the digit string's index range (minus the
/// final index); the bytes at the permuted indices are folded into a 64-bit
/// seed by repeated shift-and-or.
///
/// Still a deterministic function of the wall-clock second, so no stronger a
/// seed than [`wall_clock`]; it just scrambles the bits differently.
pub fn pi_permuted() -> StdRng {
    let mut clock = wall_clock();
    StdRng::seed_from_u64(pi_fold_seed(&mut clock))
}

fn pi_fold_seed<R: Rng>(rng: &mut R) -> u64 {
    let digits = format!("{:.64}", std::f64::consts::PI);
    let bytes = digits.as_bytes();

    let mut perm: Vec<usize> = (0..bytes.len() - 1).collect();
    perm.shuffle(rng);

    // The upstream implementation meant to skip the decimal point here, but
    // its guard compared the permuted *index* against '.' (46), so instead of
    // filtering the '.' byte it zeroed whichever slot drew index 46. The fold
    // below keeps the intent-free part of that behavior: every byte,
    // decimal point included, takes part in the seed.
    let mut seed: u64 = 0;
    for &j in &perm {
        seed = (seed << 8) | u64::from(bytes[j]);
    }
    seed
}
