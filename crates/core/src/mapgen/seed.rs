//! Deterministic seed mixing for per-level random streams.

const BONUS_STREAM: u64 = 0xB0B0_5EED_0000_0001;

/// Independent stream seed for one level (or its bonus stage) of a run.
pub fn derive_level_seed(run_seed: u64, level: u32, bonus: bool) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(level).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    if bonus {
        mixed ^= BONUS_STREAM.wrapping_mul(0x94D0_49BB_1331_11EB);
    }
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
