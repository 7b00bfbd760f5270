//! Provably fair draw derivation.
//!
//! Every game outcome derives from three inputs: a server seed generated
//! fresh for the wager, a client seed chosen by the player, and a monotonic
//! nonce. The derivation is a keyed one-way hash:
//!
//! ```text
//! digest = HMAC-SHA256(key = server_seed, message = "{client_seed}:{nonce}")
//! draw   = first 4 digest bytes, big-endian
//! ```
//!
//! ## Determinism
//!
//! Identical inputs always produce identical draws. The server seed is
//! withheld until settlement and then disclosed in the wager record, so a
//! player can recompute every draw and audit the outcome, while the house
//! cannot steer a result after seeing the bet.
//!
//! ## Multiple draws
//!
//! A wager needing several values (slot reels, mine positions, plinko rows)
//! increments the nonce per draw; a draw is never reused.

use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a generated server seed in raw bytes (hex doubles this).
pub const SERVER_SEED_BYTES: usize = 32;

/// Length of a generated client seed in raw bytes.
pub const CLIENT_SEED_BYTES: usize = 16;

/// Generate a fresh, unpredictable server seed as a hex string.
///
/// Must be called once per wager; reusing a server seed lets a player who
/// saw one outcome predict the next.
pub fn generate_server_seed() -> String {
    let mut bytes = [0u8; SERVER_SEED_BYTES];
    OsRng.fill_bytes(&mut bytes);
    commonware_utils::hex(&bytes)
}

/// Generate a client seed on behalf of a player who did not supply one.
pub fn generate_client_seed() -> String {
    let mut bytes = [0u8; CLIENT_SEED_BYTES];
    OsRng.fill_bytes(&mut bytes);
    commonware_utils::hex(&bytes)
}

/// Derive the raw 32-bit draw for `(server_seed, client_seed, nonce)`.
pub fn derive_u32(server_seed: &str, client_seed: &str, nonce: u64) -> u32 {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(server_seed.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(format!("{}:{}", client_seed, nonce).as_bytes());
    let digest = mac.finalize().into_bytes();
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Derive an integer uniformly reduced into `[min, max]` (inclusive).
///
/// Callers must pass `min <= max`; the range is reduced by modulo, matching
/// the published verification recipe.
pub fn derive_in_range(server_seed: &str, client_seed: &str, nonce: u64, min: u32, max: u32) -> u32 {
    debug_assert!(min <= max);
    let n = derive_u32(server_seed, client_seed, nonce);
    let span = (max - min) as u64 + 1;
    min + (n as u64 % span) as u32
}

/// Derive a continuous value in `[0, 1)`.
///
/// Informational variant of the contract; settlement paths use
/// integer-exact helpers like [`crash_point_hundredths`] instead.
pub fn derive_unit(server_seed: &str, client_seed: &str, nonce: u64) -> f64 {
    derive_u32(server_seed, client_seed, nonce) as f64 / (u32::MAX as f64 + 1.0)
}

/// Derive a crash point in hundredths of a multiplier.
///
/// The draw maps to `max(1.01, n / 0xFFFF_FFFF * 10)` rounded half-up to two
/// decimals, computed entirely in integers: the result lies in `[101, 1000]`.
pub fn crash_point_hundredths(server_seed: &str, client_seed: &str, nonce: u64) -> u64 {
    let n = derive_u32(server_seed, client_seed, nonce) as u128;
    let scaled = (n * 2_000 + u32::MAX as u128) / (2 * u32::MAX as u128);
    (scaled as u64).max(101)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SERVER: &str = "6e7db1f40fca3e15d1b8a06c21f5ce8f6e7db1f40fca3e15d1b8a06c21f5ce8f";
    const CLIENT: &str = "9a3c5d7e9a3c5d7e";

    #[test]
    fn derive_is_deterministic() {
        for nonce in [0u64, 1, 7, u64::MAX] {
            assert_eq!(
                derive_u32(SERVER, CLIENT, nonce),
                derive_u32(SERVER, CLIENT, nonce)
            );
        }
    }

    #[test]
    fn derive_depends_on_every_input() {
        let base = derive_u32(SERVER, CLIENT, 1);
        assert_ne!(base, derive_u32(SERVER, CLIENT, 2));
        assert_ne!(base, derive_u32(SERVER, "other-client", 1));
        assert_ne!(
            base,
            derive_u32(
                "f5ce8f6e7db1f40fca3e15d1b8a06c21f5ce8f6e7db1f40fca3e15d1b8a06c21",
                CLIENT,
                1
            )
        );
    }

    #[test]
    fn derive_in_range_respects_bounds() {
        for nonce in 0..2_000u64 {
            let roll = derive_in_range(SERVER, CLIENT, nonce, 1, 100);
            assert!((1..=100).contains(&roll));

            let cell = derive_in_range(SERVER, CLIENT, nonce, 0, 24);
            assert!(cell <= 24);

            let bit = derive_in_range(SERVER, CLIENT, nonce, 0, 1);
            assert!(bit <= 1);
        }
    }

    #[test]
    fn derive_in_range_single_point_range() {
        assert_eq!(derive_in_range(SERVER, CLIENT, 5, 7, 7), 7);
    }

    #[test]
    fn draws_cover_the_range() {
        // Over a few thousand nonces a [1, 100] draw should hit nearly every
        // value; a sparse spread would point at a broken reduction.
        let mut seen = HashSet::new();
        for nonce in 0..5_000u64 {
            seen.insert(derive_in_range(SERVER, CLIENT, nonce, 1, 100));
        }
        assert!(seen.len() >= 95, "only {} distinct values", seen.len());
    }

    #[test]
    fn distinct_nonces_are_distinct_draws() {
        // 32-bit draws over 1000 nonces collide with negligible probability;
        // widespread duplication would indicate nonce reuse in the digest.
        let mut seen = HashSet::new();
        for nonce in 0..1_000u64 {
            seen.insert(derive_u32(SERVER, CLIENT, nonce));
        }
        assert!(seen.len() >= 999);
    }

    #[test]
    fn derive_unit_is_half_open() {
        for nonce in 0..1_000u64 {
            let value = derive_unit(SERVER, CLIENT, nonce);
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn crash_point_bounds() {
        for nonce in 0..2_000u64 {
            let point = crash_point_hundredths(SERVER, CLIENT, nonce);
            assert!((101..=1_000).contains(&point), "point {} out of range", point);
        }
    }

    #[test]
    fn crash_point_is_deterministic() {
        assert_eq!(
            crash_point_hundredths(SERVER, CLIENT, 3),
            crash_point_hundredths(SERVER, CLIENT, 3)
        );
    }

    proptest::proptest! {
        #[test]
        fn derive_in_range_always_lands_inside(
            nonce in proptest::prelude::any::<u64>(),
            min in 0u32..1_000,
            span in 0u32..1_000,
        ) {
            let max = min + span;
            let value = derive_in_range(SERVER, CLIENT, nonce, min, max);
            proptest::prop_assert!((min..=max).contains(&value));
        }
    }

    #[test]
    fn generated_seeds_are_unique_hex() {
        let a = generate_server_seed();
        let b = generate_server_seed();
        assert_eq!(a.len(), SERVER_SEED_BYTES * 2);
        assert_eq!(b.len(), SERVER_SEED_BYTES * 2);
        assert_ne!(a, b);
        assert!(commonware_utils::from_hex(&a).is_some());

        let c = generate_client_seed();
        assert_eq!(c.len(), CLIENT_SEED_BYTES * 2);
        assert!(commonware_utils::from_hex(&c).is_some());
    }
}
