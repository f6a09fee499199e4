//! Stable string hashing for marker placement.
//!
//! Placement must be reproducible across processes, sessions, and
//! language ports, so the hash is an explicit polynomial over the id's
//! UTF-8 bytes rather than any runtime's default hasher (which may be
//! randomly seeded per process).

/// Polynomial rolling hash with multiplier 31, wrapping on overflow.
///
/// The same id always hashes to the same value, which anchors each
/// member's base angle in the de-overlap spiral.
#[must_use]
pub fn stable_hash(id: &str) -> u64 {
    id.bytes()
        .fold(0_u64, |hash, byte| {
            hash.wrapping_mul(31).wrapping_add(u64::from(byte))
        })
}

/// Derives a base angle in radians, `[0, 2π)`, from a member id.
#[must_use]
pub fn base_angle(id: &str) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let degrees = (stable_hash(id) % 360) as f64;
    degrees.to_radians()
}
