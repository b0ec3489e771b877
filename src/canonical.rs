//! Deterministic fingerprints for scope configurations.
//!
//! A manager's fingerprint identifies the exact scope universe it was built
//! from: same configuration, same fingerprint. Values being fingerprinted
//! must serialize deterministically, so maps in them must keep a stable
//! order (`IndexMap`/`BTreeMap`, never `HashMap`).

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Compute a 64-bit fingerprint of a serializable value.
pub fn fingerprint<T: Serialize>(value: &T) -> u64 {
    let bytes = serde_json::to_vec(value).expect("fingerprint serialization failed");
    xxh64(&bytes, 0)
}

/// Compute a fingerprint and return it as a fixed-width hex string.
pub fn fingerprint_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", fingerprint(value))
}
