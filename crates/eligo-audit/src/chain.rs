//! Hash-chain primitives: entry hashing and chain integrity verification.
//!
//! Every audit entry is wrapped in a [`ChainedEntry`] that commits to its
//! predecessor via SHA-256, so modifying any stored entry in place is
//! detectable. Every field that contributes to an entry's hash is listed
//! explicitly so nothing is accidentally omitted.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   3. canonical JSON of the entry (serde_json with no pretty-printing)

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use eligo_contracts::audit::AuditEntry;

/// A single link in the SHA-256 hash chain.
///
/// Each link commits to the previous one via `prev_hash`, forming an
/// append-only chain. Changing any field of the embedded `entry` invalidates
/// `this_hash` and every subsequent `prev_hash`, which [`verify_chain`]
/// detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainedEntry {
    /// Monotonically increasing position in the chain, starting at 0.
    pub sequence: u64,

    /// The immutable audit entry this link protects.
    pub entry: AuditEntry,

    /// SHA-256 hash (hex) of the previous link, or `GENESIS_HASH` for the
    /// first link.
    pub prev_hash: String,

    /// SHA-256 hash (hex) of this link's canonical content, computed by
    /// [`hash_entry`] over (sequence, prev_hash, canonical JSON of entry).
    pub this_hash: String,
}

impl ChainedEntry {
    /// The sentinel `prev_hash` used for the first link in every chain.
    ///
    /// 64 hex zeros, a value that can never be the SHA-256 of real data,
    /// making genesis detection unambiguous.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// Compute the SHA-256 hash for a single chain link.
///
/// The hash commits to the link's position (`sequence`), its connection to
/// the previous link (`prev_hash`), and the full audit entry.
///
/// Returns a lowercase 64-character hex string.
///
/// # Panics
///
/// Panics if `entry` cannot be serialized to JSON, which cannot happen for
/// the well-formed `AuditEntry` type.
pub fn hash_entry(sequence: u64, entry: &AuditEntry, prev_hash: &str) -> String {
    // serde_json::to_vec produces canonical, deterministic JSON without
    // trailing whitespace or key reordering across calls on the same value.
    let entry_json =
        serde_json::to_vec(entry).expect("AuditEntry must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&entry_json);

    hex::encode(hasher.finalize())
}

/// Verify the integrity of a hash chain.
///
/// Returns `true` when the chain is valid according to both rules:
///
/// 1. **Prev-hash linkage**: each link's `prev_hash` equals the `this_hash`
///    of the preceding link (or `GENESIS_HASH` for link 0).
/// 2. **Hash correctness**: each link's `this_hash` matches the value
///    recomputed from its own fields.
///
/// Returns `false` the moment any mismatch is detected. An empty chain is
/// defined as valid.
pub fn verify_chain(links: &[ChainedEntry]) -> bool {
    let mut expected_prev = ChainedEntry::GENESIS_HASH.to_string();

    for link in links {
        // Rule 1: the stored prev_hash must match what we expect.
        if link.prev_hash != expected_prev {
            return false;
        }

        // Rule 2: recompute this_hash and compare to the stored value.
        let recomputed = hash_entry(link.sequence, &link.entry, &link.prev_hash);
        if link.this_hash != recomputed {
            return false;
        }

        // Advance the expected prev_hash to this link's hash.
        expected_prev = link.this_hash.clone();
    }

    true
}
