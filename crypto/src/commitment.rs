//! Ballot commitments for commit-reveal polls.
//!
//! `H = Blake2b-256(DOMAIN ‖ len(voter) ‖ voter ‖ ballot ‖ salt)`
//!
//! The voter address is length-prefixed so that no two (voter, ballot) pairs
//! share a preimage, and binding the voter stops one voter from replaying
//! another voter's commitment.

use crate::hash::blake2b_256_multi;
use stakepoll_types::{Ballot, CommitmentHash, Salt, VoterAddress};

/// Domain separation tag for commitment hashes.
pub const COMMITMENT_DOMAIN: &[u8] = b"stakepoll/commit/v1";

/// Compute the commitment a voter publishes during the commit phase.
pub fn compute_commitment(voter: &VoterAddress, ballot: &Ballot, salt: &Salt) -> CommitmentHash {
    let voter_bytes = voter.as_str().as_bytes();
    // Addresses are at most 64 bytes, so the length always fits in one byte.
    let voter_len = [voter_bytes.len() as u8];
    let encoded = ballot.encode();
    CommitmentHash::new(blake2b_256_multi(&[
        COMMITMENT_DOMAIN,
        &voter_len,
        voter_bytes,
        &encoded,
        salt.as_bytes(),
    ]))
}

/// Check a revealed `(ballot, salt)` pair against a stored commitment.
pub fn verify_commitment(
    commitment: &CommitmentHash,
    voter: &VoterAddress,
    ballot: &Ballot,
    salt: &Salt,
) -> bool {
    compute_commitment(voter, ballot, salt) == *commitment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> VoterAddress {
        VoterAddress::new(name)
    }

    #[test]
    fn commitment_verifies_with_same_inputs() {
        let salt = Salt::new([9; 32]);
        let c = compute_commitment(&voter("alice"), &Ballot::Value(42), &salt);
        assert!(verify_commitment(&c, &voter("alice"), &Ballot::Value(42), &salt));
    }

    #[test]
    fn wrong_value_or_salt_fails() {
        let salt = Salt::new([9; 32]);
        let c = compute_commitment(&voter("alice"), &Ballot::Value(42), &salt);
        assert!(!verify_commitment(&c, &voter("alice"), &Ballot::Value(43), &salt));
        assert!(!verify_commitment(
            &c,
            &voter("alice"),
            &Ballot::Value(42),
            &Salt::new([8; 32])
        ));
    }

    #[test]
    fn commitment_is_bound_to_voter() {
        let salt = Salt::new([1; 32]);
        let a = compute_commitment(&voter("alice"), &Ballot::Value(7), &salt);
        let b = compute_commitment(&voter("bob"), &Ballot::Value(7), &salt);
        assert_ne!(a, b);
        assert!(!verify_commitment(&a, &voter("bob"), &Ballot::Value(7), &salt));
    }

    #[test]
    fn additive_collisions_are_gone() {
        // value + salt would collide for (1, s+1) and (2, s); concatenation does not.
        let mut s1 = [0u8; 32];
        s1[31] = 2;
        let mut s2 = [0u8; 32];
        s2[31] = 1;
        let a = compute_commitment(&voter("v"), &Ballot::Value(1), &Salt::new(s1));
        let b = compute_commitment(&voter("v"), &Ballot::Value(2), &Salt::new(s2));
        assert_ne!(a, b);
    }
}
