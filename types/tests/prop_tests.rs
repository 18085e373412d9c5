use proptest::prelude::*;

use stakepoll_types::{Ballot, CommitmentHash, Salt, TokenAmount, VoterAddress};

proptest! {
    /// CommitmentHash hex roundtrip: Display -> from_hex produces identical hash.
    #[test]
    fn commitment_hash_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = CommitmentHash::new(bytes);
        let parsed = CommitmentHash::from_hex(&hash.to_string()).unwrap();
        prop_assert_eq!(parsed.as_bytes(), &bytes);
    }

    /// CommitmentHash::is_zero is true only for all-zero bytes.
    #[test]
    fn commitment_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = CommitmentHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// Salt bincode serialization roundtrip.
    #[test]
    fn salt_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let salt = Salt::new(bytes);
        let encoded = bincode::serialize(&salt).unwrap();
        let decoded: Salt = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.as_bytes(), salt.as_bytes());
    }

    /// Distinct scalar ballots always encode differently.
    #[test]
    fn ballot_encoding_injective(a in any::<i64>(), b in any::<i64>()) {
        let ea = Ballot::Value(a).encode();
        let eb = Ballot::Value(b).encode();
        prop_assert_eq!(ea == eb, a == b);
    }

    /// Ballot Display -> FromStr is the identity for values.
    #[test]
    fn ballot_display_parse(v in any::<i64>()) {
        let parsed: Ballot = Ballot::Value(v).to_string().parse().unwrap();
        prop_assert_eq!(parsed, Ballot::Value(v));
    }

    /// Well-formed addresses always parse.
    #[test]
    fn address_parse_accepts_charset(s in "[A-Za-z0-9_.-]{1,64}") {
        let addr = VoterAddress::parse(&s).unwrap();
        prop_assert_eq!(addr.as_str(), s.as_str());
    }

    /// TokenAmount: checked_add(a, b) == Some(a + b) when no overflow.
    #[test]
    fn token_amount_checked_add(a in 0u128..u128::MAX / 2, b in 0u128..u128::MAX / 2) {
        let sum = TokenAmount::new(a).checked_add(TokenAmount::new(b));
        prop_assert_eq!(sum, Some(TokenAmount::new(a + b)));
    }

    /// TokenAmount: checked_sub returns None when b > a.
    #[test]
    fn token_amount_checked_sub_underflow(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = TokenAmount::new(a).checked_sub(TokenAmount::new(b));
        if b > a {
            prop_assert!(result.is_none());
        } else {
            prop_assert_eq!(result, Some(TokenAmount::new(a - b)));
        }
    }

    /// TokenAmount: saturating_sub never panics and returns ZERO on underflow.
    #[test]
    fn token_amount_saturating_sub(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = TokenAmount::new(a).saturating_sub(TokenAmount::new(b));
        if b > a {
            prop_assert_eq!(result, TokenAmount::ZERO);
        } else {
            prop_assert_eq!(result, TokenAmount::new(a - b));
        }
    }
}
