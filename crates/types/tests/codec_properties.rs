use num_bigint::BigUint;
use proptest::prelude::*;
use respect_types::{
    pack_token_id, pack_token_id_lossy, unpack_token_id, Address, CodecError, TokenId,
    TokenIdData, ADDRESS_BYTES,
};

// Property-based tests for the token id codec

fn arbitrary_address() -> impl Strategy<Value = Address> {
    prop::array::uniform20(any::<u8>()).prop_map(Address)
}

fn arbitrary_data() -> impl Strategy<Value = TokenIdData> {
    (arbitrary_address(), any::<u64>(), any::<u8>())
        .prop_map(|(owner, period, mint_type)| TokenIdData::new(owner, period, mint_type))
}

proptest! {
    #[test]
    fn unpack_inverts_pack(data in arbitrary_data()) {
        let id = pack_token_id(&data);
        prop_assert_eq!(unpack_token_id(&id), data);
        prop_assert!(!id.has_reserved_bits());
    }

    #[test]
    fn packed_value_matches_shift_formula(data in arbitrary_data()) {
        let expected = (BigUint::from(data.mint_type) << 224u32)
            + (BigUint::from(data.period_number) << 160u32)
            + BigUint::from_bytes_be(data.owner.as_bytes());
        prop_assert_eq!(pack_token_id(&data).to_biguint(), expected);
    }

    #[test]
    fn distinct_fields_give_distinct_ids(a in arbitrary_data(), b in arbitrary_data()) {
        prop_assert_eq!(a == b, pack_token_id(&a) == pack_token_id(&b));
    }

    #[test]
    fn display_parse_roundtrip(data in arbitrary_data()) {
        let id = pack_token_id(&data);
        let decimal: TokenId = id.to_string().parse().unwrap();
        prop_assert_eq!(decimal, id);

        let hex = format!("0x{}", hex::encode(id.to_be_bytes()));
        let from_hex: TokenId = hex.parse().unwrap();
        prop_assert_eq!(from_hex, id);
    }

    #[test]
    fn lossy_pack_keeps_low_bits(
        owner in arbitrary_address(),
        period in any::<u128>(),
        mint_type in any::<u32>(),
    ) {
        let data = unpack_token_id(&pack_token_id_lossy(owner, period, mint_type));
        prop_assert_eq!(data.owner, owner);
        prop_assert_eq!(data.period_number, period as u64);
        prop_assert_eq!(data.mint_type, mint_type as u8);
    }

    #[test]
    fn checked_wide_construction(
        owner in arbitrary_address(),
        period in any::<u128>(),
        mint_type in any::<u32>(),
    ) {
        let result = TokenIdData::try_from_wide(owner, period, mint_type);
        if period > u64::MAX as u128 {
            prop_assert_eq!(result, Err(CodecError::PeriodOutOfRange(period)));
        } else if mint_type > u8::MAX as u32 {
            prop_assert_eq!(result, Err(CodecError::MintTypeOutOfRange(mint_type)));
        } else {
            prop_assert_eq!(result, Ok(TokenIdData::new(owner, period as u64, mint_type as u8)));
        }
    }

    #[test]
    fn reserved_bits_ignored_on_unpack(data in arbitrary_data(), reserved in prop::array::uniform3(1u8..)) {
        let mut bytes = pack_token_id(&data).to_be_bytes();
        bytes[..3].copy_from_slice(&reserved);
        let id = TokenId::from_be_bytes(bytes);
        prop_assert!(id.has_reserved_bits());
        prop_assert_eq!(unpack_token_id(&id), data);
    }
}

#[test]
fn owner_occupies_low_twenty_bytes() {
    let owner = Address([0xff; ADDRESS_BYTES]);
    let id = pack_token_id(&TokenIdData::new(owner, 0, 0));
    assert_eq!(id.to_biguint(), (BigUint::from(1u8) << 160u32) - 1u8);
}
