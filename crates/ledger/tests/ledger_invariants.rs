use proptest::prelude::*;
use respect_ledger::{LedgerError, MintInstruction, TokenLedger, TokenMinter};
use respect_types::{Address, TokenId, TokenIdData, ADDRESS_BYTES};
use std::collections::HashMap;

// Property-based tests for the token ledger
// Random mint/burn sequences must never break supply or index invariants

#[derive(Debug, Clone)]
enum Op {
    Mint {
        owner: u8,
        period: u64,
        mint_type: u8,
        value: u64,
    },
    BurnByIndex(usize),
    BurnOwnerToken { owner: u8, index: usize },
}

fn owner_address(n: u8) -> Address {
    let mut bytes = [0u8; ADDRESS_BYTES];
    bytes[0] = n.wrapping_add(1);
    Address(bytes)
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..5, 0u64..6, 0u8..3, 1u64..=100).prop_map(|(owner, period, mint_type, value)| {
            Op::Mint { owner, period, mint_type, value }
        }),
        1 => (0usize..40).prop_map(Op::BurnByIndex),
        1 => (0u8..5, 0usize..10).prop_map(|(owner, index)| Op::BurnOwnerToken { owner, index }),
    ]
}

fn assert_matches_model(ledger: &TokenLedger, model: &HashMap<TokenId, u64>) {
    assert_eq!(ledger.token_supply(), model.len());
    let total: u128 = model.values().map(|v| *v as u128).sum();
    assert_eq!(ledger.total_supply(), total);

    let mut seen = Vec::new();
    for i in 0..ledger.token_supply() {
        let id = ledger.token_by_index(i).unwrap();
        assert_eq!(ledger.value_of_token(&id).unwrap(), model[&id]);
        seen.push(id);
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), model.len());
    assert!(matches!(
        ledger.token_by_index(ledger.token_supply()),
        Err(LedgerError::IndexOutOfRange { .. })
    ));

    for n in 0u8..5 {
        let owner = owner_address(n);
        let owned: Vec<(&TokenId, &u64)> =
            model.iter().filter(|(id, _)| id.owner() == owner).collect();
        let balance: u128 = owned.iter().map(|(_, v)| **v as u128).sum();
        assert_eq!(ledger.token_supply_of_owner(&owner), owned.len());
        assert_eq!(ledger.balance_of(&owner), balance);

        let mut by_index = 0u128;
        for i in 0..owned.len() {
            let id = ledger.token_of_owner_by_index(&owner, i).unwrap();
            by_index += ledger.value_of_token(&id).unwrap() as u128;
        }
        assert_eq!(by_index, balance);
        assert!(matches!(
            ledger.token_of_owner_by_index(&owner, owned.len()),
            Err(LedgerError::OwnerIndexOutOfRange { .. })
        ));
    }

    ledger.verify_consistency().unwrap();
}

proptest! {
    #[test]
    fn random_mint_burn_sequences_keep_invariants(
        ops in prop::collection::vec(arbitrary_op(), 1..60),
    ) {
        let mut ledger = TokenLedger::new();
        let mut model: HashMap<TokenId, u64> = HashMap::new();

        for op in ops {
            match op {
                Op::Mint { owner, period, mint_type, value } => {
                    let owner = owner_address(owner);
                    let id = TokenIdData::new(owner, period, mint_type).pack();
                    let result = ledger.mint(id, value, owner);
                    if model.contains_key(&id) {
                        prop_assert_eq!(result, Err(LedgerError::DuplicateToken { token_id: id }));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(id, value);
                    }
                }
                Op::BurnByIndex(index) => {
                    match ledger.token_by_index(index) {
                        Ok(id) => {
                            let burned = ledger.burn(&id).unwrap();
                            prop_assert_eq!(Some(burned), model.remove(&id));
                            prop_assert!(matches!(
                                ledger.burn(&id),
                                Err(LedgerError::TokenNotFound { .. })
                            ), "expected TokenNotFound on burn of missing token");
                        }
                        Err(err) => prop_assert!(index >= model.len(), "{}", err),
                    }
                }
                Op::BurnOwnerToken { owner, index } => {
                    let owner = owner_address(owner);
                    if let Ok(id) = ledger.token_of_owner_by_index(&owner, index) {
                        let before = ledger.balance_of(&owner);
                        let burned = ledger.burn(&id).unwrap();
                        prop_assert_eq!(ledger.balance_of(&owner), before - burned as u128);
                        model.remove(&id);
                    }
                }
            }
            assert_matches_model(&ledger, &model);
        }
    }
}

proptest! {
    #[test]
    fn failed_batches_leave_ledger_untouched(
        values in prop::collection::vec(1u64..=55, 1..8),
        collide_at in 0usize..8,
    ) {
        let mut ledger = TokenLedger::new();
        let existing_owner = owner_address(0);
        let existing = TokenIdData::new(existing_owner, 1, 0);
        ledger.mint(existing.pack(), 13, existing_owner).unwrap();
        let before = ledger.clone();

        let mut batch: Vec<MintInstruction> = values
            .iter()
            .enumerate()
            .map(|(i, v)| MintInstruction::new(TokenIdData::new(owner_address(i as u8 + 1), 1, 0), *v))
            .collect();
        let at = collide_at % batch.len();
        batch[at] = MintInstruction::new(existing, 21);

        prop_assert!(ledger.mint_batch(&batch).is_err());
        prop_assert_eq!(&ledger, &before);
    }
}
