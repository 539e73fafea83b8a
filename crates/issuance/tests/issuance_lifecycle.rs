use proptest::prelude::*;
use respect_issuance::{
    FractalRespect, IssuanceConfig, IssuanceError, DEFAULT_RANKS_DELAY_SECS, RESPECT_SCALE,
};
use respect_types::{Address, ErrorKind, GroupRanking, ManualClock, TokenIdData, ADDRESS_BYTES};
use std::sync::Arc;

// End-to-end issuance scenarios: submission cadence, authorization and
// all-or-nothing rankings over a shared ledger.

const START: u64 = 1_700_000_000;

fn test_address(s: &str) -> Address {
    let hash = blake3::hash(s.as_bytes());
    let mut bytes = [0u8; ADDRESS_BYTES];
    bytes.copy_from_slice(&hash.as_bytes()[..ADDRESS_BYTES]);
    Address(bytes)
}

fn members(prefix: &str, size: usize) -> Vec<Address> {
    (0..size).map(|i| test_address(&format!("{prefix}-{i}"))).collect()
}

struct Fixture {
    respect: FractalRespect,
    clock: Arc<ManualClock>,
    issuer: Address,
    executor: Address,
}

fn fixture() -> Fixture {
    let issuer = test_address("issuer");
    let executor = test_address("executor");
    let clock = Arc::new(ManualClock::new(START));
    let config = IssuanceConfig::new(issuer).with_executor(executor);
    let respect = FractalRespect::new(config, clock.clone()).unwrap();
    Fixture {
        respect,
        clock,
        issuer,
        executor,
    }
}

#[test]
fn three_groups_close_first_period() {
    let f = fixture();
    let g1 = members("g1", 3);
    let g2 = members("g2", 4);
    let g3 = members("g3", 6);
    let groups = vec![
        GroupRanking::from_top_down(1, &g1),
        GroupRanking::from_top_down(2, &g2),
        GroupRanking::from_top_down(3, &g3),
    ];

    let report = f.respect.submit_ranks(&f.executor, &groups).unwrap();

    assert_eq!(report.period_number, 1);
    assert_eq!(f.respect.period_number(), 1);
    assert_eq!(f.respect.last_submission_time(), START);
    assert_eq!(f.respect.token_supply(), 13);
    assert_eq!(f.respect.total_supply(), 369);
    assert_eq!(report.respect_minted, 369);

    // Members are listed top-down: the k-th earns scale slot 5 - k.
    for group in [&g1, &g2, &g3] {
        for (k, member) in group.iter().enumerate() {
            assert_eq!(f.respect.balance_of(member), RESPECT_SCALE[5 - k] as u128);
            assert_eq!(f.respect.token_supply_of_owner(member), 1);
            let id = f.respect.token_of_owner_by_index(member, 0).unwrap();
            assert_eq!(f.respect.unpack_token_id(&id), TokenIdData::new(*member, 1, 0));
        }
    }
    assert_eq!(f.respect.balance_of(&g3[0]), 55);
    assert_eq!(f.respect.balance_of(&g3[1]), 34);
    assert_eq!(f.respect.balance_of(&g3[2]), 21);
    assert_eq!(f.respect.balance_of(&g3[3]), 13);
    assert_eq!(f.respect.balance_of(&g3[4]), 8);
    assert_eq!(f.respect.balance_of(&g3[5]), 5);

    let mut sum = 0u128;
    for i in 0..f.respect.token_supply() {
        let id = f.respect.token_by_index(i).unwrap();
        sum += f.respect.value_of_token(&id).unwrap() as u128;
    }
    assert_eq!(sum, 369);
}

#[test]
fn first_submission_ignores_delay() {
    let issuer = test_address("issuer");
    let clock = Arc::new(ManualClock::new(1_000));
    let respect = FractalRespect::new(IssuanceConfig::new(issuer), clock.clone()).unwrap();
    let group = GroupRanking::from_top_down(1, &members("early", 3));

    let report = respect.submit_ranks(&issuer, &[group.clone()]).unwrap();
    assert_eq!(report.period_number, 1);
    assert_eq!(respect.last_submission_time(), 1_000);
    assert_eq!(respect.next_submission_time(), 1_000 + DEFAULT_RANKS_DELAY_SECS);

    clock.advance(DEFAULT_RANKS_DELAY_SECS - 1);
    let err = respect.submit_ranks(&issuer, &[group]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timing);
    assert_eq!(respect.period_number(), 1);
}

#[test]
fn second_submission_waits_for_delay() {
    let f = fixture();
    let group = GroupRanking::from_top_down(1, &members("a", 3));
    f.respect.submit_ranks(&f.issuer, &[group.clone()]).unwrap();

    f.clock.advance(DEFAULT_RANKS_DELAY_SECS - 1);
    let err = f.respect.submit_ranks(&f.issuer, &[group.clone()]).unwrap_err();
    assert_eq!(
        err,
        IssuanceError::TooEarly {
            now: START + DEFAULT_RANKS_DELAY_SECS - 1,
            next_allowed: START + DEFAULT_RANKS_DELAY_SECS,
        }
    );
    assert_eq!(f.respect.period_number(), 1);

    f.clock.advance(1);
    f.respect.submit_ranks(&f.issuer, &[group]).unwrap();
    assert_eq!(f.respect.period_number(), 2);
    assert_eq!(f.respect.token_supply(), 6);
}

#[test]
fn invalid_group_rolls_back_everything() {
    let f = fixture();
    let groups = vec![
        GroupRanking::from_top_down(1, &members("ok", 6)),
        GroupRanking::from_top_down(2, &members("short", 2)),
    ];
    let before = f.respect.snapshot();

    let err = f.respect.submit_ranks(&f.issuer, &groups).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(f.respect.snapshot(), before);

    // The window is still open: the failed call did not consume it.
    f.respect.submit_ranks(&f.issuer, &groups[..1]).unwrap();
    assert_eq!(f.respect.period_number(), 1);
}

#[test]
fn empty_batch_advances_period() {
    let f = fixture();
    let report = f.respect.submit_ranks(&f.issuer, &[]).unwrap();
    assert_eq!(report.tokens_minted, 0);
    assert_eq!(f.respect.period_number(), 1);
    assert_eq!(f.respect.token_supply(), 0);
}

#[test]
fn stranger_is_rejected_even_when_window_open() {
    let f = fixture();
    let err = f
        .respect
        .submit_ranks(&test_address("stranger"), &[])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(f.respect.period_number(), 0);
}

#[test]
fn earnings_window_over_several_periods() {
    let f = fixture();
    let ranked = members("loyal", 3);
    for _ in 0..4 {
        f.respect
            .submit_ranks(&f.issuer, &[GroupRanking::from_top_down(1, &ranked)])
            .unwrap();
        f.clock.advance(DEFAULT_RANKS_DELAY_SECS);
    }
    assert_eq!(f.respect.period_number(), 4);
    assert_eq!(f.respect.earnings_per_last_periods(&ranked[0], 0), 0);
    assert_eq!(f.respect.earnings_per_last_periods(&ranked[0], 2), 110);
    assert_eq!(f.respect.earnings_per_last_periods(&ranked[0], 100), 220);
    assert_eq!(f.respect.earnings_per_last_periods(&ranked[2], 3), 63);
}

proptest! {
    #[test]
    fn supply_tracks_accepted_submissions(sizes in prop::collection::vec(0usize..=6, 1..6)) {
        let f = fixture();
        let groups: Vec<GroupRanking> = sizes
            .iter()
            .enumerate()
            .map(|(g, size)| GroupRanking::from_top_down(g as u8, &members(&format!("p{g}"), *size)))
            .collect();

        let result = f.respect.submit_ranks(&f.issuer, &groups);
        if sizes.iter().any(|s| *s < 3) {
            prop_assert!(result.is_err());
            prop_assert_eq!(f.respect.token_supply(), 0);
            prop_assert_eq!(f.respect.period_number(), 0);
        } else {
            let expected: u64 = sizes
                .iter()
                .map(|size| RESPECT_SCALE[6 - size..].iter().sum::<u64>())
                .sum();
            prop_assert!(result.is_ok());
            prop_assert_eq!(f.respect.total_supply(), expected as u128);
            prop_assert_eq!(f.respect.token_supply(), sizes.iter().sum::<usize>());
            prop_assert_eq!(f.respect.period_number(), 1);
        }
    }
}
