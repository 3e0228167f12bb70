//! Property-based tests for claim and withdrawal payouts.

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::Address;

use crate::harness::{setup, Op, DAY, START};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Two back-to-back claims: the second always pays nothing.
    #[test]
    fn prop_second_claim_pays_zero(
        ops in prop::collection::vec(any::<Op>(), 1..25)
    ) {
        let mut ctx = setup();
        for op in &ops {
            ctx.apply(op);
        }

        let holders = ctx.holders.clone();
        for h in &holders {
            ctx.client.claim(h);
            prop_assert_eq!(ctx.client.claim(h), 0);
        }
    }

    /// The read-only estimate is exactly what a claim at the same instant pays.
    #[test]
    fn prop_estimate_matches_claim(
        ops in prop::collection::vec(any::<Op>(), 1..25),
        extra in 0u64..(10 * DAY)
    ) {
        let mut ctx = setup();
        for op in &ops {
            ctx.apply(op);
        }
        ctx.set_time(ctx.now() + extra);

        let holders = ctx.holders.clone();
        for h in &holders {
            let estimate = ctx.client.get_estimated_pending_divs(h);
            prop_assert_eq!(ctx.client.claim(h), estimate);
        }
    }

    /// A holder who joins mid-stream has nothing to claim in the same ledger,
    /// whatever the vault went through before.
    #[test]
    fn prop_newcomer_claims_nothing_on_arrival(
        ops in prop::collection::vec(any::<Op>(), 1..25),
        amount in 1i128..50_000
    ) {
        let mut ctx = setup();
        for op in &ops {
            ctx.apply(op);
        }

        let newcomer = Address::generate(&ctx.env);
        StellarAssetClient::new(&ctx.env, &ctx.deposit).mint(&newcomer, &amount);
        let expiry = ctx.env.ledger().sequence() + 10_000;
        TokenClient::new(&ctx.env, &ctx.deposit)
            .approve(&newcomer, &ctx.client.address, &amount, &expiry);

        if ctx.client.try_deposit(&newcomer, &amount).is_ok() {
            prop_assert_eq!(ctx.client.get_estimated_pending_divs(&newcomer), 0);
            prop_assert_eq!(ctx.client.claim(&newcomer), 0);
        }
    }

    /// Depositing then withdrawing everything returns principal minus both fees,
    /// and the operator receives exactly those fees.
    #[test]
    fn prop_round_trip_charges_both_fees(amount in 200i128..1_000_000_000) {
        let ctx = setup();
        let holder = Address::generate(&ctx.env);
        StellarAssetClient::new(&ctx.env, &ctx.deposit).mint(&holder, &amount);
        let expiry = ctx.env.ledger().sequence() + 10_000;
        TokenClient::new(&ctx.env, &ctx.deposit)
            .approve(&holder, &ctx.client.address, &amount, &expiry);

        ctx.client.deposit(&holder, &amount);
        let net = amount - amount * 50 / 10_000;
        prop_assert_eq!(ctx.client.get_staked(&holder), net);

        ctx.set_time(START + DAY);
        ctx.client.withdraw(&holder, &net);

        let returned = net - net * 50 / 10_000;
        prop_assert_eq!(ctx.balance(&ctx.deposit, &holder), returned);
        prop_assert_eq!(ctx.balance(&ctx.deposit, &ctx.operator), amount - returned);
        prop_assert_eq!(ctx.client.get_number_of_holders(), 0);
    }
}
