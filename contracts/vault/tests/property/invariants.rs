//! Property-based invariant checks over random operation sequences.
//!
//! Invariants tested after every operation:
//! - Σ holder stake == total_staked == Σ registry page stake
//! - registry membership ⇔ stake > 0
//! - reward_per_share never decreases
//! - reward_pool + total_disbursed == total funded (no sweeps in play)
//! - released plus skipped schedule never exceeds the target
//! - vault token balances reconcile with the bookkeeping
//!
//! And once everyone has settled, paid + forfeited trails disbursed by
//! rounding dust only.

use proptest::prelude::*;

use crate::harness::{config, setup, Ctx, Op, HOLDERS, START, WINDOW};

fn check(ctx: &Ctx, prev_rps: i128) -> Result<i128, TestCaseError> {
    let state = ctx.client.get_accrual_state();
    prop_assert!(state.reward_per_share >= prev_rps, "reward_per_share decreased");

    let ledger_sum: i128 = ctx.holders.iter().map(|h| ctx.client.get_staked(h)).sum();
    prop_assert_eq!(ledger_sum, state.total_staked);

    let page = ctx.client.get_holders_list(&0, &(HOLDERS as u32));
    let registry_sum: i128 = page.staked_amounts.iter().sum();
    prop_assert_eq!(registry_sum, state.total_staked);

    let active = ctx
        .holders
        .iter()
        .filter(|h| ctx.client.get_staked(h) > 0)
        .count();
    prop_assert_eq!(page.holders.len() as usize, active);
    prop_assert_eq!(ctx.client.get_number_of_holders() as usize, active);
    for amount in page.staked_amounts.iter() {
        prop_assert!(amount > 0, "registered holder with empty stake");
    }

    prop_assert_eq!(state.reward_pool + state.total_disbursed, ctx.funded);
    prop_assert!(
        state.total_disbursed + state.total_skipped <= config().disbursement_target
    );
    prop_assert!(state.total_claimed + state.total_forfeited <= state.total_disbursed);

    let vault = &ctx.client.address;
    prop_assert_eq!(ctx.balance(&ctx.deposit, vault), state.total_staked);
    prop_assert_eq!(
        ctx.balance(&ctx.reward, vault),
        state.reward_pool + state.total_disbursed - state.total_claimed
    );

    Ok(state.reward_per_share)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_invariants_hold_after_every_operation(
        ops in prop::collection::vec(any::<Op>(), 1..40)
    ) {
        let mut ctx = setup();
        let mut rps = check(&ctx, 0)?;

        for op in &ops {
            ctx.apply(op);
            rps = check(&ctx, rps)?;
        }
    }

    #[test]
    fn prop_rounding_loss_is_bounded(
        ops in prop::collection::vec(any::<Op>(), 1..40)
    ) {
        let mut ctx = setup();
        for op in &ops {
            ctx.apply(op);
        }

        // Settle everyone after the schedule has finished.
        ctx.set_time(ctx.now().max(START + WINDOW) + 1);
        let holders = ctx.holders.clone();
        for h in &holders {
            ctx.client.claim(h);
        }
        check(&ctx, 0)?;

        let state = ctx.client.get_accrual_state();
        let dust = state.total_disbursed - state.total_claimed - state.total_forfeited;
        // At most one unit per accrual plus one per settlement.
        let bound = 2 * (ops.len() + HOLDERS) as i128;
        prop_assert!(dust >= 0);
        prop_assert!(dust <= bound, "dust {} exceeds {}", dust, bound);
    }
}
