use tally_client::asserts::{
    apply_delta, gained_at_most, get_delta, has_delta, lost_at_most, zero_delta,
};
use tally_lib::amount::TokenAmount;
use tally_lib::delta::Relation;
use tally_lib::error::TallyError;

use crate::fixture::ledger_fixture::{near, LedgerFixture};

#[tokio::test]
async fn zero_delta_passes_for_view_calls() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();
    let balance = zero_delta(ledger, fixture.alice(), async {
        ledger.balance_of(fixture.alice()).await
    })
    .await
    .unwrap();
    assert_eq!(balance, near(100));
}

#[tokio::test]
async fn zero_delta_flags_balance_movement() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();
    let err = zero_delta(ledger, fixture.alice(), fixture.pay(fixture.alice(), 1))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Account alice.test.near expected zero got: -1 N"
    );
}

// Account starts at 100 N, the action costs exactly 10 N, no fee: losing 10
// is "not more than 10", but more than the allowed 5.
#[tokio::test]
async fn negative_bound_caps_the_loss() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();

    has_delta(
        ledger,
        fixture.alice(),
        &-near(10),
        true,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap();

    let err = has_delta(
        ledger,
        fixture.alice(),
        &-near(5),
        false,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap_err();
    assert!(
        err.to_string().contains("expected greater got: -10 N"),
        "unexpected message: {err}"
    );
}

#[tokio::test]
async fn non_negative_bound_caps_the_gain() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();

    has_delta(
        ledger,
        fixture.contract(),
        &near(10),
        true,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap();

    let err = has_delta(
        ledger,
        fixture.contract(),
        &near(10),
        false,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap_err();
    assert!(
        err.to_string().contains("expected less got: 10 N"),
        "unexpected message: {err}"
    );
}

#[tokio::test]
async fn named_bounds_match_the_sign_convention() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();

    lost_at_most(
        ledger,
        fixture.alice(),
        &near(10),
        true,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap();
    lost_at_most(
        ledger,
        fixture.alice(),
        &near(9),
        true,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap_err();
    gained_at_most(
        ledger,
        fixture.contract(),
        &near(20),
        true,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap();
    gained_at_most(
        ledger,
        fixture.contract(),
        &near(10),
        false,
        fixture.pay(fixture.alice(), 10),
    )
    .await
    .unwrap_err();
}

#[tokio::test]
async fn apply_delta_returns_the_action_result() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();
    let token_id = apply_delta(
        ledger,
        fixture.alice(),
        Relation::LessOrEqual,
        None,
        async {
            fixture.pay(fixture.alice(), 1).await?;
            Ok("token-7".to_string())
        },
    )
    .await
    .unwrap();
    assert_eq!(token_id, "token-7");
}

#[tokio::test]
async fn get_delta_defers_judgement() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();
    let (measure, _) = get_delta(ledger, fixture.alice(), fixture.pay(fixture.alice(), 42))
        .await
        .unwrap();

    // Nothing asserted yet; the caller decides after inspecting.
    let delta = measure.delta().await.unwrap();
    assert_eq!(delta.to_human(), "-42 N");
    assert!(delta.gte(&-near(42)));
    measure.is_less(None).await.unwrap();
}

#[tokio::test]
async fn action_errors_preempt_assertions() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();
    let err = zero_delta(ledger, fixture.alice(), fixture.pay(fixture.alice(), 1_000))
        .await
        .unwrap_err();
    // The transfer itself failed; no assertion ever ran.
    assert!(err.downcast_ref::<TallyError>().is_none());
    assert!(err.to_string().contains("needs"));
}

#[tokio::test]
async fn zero_threshold_defaults() {
    let fixture = LedgerFixture::new();
    let ledger = fixture.ledger();
    // A zero bound with `inclusive` admits a balance-neutral action.
    has_delta(
        ledger,
        fixture.bob(),
        &TokenAmount::zero(),
        true,
        fixture.pay(fixture.bob(), 0),
    )
    .await
    .unwrap();
}
