//! One-line composition of a balance measurement with an action under test.
//!
//! Every helper snapshots the account, awaits the action to completion, then
//! asserts on the resulting delta and returns the action's own result
//! unchanged. Action errors propagate before any assertion runs.

use std::future::Future;

use futures::future::try_join_all;
use tally_lib::account::AccountId;
use tally_lib::amount::TokenAmount;
use tally_lib::delta::Relation;

use crate::measure::BalanceDelta;
use crate::source::BalanceSource;

/// Universal composition point: snapshot `account`, run `action`, assert
/// `relation` against `by` (defaulting to zero), return the action's result.
pub async fn apply_delta<S, F, T>(
    source: &S,
    account: &AccountId,
    relation: Relation,
    by: Option<&TokenAmount>,
    action: F,
) -> anyhow::Result<T>
where
    S: BalanceSource + ?Sized,
    F: Future<Output = anyhow::Result<T>>,
{
    let measure = BalanceDelta::create(source, account.clone()).await?;
    let result = action.await?;
    measure.assert_holds(relation, by).await?;
    Ok(result)
}

/// Asserts the action is balance-neutral for `account`: a view call, or an
/// operation fully subsidized by another party.
pub async fn zero_delta<S, F, T>(source: &S, account: &AccountId, action: F) -> anyhow::Result<T>
where
    S: BalanceSource + ?Sized,
    F: Future<Output = anyhow::Result<T>>,
{
    apply_delta(source, account, Relation::Zero, None, action).await
}

/// One-sided tolerance bound where the sign of `amount` selects the
/// inequality family: a negative bound caps a loss from below (the account
/// must not lose more than `|amount|`), a non-negative bound caps a gain
/// from above. `inclusive` admits equality.
///
/// [`lost_at_most`] and [`gained_at_most`] say the same thing without the
/// sign convention.
pub async fn has_delta<S, F, T>(
    source: &S,
    account: &AccountId,
    amount: &TokenAmount,
    inclusive: bool,
    action: F,
) -> anyhow::Result<T>
where
    S: BalanceSource + ?Sized,
    F: Future<Output = anyhow::Result<T>>,
{
    let relation = match (amount.is_negative(), inclusive) {
        (true, true) => Relation::GreaterOrEqual,
        (true, false) => Relation::Greater,
        (false, true) => Relation::LessOrEqual,
        (false, false) => Relation::Less,
    };
    apply_delta(source, account, relation, Some(amount), action).await
}

/// Asserts the account loses at most the non-negative `amount` (the cost of
/// the action is bounded).
pub async fn lost_at_most<S, F, T>(
    source: &S,
    account: &AccountId,
    amount: &TokenAmount,
    inclusive: bool,
    action: F,
) -> anyhow::Result<T>
where
    S: BalanceSource + ?Sized,
    F: Future<Output = anyhow::Result<T>>,
{
    let relation = if inclusive {
        Relation::GreaterOrEqual
    } else {
        Relation::Greater
    };
    let bound = -amount.abs();
    apply_delta(source, account, relation, Some(&bound), action).await
}

/// Asserts the account gains at most the non-negative `amount`.
pub async fn gained_at_most<S, F, T>(
    source: &S,
    account: &AccountId,
    amount: &TokenAmount,
    inclusive: bool,
    action: F,
) -> anyhow::Result<T>
where
    S: BalanceSource + ?Sized,
    F: Future<Output = anyhow::Result<T>>,
{
    let relation = if inclusive {
        Relation::LessOrEqual
    } else {
        Relation::Less
    };
    let bound = amount.abs();
    apply_delta(source, account, relation, Some(&bound), action).await
}

/// Snapshots, runs the action, and hands both back without asserting, for
/// scenarios that inspect or log the delta before deciding how to assert.
pub async fn get_delta<'a, S, F, T>(
    source: &'a S,
    account: &AccountId,
    action: F,
) -> anyhow::Result<(BalanceDelta<'a, S>, T)>
where
    S: BalanceSource + ?Sized,
    F: Future<Output = anyhow::Result<T>>,
{
    let measure = BalanceDelta::create(source, account.clone()).await?;
    let result = action.await?;
    Ok((measure, result))
}

/// Fires `f(0), f(1), ..., f(iterations - 1)` concurrently on the cooperative
/// scheduler and collects results in index order. The first error wins.
pub async fn repeat<F, Fut, T>(iterations: usize, f: F) -> anyhow::Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    try_join_all((0..iterations).map(f)).await
}
