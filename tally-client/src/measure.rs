use tally_lib::account::AccountId;
use tally_lib::amount::TokenAmount;
use tally_lib::delta::{Delta, Relation};
use tally_lib::error::TallyError;

use crate::source::BalanceSource;

/// Measurement session bound to one account and the balance snapshot taken
/// at construction.
///
/// `delta` may be called any number of times; every call re-queries the live
/// balance and diffs against the original snapshot, so a long scenario sees
/// cumulative change. The session must not span accounts, and the measured
/// account must not be mutated by concurrent scenarios while a session is
/// open; both are caller obligations, not runtime guards.
pub struct BalanceDelta<'a, S: ?Sized> {
    source: &'a S,
    account: AccountId,
    initial: TokenAmount,
}

impl<'a, S: BalanceSource + ?Sized> BalanceDelta<'a, S> {
    /// Snapshots the account's current available balance. Fails when the
    /// balance query fails; the query error propagates unchanged.
    pub async fn create(source: &'a S, account: AccountId) -> anyhow::Result<Self> {
        let initial = source.available_balance(&account).await?;
        Ok(BalanceDelta {
            source,
            account,
            initial,
        })
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// The snapshot taken at `create`, fixed for the session's lifetime.
    pub fn initial(&self) -> &TokenAmount {
        &self.initial
    }

    /// Re-queries the live balance and returns `current - initial`.
    pub async fn delta(&self) -> anyhow::Result<Delta> {
        let current = self.source.available_balance(&self.account).await?;
        Ok(Delta::new(current - &self.initial))
    }

    /// Computes a fresh delta and fails with a descriptive
    /// [`TallyError::Assertion`] unless `relation` holds against `by`
    /// (defaulting to zero).
    pub async fn assert_holds(
        &self,
        relation: Relation,
        by: Option<&TokenAmount>,
    ) -> anyhow::Result<()> {
        let delta = self.delta().await?;
        let zero = TokenAmount::zero();
        if relation.holds(&delta, by.unwrap_or(&zero)) {
            Ok(())
        } else {
            Err(TallyError::Assertion {
                account: self.account.clone(),
                relation,
                actual: delta.to_human(),
            }
            .into())
        }
    }

    pub async fn is_zero(&self) -> anyhow::Result<()> {
        self.assert_holds(Relation::Zero, None).await
    }

    pub async fn is_greater(&self, by: Option<&TokenAmount>) -> anyhow::Result<()> {
        self.assert_holds(Relation::Greater, by).await
    }

    pub async fn is_greater_or_equal(&self, by: Option<&TokenAmount>) -> anyhow::Result<()> {
        self.assert_holds(Relation::GreaterOrEqual, by).await
    }

    pub async fn is_less(&self, by: Option<&TokenAmount>) -> anyhow::Result<()> {
        self.assert_holds(Relation::Less, by).await
    }

    pub async fn is_less_or_equal(&self, by: Option<&TokenAmount>) -> anyhow::Result<()> {
        self.assert_holds(Relation::LessOrEqual, by).await
    }

    /// Human rendering of a fresh delta, for diagnostics rather than
    /// assertions.
    pub async fn to_human(&self) -> anyhow::Result<String> {
        Ok(self.delta().await?.to_human())
    }

    pub async fn log(&self) -> anyhow::Result<()> {
        let delta = self.to_human().await?;
        tracing::info!(account = %self.account, delta = %delta, "balance delta");
        Ok(())
    }
}
