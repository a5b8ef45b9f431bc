use async_trait::async_trait;
use tally_lib::account::AccountId;
use tally_lib::amount::TokenAmount;

/// Read-side collaborator that reports an account's available balance (the
/// portion not locked by storage reservations or other holds), in yocto.
///
/// The measurement layer performs exactly one query per snapshot and one per
/// comparison; it never retries. Resilience, if any, belongs to the
/// implementation behind this trait.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn available_balance(&self, account: &AccountId) -> anyhow::Result<TokenAmount>;
}
