use crate::account::AccountId;
use crate::delta::Relation;

pub type TallyResult<T = ()> = Result<T, TallyError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    /// A measured delta violated the requested relation. This is a deliberate
    /// test failure and must reach the enclosing test case.
    #[error("Account {account} expected {relation} got: {actual}")]
    Assertion {
        account: AccountId,
        relation: Relation,
        /// Human rendering of the measured delta.
        actual: String,
    },

    #[error("unknown method `{0}`")]
    UnknownMethod(String),

    #[error("invalid amount `{input}`: {reason}")]
    ParseAmount { input: String, reason: String },

    #[error("invalid account id `{0}`")]
    ParseAccountId(String),
}
