use std::fmt;

use crate::amount::TokenAmount;

/// Immutable signed difference between two balance observations
/// (`after - before`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delta {
    amount: TokenAmount,
}

impl Delta {
    pub fn new(amount: TokenAmount) -> Self {
        Delta { amount }
    }

    pub fn zero() -> Self {
        Delta::new(TokenAmount::zero())
    }

    pub fn amount(&self) -> &TokenAmount {
        &self.amount
    }

    /// Exact integer zero, no tolerance.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn gt(&self, by: &TokenAmount) -> bool {
        self.amount > *by
    }

    pub fn gte(&self, by: &TokenAmount) -> bool {
        self.amount >= *by
    }

    pub fn lt(&self, by: &TokenAmount) -> bool {
        self.amount < *by
    }

    pub fn lte(&self, by: &TokenAmount) -> bool {
        self.amount <= *by
    }

    /// `0 N` for exact zero (never `-0 N`); otherwise the absolute value in
    /// human units, `-`-prefixed when the difference is a loss.
    pub fn to_human(&self) -> String {
        if self.is_zero() {
            return "0 N".to_string();
        }
        let sign = if self.amount.is_negative() { "-" } else { "" };
        format!("{sign}{}", self.amount.abs().to_human())
    }
}

/// Relation a measured delta is asserted to satisfy, relative to a signed
/// threshold. The `Display` form is quoted verbatim in assertion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Zero,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Relation {
    pub fn holds(self, delta: &Delta, by: &TokenAmount) -> bool {
        match self {
            Relation::Zero => delta.is_zero(),
            Relation::Greater => delta.gt(by),
            Relation::GreaterOrEqual => delta.gte(by),
            Relation::Less => delta.lt(by),
            Relation::LessOrEqual => delta.lte(by),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Zero => "zero",
            Relation::Greater => "greater",
            Relation::GreaterOrEqual => "greater or equal",
            Relation::Less => "less",
            Relation::LessOrEqual => "less or equal",
        })
    }
}
