use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::TallyError;

/// Yocto digits in one whole token.
pub const TOKEN_EXP: u32 = 24;

/// Signed amount of ledger-native currency, denominated in yocto (the
/// smallest indivisible unit, `10^-24` of a whole token).
///
/// Ledger balances are non-negative; negative values appear as thresholds and
/// differences. Arithmetic is exact arbitrary-precision integer arithmetic,
/// never floating point.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(BigInt);

/// Unit prefixes accepted and rendered, largest first. The magnitude of the
/// rendered amount picks the first prefix it reaches.
const UNITS: &[(&str, u32)] = &[("N", TOKEN_EXP), ("mN", 21), ("μN", 18)];

fn yocto_unit(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}

impl TokenAmount {
    pub fn zero() -> Self {
        TokenAmount(BigInt::zero())
    }

    pub fn from_yocto(yocto: impl Into<BigInt>) -> Self {
        TokenAmount(yocto.into())
    }

    pub fn from_near(near: u64) -> Self {
        TokenAmount(BigInt::from(near) * yocto_unit(TOKEN_EXP))
    }

    pub fn from_millinear(millinear: u64) -> Self {
        TokenAmount(BigInt::from(millinear) * yocto_unit(21))
    }

    pub fn from_micronear(micronear: u64) -> Self {
        TokenAmount(BigInt::from(micronear) * yocto_unit(18))
    }

    pub fn as_yocto(&self) -> &BigInt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        TokenAmount(self.0.abs())
    }

    /// Renders the amount scaled to the largest unit prefix its magnitude
    /// reaches, trimming trailing fractional zeros. Amounts below one `μN`
    /// render as raw yocto (`yN`). Exact zero renders as `0 N`.
    pub fn to_human(&self) -> String {
        if self.0.is_zero() {
            return "0 N".to_string();
        }
        let sign = if self.0.is_negative() { "-" } else { "" };
        let mag = self.0.abs();
        for (suffix, exp) in UNITS {
            if mag >= yocto_unit(*exp) {
                return format!("{sign}{} {suffix}", format_scaled(&mag, *exp));
            }
        }
        format!("{sign}{mag} yN")
    }
}

/// `mag / 10^exp` as a decimal string, full precision, no trailing zeros.
fn format_scaled(mag: &BigInt, exp: u32) -> String {
    let unit = yocto_unit(exp);
    let int = mag / &unit;
    let frac = mag % &unit;
    if frac.is_zero() {
        return int.to_string();
    }
    let mut digits = frac.to_string();
    while digits.len() < exp as usize {
        digits.insert(0, '0');
    }
    while digits.ends_with('0') {
        digits.pop();
    }
    format!("{int}.{digits}")
}

impl fmt::Display for TokenAmount {
    /// Raw signed yocto digits, the ledger's JSON convention.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAmount {
    type Err = TallyError;

    /// Accepts raw yocto digits (`"1500"`), unit-suffixed decimals
    /// (`"10 N"`, `"7.56 mN"`, `"320 μN"`, `"25 yN"`), underscore digit
    /// grouping, and a leading `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| TallyError::ParseAmount {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '_'))
            .unwrap_or(trimmed.len());
        let (number, unit) = trimmed.split_at(split);
        let exp = match unit.trim() {
            "" | "yN" => 0,
            "μN" | "uN" => 18,
            "mN" => 21,
            "N" => 24,
            _ => return Err(err("unknown unit")),
        };

        let number = number.replace('_', "");
        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number.as_str()),
        };
        if digits.contains('-') {
            return Err(err("misplaced sign"));
        }
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err("no digits"));
        }
        if frac_part.len() > exp as usize {
            return Err(err("more fractional digits than the unit holds"));
        }

        let int = if int_part.is_empty() {
            BigInt::zero()
        } else {
            int_part.parse::<BigInt>().map_err(|_| err("bad digits"))?
        };
        let mut yocto = int * yocto_unit(exp);
        if !frac_part.is_empty() {
            let frac = frac_part.parse::<BigInt>().map_err(|_| err("bad digits"))?;
            yocto += frac * yocto_unit(exp - frac_part.len() as u32);
        }
        if negative {
            yocto = -yocto;
        }
        Ok(TokenAmount(yocto))
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for TokenAmount {
            type Output = TokenAmount;
            fn $method(self, rhs: TokenAmount) -> TokenAmount {
                TokenAmount(self.0.$method(rhs.0))
            }
        }

        impl $trait<&TokenAmount> for TokenAmount {
            type Output = TokenAmount;
            fn $method(self, rhs: &TokenAmount) -> TokenAmount {
                TokenAmount(self.0.$method(&rhs.0))
            }
        }

        impl $trait<TokenAmount> for &TokenAmount {
            type Output = TokenAmount;
            fn $method(self, rhs: TokenAmount) -> TokenAmount {
                TokenAmount((&self.0).$method(rhs.0))
            }
        }

        impl $trait<&TokenAmount> for &TokenAmount {
            type Output = TokenAmount;
            fn $method(self, rhs: &TokenAmount) -> TokenAmount {
                TokenAmount((&self.0).$method(&rhs.0))
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);

impl Neg for TokenAmount {
    type Output = TokenAmount;
    fn neg(self) -> TokenAmount {
        TokenAmount(-self.0)
    }
}

impl Neg for &TokenAmount {
    type Output = TokenAmount;
    fn neg(self) -> TokenAmount {
        TokenAmount(-&self.0)
    }
}

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = TokenAmount>>(iter: I) -> TokenAmount {
        TokenAmount(iter.map(|amount| amount.0).sum())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TokenAmount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TokenAmount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
