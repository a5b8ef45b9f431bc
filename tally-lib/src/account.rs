use std::fmt;
use std::str::FromStr;

use crate::error::TallyError;

/// Addressable entity on the ledger: lowercase alphanumeric segments joined
/// by `.`, with `-`/`_` allowed inside a segment, 2 to 64 characters total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Result<Self, TallyError> {
        let id = id.into();
        if is_valid(&id) {
            Ok(AccountId(id))
        } else {
            Err(TallyError::ParseAccountId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid(id: &str) -> bool {
    if id.len() < 2 || id.len() > 64 {
        return false;
    }
    id.split('.').all(|segment| {
        !segment.is_empty()
            && segment.split(['-', '_']).all(|part| {
                !part.is_empty()
                    && part
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            })
    })
}

impl FromStr for AccountId {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountId::new(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AccountId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AccountId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AccountId::new(raw).map_err(serde::de::Error::custom)
    }
}
