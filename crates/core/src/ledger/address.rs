use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

lazy_static! {
    /// `0x` followed by 20 bytes of hex
    static ref ADDRESS_REGEX: Regex =
        Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("Invalid regex pattern");
}

/// A syntactically valid ledger account or contract address.
///
/// Equality is exact string equality. No checksum or case folding is applied,
/// so ownership checks never match an address that differs only in case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

/// Identifies one campaign record on the ledger.
pub type CampaignAddress = Address;

/// The account on whose behalf operations are performed.
pub type ActorIdentity = Address;

impl Address {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if ADDRESS_REGEX.is_match(raw) {
            Ok(Address(raw.to_string()))
        } else {
            Err(ValidationError::InvalidAddress(raw.to_string()))
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        ADDRESS_REGEX.is_match(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
