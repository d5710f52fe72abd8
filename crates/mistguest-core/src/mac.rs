// ── MAC address normalization ──
//
// Guests are keyed by MAC. Operators paste addresses in whatever format
// their tooling prints, so every mutating operation funnels input
// through here first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Strip separators, lowercase, and require exactly 12 hex digits.
fn strip(input: &str) -> Result<String, CoreError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .collect::<String>()
        .to_ascii_lowercase();

    if cleaned.len() == 12 && cleaned.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(cleaned)
    } else {
        Err(CoreError::InvalidMacAddress {
            input: input.to_owned(),
        })
    }
}

/// Canonical colon form: `aa:bb:cc:dd:ee:ff`.
pub fn normalize(input: &str) -> Result<String, CoreError> {
    MacAddress::parse(input).map(|mac| mac.0)
}

/// Compact form: `aabbccddeeff`.
pub fn to_compact(input: &str) -> Result<String, CoreError> {
    strip(input)
}

/// A validated MAC address, stored in canonical colon form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Accepts colon-, hyphen-, or dot-separated hex, or bare 12 hex digits.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let bare = strip(input)?;
        let octets: Vec<&str> = bare
            .as_bytes()
            .chunks(2)
            .filter_map(|pair| std::str::from_utf8(pair).ok())
            .collect();
        Ok(Self(octets.join(":")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare lowercase hex, for API paths that demand it.
    pub fn compact(&self) -> String {
        self.0.replace(':', "")
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MacAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}
