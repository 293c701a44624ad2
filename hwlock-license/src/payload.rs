//! License claims and their wire encoding.
//!
//! A license string is `base64url(payload_json).base64url(signature)`, using
//! the URL-safe alphabet without padding. The signature covers the
//! base64url payload text exactly as it appears before the separator.

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LicenseError, LicenseResult};

/// Separator between the payload and signature segments.
pub const SEPARATOR: char = '.';

/// Expiry date written for lifetime licenses.
pub const LIFETIME_EXPIRY: NaiveDate = match NaiveDate::from_ymd_opt(9999, 12, 31) {
    Some(date) => date,
    None => panic!("invalid lifetime sentinel"),
};

/// Requested expiry for a new license.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Valid through the end of this UTC calendar day.
    On(NaiveDate),
    /// Never expires in practice; encoded as [`LIFETIME_EXPIRY`].
    Lifetime,
}

impl Expiry {
    /// Returns the concrete date written into the payload.
    #[must_use]
    pub fn date(self) -> NaiveDate {
        match self {
            Self::On(date) => date,
            Self::Lifetime => LIFETIME_EXPIRY,
        }
    }
}

impl From<NaiveDate> for Expiry {
    fn from(date: NaiveDate) -> Self {
        Self::On(date)
    }
}

impl FromStr for Expiry {
    type Err = LicenseError;

    /// Accepts `YYYY-MM-DD` or `lifetime`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("lifetime") {
            return Ok(Self::Lifetime);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::On)
            .map_err(|e| {
                LicenseError::InvalidInput(format!(
                    "expiry must be YYYY-MM-DD or \"lifetime\", got {s:?}: {e}"
                ))
            })
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Lifetime => f.write_str("lifetime"),
        }
    }
}

/// The signed license claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicensePayload {
    /// Hardware identifier the license is bound to. Compared exactly.
    pub hwid: String,
    /// Last UTC day on which the license is valid.
    pub expiry: NaiveDate,
    /// Customer name.
    pub name: String,
}

impl LicensePayload {
    /// Builds a validated payload.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidInput`] if `hwid` or `name` is blank.
    pub fn new(
        hwid: impl Into<String>,
        expiry: Expiry,
        name: impl Into<String>,
    ) -> LicenseResult<Self> {
        let payload = Self {
            hwid: hwid.into(),
            expiry: expiry.date(),
            name: name.into(),
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Returns true if this payload carries the lifetime sentinel.
    #[must_use]
    pub fn is_lifetime(&self) -> bool {
        self.expiry == LIFETIME_EXPIRY
    }

    pub(crate) fn validate(&self) -> LicenseResult<()> {
        if self.hwid.trim().is_empty() {
            return Err(LicenseError::InvalidInput("hwid must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(LicenseError::InvalidInput("name must not be empty".into()));
        }
        Ok(())
    }

    /// JSON-serializes and base64url-encodes the payload segment.
    pub(crate) fn encode(&self) -> LicenseResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Strictly decodes payload JSON. Only call on authenticated bytes.
    pub(crate) fn decode(json: &[u8]) -> Option<Self> {
        serde_json::from_slice(json).ok()
    }
}

/// Encodes bytes with the license alphabet (URL-safe, no padding).
pub(crate) fn b64_encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes a license segment; `None` on any alphabet or padding error.
pub(crate) fn b64_decode(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(segment).ok()
}
