//! Offline license verification (application side).
//!
//! Checks run in a fixed order: structure, base64, signature, payload JSON,
//! hardware binding, expiry. The payload is not parsed until its signature
//! has authenticated.

use std::fmt;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use ed25519_dalek::Signature;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LicenseResult;
use crate::keys::PublicKey;
use crate::payload::{LicensePayload, SEPARATOR, b64_decode};

/// Outcome of verifying a license string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    /// Authentic, bound to this machine, not expired.
    Valid,
    /// Structurally sound but the signature does not authenticate.
    InvalidSignature,
    /// Authentic, but the expiry date has passed.
    Expired,
    /// Authentic, but issued for a different hardware id.
    HwidMismatch,
    /// Not a license string, or the signed payload is not well-formed.
    Malformed,
}

impl LicenseStatus {
    /// Returns true only for [`LicenseStatus::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Stable snake_case name, matching the serde representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::HwidMismatch => "hwid_mismatch",
            Self::Malformed => "malformed",
        }
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verdict together with the authenticated payload, when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub status: LicenseStatus,
    /// Present for `Valid`, `HwidMismatch` and `Expired`.
    pub payload: Option<LicensePayload>,
}

impl Verification {
    fn rejected(status: LicenseStatus) -> Self {
        Self {
            status,
            payload: None,
        }
    }
}

/// Verifies license strings against the vendor's public key.
#[derive(Debug, Clone)]
pub struct LicenseVerifier {
    key: PublicKey,
}

impl LicenseVerifier {
    /// Creates a verifier around an already loaded public key.
    #[must_use]
    pub fn new(key: PublicKey) -> Self {
        Self { key }
    }

    /// Creates a verifier from SPKI PEM text, typically embedded with
    /// `include_str!("public.pem")`.
    pub fn from_pem(pem: &str) -> LicenseResult<Self> {
        PublicKey::from_pem(pem).map(Self::new)
    }

    /// Loads the public key from a SPKI PEM file.
    pub fn from_pem_file(path: &Path) -> LicenseResult<Self> {
        PublicKey::load(path).map(Self::new)
    }

    /// Verifies `license` for this machine as of today's UTC date.
    #[must_use]
    pub fn verify(&self, license: &str, expected_hwid: &str) -> LicenseStatus {
        self.verify_on(license, expected_hwid, today_utc())
    }

    /// Verifies `license` as of `today`.
    #[must_use]
    pub fn verify_on(&self, license: &str, expected_hwid: &str, today: NaiveDate) -> LicenseStatus {
        self.inspect_on(license, expected_hwid, today).status
    }

    /// Like [`verify`](Self::verify), but also returns the authenticated
    /// payload so the host can show who the license belongs to.
    #[must_use]
    pub fn inspect(&self, license: &str, expected_hwid: &str) -> Verification {
        self.inspect_on(license, expected_hwid, today_utc())
    }

    /// Like [`verify_on`](Self::verify_on), returning the payload as well.
    #[must_use]
    pub fn inspect_on(&self, license: &str, expected_hwid: &str, today: NaiveDate) -> Verification {
        let verification = self.check(license, expected_hwid, today);
        debug!(status = %verification.status, "license verified");
        verification
    }

    fn check(&self, license: &str, expected_hwid: &str, today: NaiveDate) -> Verification {
        // 1. Structure
        let Some((payload_b64, signature_b64)) = split_segments(license.trim()) else {
            return Verification::rejected(LicenseStatus::Malformed);
        };

        // 2. Base64
        let (Some(payload_json), Some(signature_bytes)) =
            (b64_decode(payload_b64), b64_decode(signature_b64))
        else {
            return Verification::rejected(LicenseStatus::Malformed);
        };
        let Ok(signature) = Signature::from_slice(&signature_bytes) else {
            return Verification::rejected(LicenseStatus::Malformed);
        };

        // 3. Signature over the payload text as received
        if !self.key.verify(payload_b64.as_bytes(), &signature) {
            return Verification::rejected(LicenseStatus::InvalidSignature);
        }

        // 4. Payload
        let Some(payload) = LicensePayload::decode(&payload_json) else {
            return Verification::rejected(LicenseStatus::Malformed);
        };

        // 5. Hardware binding, 6. expiry (the expiry day itself is still valid)
        let status = if payload.hwid != expected_hwid {
            LicenseStatus::HwidMismatch
        } else if today > payload.expiry {
            LicenseStatus::Expired
        } else {
            LicenseStatus::Valid
        };

        Verification {
            status,
            payload: Some(payload),
        }
    }
}

/// Splits into exactly two non-empty segments.
fn split_segments(license: &str) -> Option<(&str, &str)> {
    let (payload, signature) = license.split_once(SEPARATOR)?;
    if payload.is_empty() || signature.is_empty() || signature.contains(SEPARATOR) {
        return None;
    }
    Some((payload, signature))
}

fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
