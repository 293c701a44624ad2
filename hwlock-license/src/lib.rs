//! Offline, hardware-bound software licensing.
//!
//! This crate handles:
//! - Ed25519 key-pair generation, PEM persistence and pair self-testing
//! - License issuance on the vendor side
//! - License verification inside the shipped application, with no network
//!
//! # License Format
//!
//! Licenses are formatted as: `base64url(payload).base64url(signature)`
//! The payload is a JSON object `{"hwid", "expiry", "name"}` and the
//! signature covers the base64url payload text, not the decoded JSON.
//!
//! # Usage
//!
//! ```
//! use hwlock_license::{Expiry, KeyPair, LicenseIssuer, LicenseStatus, LicenseVerifier};
//!
//! let pair = KeyPair::generate();
//! let issuer = LicenseIssuer::new(pair.private_key);
//! let verifier = LicenseVerifier::new(pair.public_key);
//!
//! let license = issuer.issue("ABC123", Expiry::Lifetime, "Acme").unwrap();
//! assert_eq!(verifier.verify(&license, "ABC123"), LicenseStatus::Valid);
//! ```

mod error;
mod issuer;
mod keys;
mod payload;
mod verifier;

pub use error::{LicenseError, LicenseResult};
pub use issuer::LicenseIssuer;
pub use keys::{KeyPair, PrivateKey, PublicKey, verify_pair};
pub use payload::{Expiry, LIFETIME_EXPIRY, LicensePayload, SEPARATOR};
pub use verifier::{LicenseStatus, LicenseVerifier, Verification};
