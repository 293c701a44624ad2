//! Shared test helpers for license tests.

#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use ed25519_dalek::{Signer, SigningKey};
use hwlock_license::{KeyPair, LicenseIssuer, LicenseVerifier, PrivateKey};

pub const SEED: [u8; 32] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31, 32,
];

/// Returns a deterministic key pair from a fixed seed.
pub fn test_keypair() -> KeyPair {
    let private_key = PrivateKey::from_bytes(&SEED);
    let public_key = private_key.public_key();
    KeyPair {
        private_key,
        public_key,
    }
}

/// Issuer and verifier sharing the fixed-seed pair.
pub fn test_issuer_verifier() -> (LicenseIssuer, LicenseVerifier) {
    let kp = test_keypair();
    (
        LicenseIssuer::new(kp.private_key),
        LicenseVerifier::new(kp.public_key),
    )
}

/// Builds a license string by hand: `base64url(payload_json).base64url(signature)`,
/// signing the base64url payload text. Independent of the issuer so it can
/// carry arbitrary (including invalid) payloads.
pub fn sign_raw(payload_json: &str) -> String {
    let signing_key = SigningKey::from_bytes(&SEED);
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload_json.as_bytes());
    let signature = signing_key.sign(payload_b64.as_bytes());
    let sig_b64 = URL_SAFE_NO_PAD.encode(signature.to_bytes());
    format!("{payload_b64}.{sig_b64}")
}

/// Fixed "today" for deterministic expiry checks.
pub fn today() -> NaiveDate {
    date("2030-06-15")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Replaces the character at `index` with a different base64url character.
pub fn flip_char(s: &str, index: usize) -> String {
    s.char_indices()
        .map(|(i, c)| {
            if i != index {
                c
            } else if c == 'A' {
                'B'
            } else {
                'A'
            }
        })
        .collect()
}
