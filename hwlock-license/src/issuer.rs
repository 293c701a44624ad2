//! License issuance (vendor side).

use std::path::Path;

use tracing::info;

use crate::error::LicenseResult;
use crate::keys::PrivateKey;
use crate::payload::{Expiry, LicensePayload, SEPARATOR, b64_encode};

/// Signs license payloads with the vendor's private key.
#[derive(Debug, Clone)]
pub struct LicenseIssuer {
    key: PrivateKey,
}

impl LicenseIssuer {
    /// Creates an issuer around an already loaded private key.
    #[must_use]
    pub fn new(key: PrivateKey) -> Self {
        Self { key }
    }

    /// Loads the private key from a PKCS#8 PEM file.
    ///
    /// # Errors
    ///
    /// [`LicenseError::KeyUnavailable`](crate::LicenseError::KeyUnavailable)
    /// if the file cannot be read.
    pub fn from_pem_file(path: &Path) -> LicenseResult<Self> {
        PrivateKey::load(path).map(Self::new)
    }

    /// Issues a license string binding `hwid` to `expiry` for customer `name`.
    ///
    /// Inputs are validated before any signing happens.
    ///
    /// # Errors
    ///
    /// [`LicenseError::InvalidInput`](crate::LicenseError::InvalidInput) if
    /// `hwid` or `name` is blank.
    pub fn issue(&self, hwid: &str, expiry: Expiry, name: &str) -> LicenseResult<String> {
        let payload = LicensePayload::new(hwid, expiry, name)?;
        self.issue_payload(&payload)
    }

    /// Issues a license string for a prepared payload.
    pub fn issue_payload(&self, payload: &LicensePayload) -> LicenseResult<String> {
        payload.validate()?;

        let payload_b64 = payload.encode()?;
        // Sign the encoded text, not the JSON, so verification never re-encodes.
        let signature = self.key.sign(payload_b64.as_bytes());
        let signature_b64 = b64_encode(signature.to_bytes());

        info!(
            expiry = %payload.expiry,
            lifetime = payload.is_lifetime(),
            "issued license"
        );
        Ok(format!("{payload_b64}{SEPARATOR}{signature_b64}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LicenseError;
    use crate::keys::KeyPair;

    fn issuer() -> LicenseIssuer {
        LicenseIssuer::new(KeyPair::generate().private_key)
    }

    #[test]
    fn output_is_two_ascii_segments() {
        let license = issuer().issue("ABC123", Expiry::Lifetime, "Acme").unwrap();
        assert!(license.is_ascii());
        assert!(!license.contains(char::is_whitespace));
        assert_eq!(license.split(SEPARATOR).count(), 2);
    }

    #[test]
    fn signature_segment_is_64_bytes() {
        let license = issuer().issue("ABC123", Expiry::Lifetime, "Acme").unwrap();
        let (_, sig) = license.split_once(SEPARATOR).unwrap();
        // 64 bytes without padding encode to 86 characters.
        assert_eq!(sig.len(), 86);
    }

    #[test]
    fn issuing_is_deterministic() {
        let issuer = issuer();
        let a = issuer.issue("ABC123", Expiry::Lifetime, "Acme").unwrap();
        let b = issuer.issue("ABC123", Expiry::Lifetime, "Acme").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_hwid_rejected() {
        let err = issuer().issue("", Expiry::Lifetime, "Acme").unwrap_err();
        assert!(matches!(err, LicenseError::InvalidInput(_)));
    }

    #[test]
    fn empty_name_rejected() {
        let err = issuer().issue("ABC123", Expiry::Lifetime, "").unwrap_err();
        assert!(matches!(err, LicenseError::InvalidInput(_)));
    }

    #[test]
    fn prepared_payload_is_revalidated() {
        let payload = LicensePayload {
            hwid: " ".into(),
            expiry: Expiry::Lifetime.date(),
            name: "Acme".into(),
        };
        assert!(issuer().issue_payload(&payload).is_err());
    }

    #[test]
    fn missing_key_file_is_key_unavailable() {
        let err = LicenseIssuer::from_pem_file(Path::new("/nonexistent/hwlock/private.pem"))
            .unwrap_err();
        assert!(matches!(err, LicenseError::KeyUnavailable(_)));
    }
}
