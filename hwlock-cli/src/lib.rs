//! Vendor-side commands behind the `hwlock` binary.
//!
//! Each command takes explicit key paths and returns its result; printing
//! and exit codes are left to `main`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use hwlock_license::{Expiry, KeyPair, LicenseIssuer, LicenseVerifier, Verification};
use tracing::{info, warn};

/// Default private key file name.
pub const DEFAULT_PRIVATE_KEY: &str = "private.pem";

/// Default public key file name.
pub const DEFAULT_PUBLIC_KEY: &str = "public.pem";

/// Generates a key pair, writes it to disk and self-tests the written files.
pub fn keygen(private_path: &Path, public_path: &Path, force: bool) -> Result<KeyPair> {
    let pair = KeyPair::generate();
    pair.save(private_path, public_path, force).context("Failed to write key pair")?;

    if !check_pair(private_path, public_path)? {
        bail!("written key pair failed its self-test");
    }
    info!("Key pair generated and verified");
    Ok(pair)
}

/// Issues a license string. `expiry` is `YYYY-MM-DD` or `lifetime`.
pub fn issue(private_path: &Path, hwid: &str, expiry: &str, name: &str) -> Result<String> {
    let expiry: Expiry = expiry.parse().context("Invalid expiry")?;
    let issuer = LicenseIssuer::from_pem_file(private_path)
        .with_context(|| format!("Failed to load private key {}", private_path.display()))?;
    let license = issuer
        .issue(hwid, expiry, name)
        .context("Failed to issue license")?;
    info!(%expiry, "License issued");
    Ok(license)
}

/// Loads both key files and checks that they belong together.
///
/// Returns `Ok(false)` for a mismatched pair and `Err` if either file cannot
/// be loaded.
pub fn check_pair(private_path: &Path, public_path: &Path) -> Result<bool> {
    let pair = KeyPair::load(private_path, public_path).context("Failed to load key pair")?;
    let matches = pair.matches();
    if matches {
        info!("Key pair OK");
    } else {
        warn!(
            private = %private_path.display(),
            public = %public_path.display(),
            "Key pair MISMATCH"
        );
    }
    Ok(matches)
}

/// Verifies a license string for `hwid` against the public key file.
pub fn verify(public_path: &Path, license: &str, hwid: &str) -> Result<Verification> {
    let verifier = LicenseVerifier::from_pem_file(public_path)
        .with_context(|| format!("Failed to load public key {}", public_path.display()))?;
    Ok(verifier.inspect(license, hwid))
}
