//! hwlock vendor tool
//!
//! Generates the signing key pair, issues hardware-bound licenses and
//! self-tests key files before the public key is embedded into a build.
//!
//! Usage:
//!   hwlock keygen
//!   hwlock issue --hwid ABC123 --expiry 2099-01-01 --name "Acme"
//!   hwlock check-pair
//!   hwlock verify --license <LICENSE> --hwid ABC123
//!
//! Everything runs offline.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hwlock_cli::{DEFAULT_PRIVATE_KEY, DEFAULT_PUBLIC_KEY};
use tracing::{Level, error};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "hwlock")]
#[command(about = "Offline hardware-bound license tool")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new Ed25519 key pair and self-test it
    Keygen {
        /// Output path for the private key (PKCS#8 PEM, unencrypted)
        #[arg(long, env = "HWLOCK_PRIVATE_KEY", default_value = DEFAULT_PRIVATE_KEY)]
        private_key: PathBuf,

        /// Output path for the public key (SPKI PEM)
        #[arg(long, env = "HWLOCK_PUBLIC_KEY", default_value = DEFAULT_PUBLIC_KEY)]
        public_key: PathBuf,

        /// Overwrite existing key files (invalidates every issued license)
        #[arg(long)]
        force: bool,
    },

    /// Issue a license and print it to stdout
    Issue {
        /// Hardware id of the customer machine
        #[arg(long)]
        hwid: String,

        /// Expiry date (YYYY-MM-DD) or "lifetime"
        #[arg(long)]
        expiry: String,

        /// Customer name
        #[arg(long)]
        name: String,

        /// Path to the private key
        #[arg(long, env = "HWLOCK_PRIVATE_KEY", default_value = DEFAULT_PRIVATE_KEY)]
        private_key: PathBuf,
    },

    /// Check that the private and public key files belong together (exit 0/1)
    CheckPair {
        /// Path to the private key
        #[arg(long, env = "HWLOCK_PRIVATE_KEY", default_value = DEFAULT_PRIVATE_KEY)]
        private_key: PathBuf,

        /// Path to the public key
        #[arg(long, env = "HWLOCK_PUBLIC_KEY", default_value = DEFAULT_PUBLIC_KEY)]
        public_key: PathBuf,
    },

    /// Verify a license string for a hardware id (exit 0 only when valid)
    Verify {
        /// License string
        #[arg(long)]
        license: String,

        /// Hardware id to verify against
        #[arg(long)]
        hwid: String,

        /// Path to the public key
        #[arg(long, env = "HWLOCK_PUBLIC_KEY", default_value = DEFAULT_PUBLIC_KEY)]
        public_key: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(args.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Keygen {
            private_key,
            public_key,
            force,
        } => {
            let pair = hwlock_cli::keygen(&private_key, &public_key, force)?;
            eprintln!("\n========================================");
            eprintln!("  Private key: {} (keep offline)", private_key.display());
            eprintln!("  Public key:  {} (embed in builds)", public_key.display());
            eprintln!("========================================\n");
            println!("{}", pair.public_key.to_pem()?.trim_end());
            Ok(ExitCode::SUCCESS)
        }
        Command::Issue {
            hwid,
            expiry,
            name,
            private_key,
        } => {
            let license = hwlock_cli::issue(&private_key, &hwid, &expiry, &name)?;
            println!("{license}");
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckPair {
            private_key,
            public_key,
        } => {
            if hwlock_cli::check_pair(&private_key, &public_key)? {
                println!("OK");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("MISMATCH");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Verify {
            license,
            hwid,
            public_key,
        } => {
            let verification = hwlock_cli::verify(&public_key, &license, &hwid)?;
            match &verification.payload {
                Some(payload) => println!(
                    "{} (name: {}, hwid: {}, expiry: {})",
                    verification.status, payload.name, payload.hwid, payload.expiry
                ),
                None => println!("{}", verification.status),
            }
            Ok(if verification.status.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
