#![deny(missing_docs)]
//! Operational tooling for the PKI-backed 2FA service.
//!
//! Three one-shot commands surround the running service: generating the RSA
//! key pair, fetching an encrypted seed from the remote grader, and the
//! cron-style logger that appends the current code to a log file.

use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use twofa_core::error::CoreError;
use twofa_core::keys;
use twofa_core::seed_store::SeedStore;
use twofa_core::totp;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the RSA key pair used to receive the encrypted seed
    GenerateKeys {
        /// RSA modulus size in bits
        #[arg(long, default_value_t = keys::DEFAULT_KEY_BITS)]
        bits: usize,

        /// Where to write the unencrypted PKCS#8 private key
        #[arg(long, default_value = "student_private.pem")]
        private_out: PathBuf,

        /// Where to write the SubjectPublicKeyInfo public key
        #[arg(long, default_value = "student_public.pem")]
        public_out: PathBuf,
    },
    /// Request an encrypted seed from the remote grader
    RequestSeed {
        /// Student identifier sent with the request
        #[arg(long)]
        student_id: String,

        /// Repository URL sent with the request
        #[arg(long)]
        repo_url: String,

        /// Grader endpoint URL
        #[arg(long)]
        api_url: String,

        /// Public key PEM file to submit
        #[arg(long, default_value = "student_public.pem")]
        public_key: PathBuf,

        /// Where to save the received ciphertext
        #[arg(long, default_value = "encrypted_seed.txt")]
        output: PathBuf,
    },
    /// Log the current 2FA code with a UTC timestamp (the cron consumer)
    LogCode {
        /// Seed file written by the decrypt endpoint
        #[arg(long, default_value = "/data/seed.txt")]
        seed_path: PathBuf,

        /// Append to this file instead of printing to stdout
        #[arg(long)]
        log_path: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct SeedRequest<'a> {
    student_id: &'a str,
    github_repo_url: &'a str,
    public_key: &'a str,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::GenerateKeys {
            bits,
            private_out,
            public_out,
        } => generate_keys(*bits, private_out, public_out),
        Commands::RequestSeed {
            student_id,
            repo_url,
            api_url,
            public_key,
            output,
        } => request_seed(student_id, repo_url, api_url, public_key, output),
        Commands::LogCode {
            seed_path,
            log_path,
        } => log_code(seed_path, log_path.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn generate_keys(
    bits: usize,
    private_out: &Path,
    public_out: &Path,
) -> Result<(), Box<dyn Error>> {
    let (private, public) = keys::generate_keypair(bits)?;
    keys::write_keypair(&private, &public, private_out, public_out)?;
    println!("Created {} ({bits}-bit, PKCS#8)", private_out.display());
    println!("Created {}", public_out.display());
    Ok(())
}

fn request_seed(
    student_id: &str,
    repo_url: &str,
    api_url: &str,
    public_key_path: &Path,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let public_key = fs::read_to_string(public_key_path)
        .map_err(|e| format!("cannot read {}: {e}", public_key_path.display()))?;

    info!("Requesting encrypted seed for student '{student_id}'.");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let payload = SeedRequest {
        student_id,
        github_repo_url: repo_url,
        public_key: public_key.trim(),
    };
    let data: serde_json::Value = client
        .post(api_url)
        .json(&payload)
        .send()?
        .error_for_status()?
        .json()?;

    if data["status"] != "success" {
        return Err(format!("grader rejected the request: {}", data["error"]).into());
    }
    let encrypted = data["encrypted_seed"]
        .as_str()
        .ok_or("grader response is missing encrypted_seed")?;

    fs::write(output, encrypted.trim())?;
    println!(
        "Encrypted seed saved to {}. Do not commit this file.",
        output.display()
    );
    Ok(())
}

fn log_code(seed_path: &Path, log_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let store = SeedStore::new(seed_path);
    let seed = store.read()?.ok_or(CoreError::SeedNotFound)?;
    let (code, _) = totp::current_code(&seed)?;

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    let line = format!("{timestamp} - 2FA Code: {code}");
    match log_path {
        Some(path) => {
            let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{line}")?;
        }
        None => println!("{line}"),
    }
    Ok(())
}
