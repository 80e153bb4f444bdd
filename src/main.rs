use anyhow::Result;
use clap::{Parser, Subcommand};
use pwnest::{HashError, KdfAlgorithm, KdfParams, PasswordHasher, load_params};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
mod auth;

#[derive(Debug, clap::Args)]
struct KdfArgs {
    /// PBKDF2 variant: pbkdf2-sha1, pbkdf2-sha256 or pbkdf2-sha512 (default: pbkdf2-sha1)
    #[arg(long, global = true, env = "PWNEST_ALGORITHM", value_parser = parse_algorithm)]
    algorithm: Option<KdfAlgorithm>,

    /// PBKDF2 iteration count (default: 10000)
    #[arg(long, global = true, env = "PWNEST_ITERATIONS")]
    iterations: Option<u32>,

    /// Derived key size in bits (default: 256)
    #[arg(long = "key-bits", global = true, env = "PWNEST_KEY_BITS")]
    key_bits: Option<u32>,

    /// Salt size in bytes (default: 32)
    #[arg(long = "salt-len", global = true, env = "PWNEST_SALT_LEN")]
    salt_len: Option<usize>,
}

impl KdfArgs {
    /// Layers the flags over `base`, which comes from the config file or defaults.
    fn to_kdf_params(&self, base: KdfParams) -> Result<KdfParams, HashError> {
        KdfParams::new(
            self.algorithm.unwrap_or(base.algorithm()),
            self.iterations.unwrap_or(base.iterations()),
            self.key_bits.unwrap_or(base.key_bits()),
            self.salt_len.unwrap_or(base.salt_len()),
        )
    }
}

fn parse_algorithm(s: &str) -> Result<KdfAlgorithm, HashError> {
    s.parse()
}

fn resolve_base_params(path: Option<&Path>) -> Result<KdfParams> {
    match path {
        Some(p) => load_params(p),
        None => Ok(KdfParams::default()),
    }
}

#[derive(Debug, Parser)]
#[command(name = "pwnest")]
#[command(version, about = "Salted PBKDF2 password hashing and verification.")]
struct Cli {
    /// Path to a JSON file with KDF parameters
    #[arg(long, global = true, value_name = "PATH", env = "PWNEST_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    kdf: KdfArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password and prints the credential record
    Hash,

    /// Checks a password against a credential record
    #[command(arg_required_else_help = true)]
    Verify { record: String },

    /// Shows the effective KDF parameters
    Info,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PWNEST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    init_logging();

    let args = Cli::parse();
    let base = resolve_base_params(args.config.as_deref())?;
    let hasher = PasswordHasher::new(args.kdf.to_kdf_params(base)?)?;

    match args.command {
        Commands::Hash => {
            let password = auth::read_new_password()?;
            let record = hasher.hash(password.as_bytes())?;
            println!("{record}");
        }
        Commands::Verify { record } => {
            let password = auth::read_password()?;
            if !hasher.verify(password.as_bytes(), &record)? {
                eprintln!("password does not match");
                return Ok(ExitCode::FAILURE);
            }
            println!("password matches");
        }
        Commands::Info => {
            println!("{}", hasher.params());
        }
    }

    Ok(ExitCode::SUCCESS)
}
