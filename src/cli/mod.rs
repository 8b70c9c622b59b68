// Credvault — CLI Module
//
// Command-line interface using clap derive macros.
// Subcommands: store, load, delete, lookup-key.
// Connection and KDF settings come from flags or CREDVAULT_* environment variables.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::codec::KdfParams;

pub use commands::run;
#[cfg(feature = "redis")]
pub use commands::execute;

/// Credvault — encrypted-at-rest identity credential store.
#[derive(Parser, Debug)]
#[command(name = "credvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Redis connection URL.
    #[arg(long, global = true, env = "CREDVAULT_REDIS_URL", default_value = "redis://127.0.0.1/")]
    pub redis_url: String,

    /// Passphrase the certificate encryption key is derived from.
    #[arg(long, global = true, env = "CREDVAULT_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Deployment namespace; feeds the key-derivation salt.
    #[arg(long, global = true, env = "CREDVAULT_NAMESPACE", default_value = "default")]
    pub namespace: String,

    /// Argon2id memory cost in KiB.
    #[arg(long, global = true, env = "CREDVAULT_KDF_MEMORY_KIB", default_value_t = KdfParams::default().memory_kib)]
    pub kdf_memory_kib: u32,

    /// Argon2id iteration count.
    #[arg(long, global = true, env = "CREDVAULT_KDF_ITERATIONS", default_value_t = KdfParams::default().iterations)]
    pub kdf_iterations: u32,

    /// Argon2id parallelism lanes.
    #[arg(long, global = true, env = "CREDVAULT_KDF_PARALLELISM", default_value_t = KdfParams::default().parallelism)]
    pub kdf_parallelism: u32,
}

impl Settings {
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            memory_kib: self.kdf_memory_kib,
            iterations: self.kdf_iterations,
            parallelism: self.kdf_parallelism,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt and store an identity's enrollment certificate.
    Store {
        /// The identity (enrollment) ID.
        #[arg(long)]
        id: String,

        /// The organization (MSP) ID the identity belongs to.
        #[arg(long)]
        org: String,

        /// Path to the certificate file (PEM or DER).
        #[arg(long)]
        cert: PathBuf,
    },

    /// Load and decrypt an identity's enrollment certificate.
    Load {
        #[arg(long)]
        id: String,

        #[arg(long)]
        org: String,

        /// Write the certificate here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Delete an identity's stored certificate.
    Delete {
        #[arg(long)]
        id: String,

        #[arg(long)]
        org: String,
    },

    /// Print the backend key an identity is stored under.
    LookupKey {
        #[arg(long)]
        id: String,

        #[arg(long)]
        org: String,
    },
}
