// Credvault — CLI Command Handlers
//
// Each function handles one CLI subcommand. `execute` connects to Redis and
// hands off to `run`, which works against any backend so the handlers can be
// exercised without a server.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::backend::KvBackend;
use crate::codec::{EnvelopeCodec, KeyDeriver};
use crate::error::CredvaultError;
use crate::store::{BackendUserStore, CredentialRecord, IdentityIdentifier, UserStore};

use super::{Cli, Commands, Settings};

/// Execute the parsed CLI command against the configured Redis server.
#[cfg(feature = "redis")]
pub fn execute(cli: Cli) -> Result<(), CredvaultError> {
    let backend = crate::backend::RedisBackend::open(&cli.settings.redis_url)?;
    tracing::debug!(url = %cli.settings.redis_url, "Using Redis backend");
    run(cli, Arc::new(backend), &mut std::io::stdout().lock())
}

/// Execute the parsed CLI command against `backend`, writing output to `out`.
pub fn run(
    cli: Cli,
    backend: Arc<dyn KvBackend>,
    out: &mut dyn Write,
) -> Result<(), CredvaultError> {
    let settings = cli.settings;
    match cli.command {
        Commands::Store { id, org, cert } => cmd_store(&settings, backend, id, org, &cert, out),
        Commands::Load { id, org, out: path } => {
            cmd_load(&settings, backend, id, org, path.as_deref(), out)
        }
        Commands::Delete { id, org } => cmd_delete(&settings, backend, id, org, out),
        Commands::LookupKey { id, org } => cmd_lookup_key(id, org, out),
    }
}

/// Build the credential store from the passphrase and KDF settings.
fn open_store(
    settings: &Settings,
    backend: Arc<dyn KvBackend>,
) -> Result<BackendUserStore, CredvaultError> {
    let passphrase = settings.passphrase.as_deref().ok_or_else(|| {
        CredvaultError::Other(
            "A passphrase is required — pass --passphrase or set CREDVAULT_PASSPHRASE".to_string(),
        )
    })?;

    let deriver = KeyDeriver::for_namespace(&settings.namespace, settings.kdf_params())?;
    let codec = EnvelopeCodec::new(deriver);
    Ok(BackendUserStore::new(backend, passphrase, &codec)?)
}

// ─── Credentials ─────────────────────────────────────────────────────────────

fn cmd_store(
    settings: &Settings,
    backend: Arc<dyn KvBackend>,
    id: String,
    org: String,
    cert: &Path,
    out: &mut dyn Write,
) -> Result<(), CredvaultError> {
    let certificate = std::fs::read(cert)?;
    let store = open_store(settings, backend)?;

    let record = CredentialRecord::new(IdentityIdentifier::new(id, org), certificate);
    store.store(&record)?;

    writeln!(out, "✓ Stored certificate for {}", record.identifier())?;
    Ok(())
}

fn cmd_load(
    settings: &Settings,
    backend: Arc<dyn KvBackend>,
    id: String,
    org: String,
    path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), CredvaultError> {
    let store = open_store(settings, backend)?;
    let record = store.load(&IdentityIdentifier::new(id, org))?;

    match path {
        Some(path) => {
            std::fs::write(path, &record.certificate)?;
            writeln!(
                out,
                "✓ Wrote certificate for {} to {}",
                record.identifier(),
                path.display()
            )?;
        }
        None => out.write_all(&record.certificate)?,
    }
    Ok(())
}

fn cmd_delete(
    settings: &Settings,
    backend: Arc<dyn KvBackend>,
    id: String,
    org: String,
    out: &mut dyn Write,
) -> Result<(), CredvaultError> {
    let store = open_store(settings, backend)?;
    let identifier = IdentityIdentifier::new(id, org);

    if store.delete(&identifier)? {
        writeln!(out, "✓ Deleted certificate for {}", identifier)?;
    } else {
        writeln!(out, "No certificate stored for {}", identifier)?;
    }
    Ok(())
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

fn cmd_lookup_key(id: String, org: String, out: &mut dyn Write) -> Result<(), CredvaultError> {
    writeln!(out, "{}", IdentityIdentifier::new(id, org).lookup_key())?;
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
