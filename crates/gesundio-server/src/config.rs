use std::env;
use std::time::Duration;

use gesundio_storage::backend::{MAX_PRESIGN_TTL, clamp_url_ttl};

const DEFAULT_BUCKET: &str = "gesundio";

/// Settings read from the environment at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bucket: String,
    pub document_url_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bucket = lookup("GESUNDIO_BUCKET")
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BUCKET.to_string());

        let ttl = match lookup("GESUNDIO_DOCUMENT_URL_TTL_SECS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) => Duration::from_secs(secs),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring GESUNDIO_DOCUMENT_URL_TTL_SECS");
                MAX_PRESIGN_TTL
            }
            None => MAX_PRESIGN_TTL,
        };

        Self {
            bucket,
            document_url_ttl: clamp_url_ttl(ttl),
        }
    }
}
