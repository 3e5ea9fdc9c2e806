use std::collections::HashMap;

use resolvd_error::{Error, Result};
use serde::Deserialize;

use crate::backend::ChainGateway;
use crate::client::ApiResponse;

/// One directory entry: the per-chain values registered for an identifier.
///
/// A value is either a raw address or a `$handle` that still needs handle
/// resolution — the resolver decides which.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryRecord {
    /// Chain symbol (lowercase, e.g. `ada`, `eth`) to registered value
    #[serde(default)]
    pub assets: HashMap<String, String>,
}

impl ChainGateway {
    /// Raw GET against the ART directory service.
    pub async fn art_request(&self, route: &str) -> Result<ApiResponse> {
        let url = format!("{}{}", self.config().endpoints.directory, route);
        self.client().get(&url, &[]).await
    }

    /// Looks up a directory identifier and returns its per-chain records.
    pub async fn art_domain_lookup(&self, identifier: &str) -> Result<DirectoryRecord> {
        let encoded = urlencode(identifier);
        let response = self.art_request(&format!("?art-domain={encoded}")).await?;
        if !response.is_success() {
            return Err(Error::Api {
                code: response.code,
                message: format!("directory lookup failed for {identifier}"),
            });
        }
        let record: DirectoryRecord = serde_json::from_value(response.body)?;
        Ok(record)
    }

    /// Lists the resolvers the directory service supports.
    pub async fn art_resolvers(&self) -> Result<ApiResponse> {
        self.art_request("?art-action=resolvers").await
    }

    /// Lists every registered directory domain.
    pub async fn art_domains(&self) -> Result<ApiResponse> {
        self.art_request("").await
    }

    /// Network uptime report from the directory service.
    pub async fn art_health(&self) -> Result<ApiResponse> {
        self.art_request("?art-action=cardano-health").await
    }
}

/// Percent-encodes everything outside the URL-safe unreserved set.
fn urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
